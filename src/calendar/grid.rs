use crate::schedule::{Event, EventList, RecurringSubject, StudyPlan};
use std::iter::successors;
use time::{Date, Duration};

pub(crate) const DAYS_IN_WEEK: usize = 7;
pub(crate) const GRID_WEEKS: usize = 6;
pub(crate) const GRID_DAYS: usize = DAYS_IN_WEEK * GRID_WEEKS;

/// One day slot of the six-week month grid.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DayCell {
    pub(crate) date: Date,
    /// Whether the date belongs to the month the grid was built for, as
    /// opposed to the leading or trailing days of the adjacent months.
    pub(crate) in_view_month: bool,
    pub(crate) subjects: Vec<RecurringSubject>,
    pub(crate) events: Vec<Event>,
}

/// The 42 cells displayed for one month, in calendar order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    view: Date,
    cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Builds the grid for the month containing `view`: six Monday-first
    /// weeks starting on the Monday on or before the first of the month,
    /// each cell annotated with the subjects recurring on its weekday and
    /// the events dated exactly on it.
    ///
    /// Returns `None` only when the 42-day span would run past an end of
    /// the representable calendar.
    pub(crate) fn build(view: Date, plan: &StudyPlan, events: &EventList) -> Option<MonthGrid> {
        let start = grid_start(view)?;
        start.checked_add(last_cell_offset())?;
        let cells = successors(Some(start), |&d| d.next_day())
            .take(GRID_DAYS)
            .map(|date| DayCell {
                date,
                in_view_month: date.month() == view.month() && date.year() == view.year(),
                subjects: plan.on(date.weekday()).cloned().collect(),
                events: events.on(date).cloned().collect(),
            })
            .collect::<Vec<_>>();
        Some(MonthGrid { view, cells })
    }

    pub(crate) fn view(&self) -> Date {
        self.view
    }

    pub(crate) fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub(crate) fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(DAYS_IN_WEEK)
    }
}

/// Whether a full six-week grid anchored at `view` fits within the
/// representable calendar.
pub(crate) fn spans_full_grid(view: Date) -> bool {
    grid_start(view)
        .and_then(|start| start.checked_add(last_cell_offset()))
        .is_some()
}

// The Monday on or before the first day of the month containing `view`.
// With Monday-first ordinals no weekday needs special-casing: the offset
// back is the first day's days-from-Monday count (Sunday gives 6).
fn grid_start(view: Date) -> Option<Date> {
    let first = view.replace_day(1).ok()?;
    let back = i64::from(first.weekday().number_days_from_monday());
    first.checked_sub(Duration::days(back))
}

fn last_cell_offset() -> Duration {
    Duration::days(GRID_DAYS as i64 - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;
    use time::macros::{date, time};
    use time::Weekday;

    fn subject(name: &str, day: Weekday) -> RecurringSubject {
        RecurringSubject {
            name: name.into(),
            day,
            color: Color::Blue,
        }
    }

    fn event(date: Date, title: &str) -> Event {
        Event {
            date,
            title: title.into(),
            time: time!(12:00),
        }
    }

    fn build(view: Date, plan: &StudyPlan, events: &EventList) -> MonthGrid {
        MonthGrid::build(view, plan, events).unwrap()
    }

    fn empty(view: Date) -> MonthGrid {
        build(view, &StudyPlan::default(), &EventList::new())
    }

    #[test]
    fn march_2024_starts_on_monday_february_26() {
        let grid = empty(date!(2024 - 03 - 15));
        assert_eq!(grid.cells().len(), GRID_DAYS);
        assert_eq!(grid.cells()[0].date, date!(2024 - 02 - 26));
    }

    #[test]
    fn six_consecutive_monday_first_weeks_for_any_month() {
        for view in [
            date!(2024 - 01 - 01),
            date!(2024 - 02 - 29),
            date!(2024 - 09 - 10),
            date!(2025 - 12 - 31),
            date!(2026 - 02 - 14),
        ] {
            let grid = empty(view);
            assert_eq!(grid.cells().len(), GRID_DAYS, "for {view}");
            assert_eq!(grid.cells()[0].date.weekday(), Weekday::Monday, "for {view}");
            assert_eq!(
                grid.cells()[GRID_DAYS - 1].date.weekday(),
                Weekday::Sunday,
                "for {view}"
            );
            for pair in grid.cells().windows(2) {
                assert_eq!(pair[0].date.next_day(), Some(pair[1].date));
            }
            assert_eq!(grid.weeks().count(), GRID_WEEKS);
        }
    }

    #[test]
    fn month_starting_on_sunday_pads_six_leading_days() {
        // September 2024 begins on a Sunday
        let grid = empty(date!(2024 - 09 - 01));
        assert_eq!(grid.cells()[0].date, date!(2024 - 08 - 26));
        assert_eq!(grid.cells()[6].date, date!(2024 - 09 - 01));
    }

    #[test]
    fn month_starting_on_monday_has_no_leading_days() {
        // July 2024 begins on a Monday
        let grid = empty(date!(2024 - 07 - 20));
        assert_eq!(grid.cells()[0].date, date!(2024 - 07 - 01));
    }

    #[test]
    fn view_month_dates_appear_once_and_are_flagged() {
        let grid = empty(date!(2024 - 03 - 15));
        let in_month = grid
            .cells()
            .iter()
            .filter(|cell| cell.in_view_month)
            .collect::<Vec<_>>();
        assert_eq!(in_month.len(), 31);
        assert_eq!(in_month[0].date, date!(2024 - 03 - 01));
        assert_eq!(in_month[30].date, date!(2024 - 03 - 31));
    }

    #[test]
    fn events_land_only_on_their_exact_date() {
        let mut events = EventList::new();
        events.add(event(date!(2024 - 03 - 15), "essay"));
        events.add(event(date!(2024 - 03 - 15), "revision"));
        events.add(event(date!(2024 - 03 - 16), "lab"));
        let grid = build(date!(2024 - 03 - 01), &StudyPlan::default(), &events);
        for cell in grid.cells() {
            let titles = cell
                .events
                .iter()
                .map(|e| e.title.as_str())
                .collect::<Vec<_>>();
            if cell.date == date!(2024 - 03 - 15) {
                assert_eq!(titles, ["essay", "revision"]);
            } else if cell.date == date!(2024 - 03 - 16) {
                assert_eq!(titles, ["lab"]);
            } else {
                assert!(titles.is_empty(), "unexpected events on {}", cell.date);
            }
        }
    }

    #[test]
    fn monday_subjects_cover_adjacent_month_mondays() {
        let plan = StudyPlan::new(vec![
            subject("Math", Weekday::Monday),
            subject("Computer Science", Weekday::Monday),
        ]);
        let grid = build(date!(2024 - 03 - 15), &plan, &EventList::new());
        for cell in grid.cells() {
            let names = cell
                .subjects
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>();
            if cell.date.weekday() == Weekday::Monday {
                assert_eq!(names, ["Math", "Computer Science"], "on {}", cell.date);
            } else {
                assert!(names.is_empty(), "on {}", cell.date);
            }
        }
        // The leading Monday belongs to February yet still carries the plan.
        assert!(!grid.cells()[0].in_view_month);
        assert_eq!(grid.cells()[0].subjects.len(), 2);
    }

    #[test]
    fn sunday_subjects_land_on_every_sunday() {
        let plan = StudyPlan::new(vec![subject("Review", Weekday::Sunday)]);
        let grid = build(date!(2024 - 03 - 15), &plan, &EventList::new());
        for (i, cell) in grid.cells().iter().enumerate() {
            assert_eq!(cell.subjects.len(), usize::from(i % DAYS_IN_WEEK == 6));
        }
    }

    #[test]
    fn rebuilding_with_identical_inputs_is_identical() {
        let plan = StudyPlan::new(vec![subject("Math", Weekday::Monday)]);
        let mut events = EventList::new();
        events.add(event(date!(2024 - 03 - 15), "essay"));
        let first = MonthGrid::build(date!(2024 - 03 - 15), &plan, &events);
        let second = MonthGrid::build(date!(2024 - 03 - 15), &plan, &events);
        assert_eq!(first, second);
    }

    #[test]
    fn grid_refuses_to_run_past_the_calendar() {
        let view = date!(9999 - 12 - 15);
        assert!(!spans_full_grid(view));
        assert!(MonthGrid::build(view, &StudyPlan::default(), &EventList::new()).is_none());
    }
}
