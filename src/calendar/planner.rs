use super::grid::{self, MonthGrid};
use crate::schedule::{Event, EventList, StudyPlan};
use log::debug;
use thiserror::Error;
use time::{Date, Month};

/// View state for the month calendar: the displayed month's anchor date,
/// the fixed weekly study plan, and the events added this session.
///
/// The anchor is only ever replaced through the navigation methods, which
/// keep it inside the span where a full six-week grid exists.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Planner {
    today: Date,
    view: Date,
    plan: StudyPlan,
    events: EventList,
}

impl Planner {
    pub(crate) fn new(today: Date, plan: StudyPlan) -> Planner {
        Planner {
            today,
            view: today,
            plan,
            events: EventList::new(),
        }
    }

    pub(crate) fn today(&self) -> Date {
        self.today
    }

    pub(crate) fn view(&self) -> Date {
        self.view
    }

    pub(crate) fn plan(&self) -> &StudyPlan {
        &self.plan
    }

    pub(crate) fn events(&self) -> &EventList {
        &self.events
    }

    pub(crate) fn jump_to_date(&mut self, date: Date) -> Result<(), OutOfTimeError> {
        if grid::spans_full_grid(date) {
            self.view = date;
            Ok(())
        } else {
            Err(OutOfTimeError)
        }
    }

    pub(crate) fn jump_to_today(&mut self) {
        self.view = self.today;
    }

    /// Moves the view to the first day of the following month.
    pub(crate) fn month_forwards(&mut self) -> Result<(), OutOfTimeError> {
        let first = first_of_month(self.view);
        let next = match first.month() {
            Month::December => Date::from_calendar_date(first.year() + 1, Month::January, 1),
            month => Date::from_calendar_date(first.year(), month.next(), 1),
        }
        .map_err(|_| OutOfTimeError)?;
        self.jump_to_date(next)
    }

    /// Moves the view to the first day of the preceding month.
    pub(crate) fn month_backwards(&mut self) -> Result<(), OutOfTimeError> {
        let first = first_of_month(self.view);
        let previous = match first.month() {
            Month::January => Date::from_calendar_date(first.year() - 1, Month::December, 1),
            month => Date::from_calendar_date(first.year(), month.previous(), 1),
        }
        .map_err(|_| OutOfTimeError)?;
        self.jump_to_date(previous)
    }

    pub(crate) fn add_event(&mut self, event: Event) {
        debug!("new event {:?} on {}", event.title, event.date);
        self.events.add(event);
    }

    /// Recomputes the grid for the current view month.
    pub(crate) fn grid(&self) -> MonthGrid {
        MonthGrid::build(self.view, &self.plan, &self.events)
            .expect("navigation keeps the view inside the representable calendar")
    }
}

fn first_of_month(date: Date) -> Date {
    date.replace_day(1).expect("every month has a first day")
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of the calendar")]
pub(crate) struct OutOfTimeError;
