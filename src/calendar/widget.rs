use super::grid::DayCell;
use super::planner::Planner;
use crate::theme::{ADJACENT_STYLE, BASE_STYLE, EVENT_STYLE, TITLE_STYLE, TODAY_STYLE, WEEKDAY_STYLE};
use ratatui::layout::Flex;
use ratatui::{prelude::*, widgets::*};

static DAY_NAMES: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Number of columns per day of week
const DAY_WIDTH: u16 = 10;

/// Width of the calendar in columns
const MAIN_WIDTH: u16 = DAY_WIDTH * 7;

/// Number of lines taken up by the month heading, the weekday names, and
/// their rule
const HEADER_LINES: u16 = 3;

/// Number of lines taken up by each week: the day numbers plus the label
/// slots below them
const WEEK_LINES: u16 = 3;

/// Label lines available per cell
const LABEL_SLOTS: usize = 2;

/// Columns available to a label within its cell
const LABEL_WIDTH: u16 = DAY_WIDTH - 2;

const ACS_HLINE: char = '─';

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MonthView;

impl MonthView {
    pub(crate) fn new() -> MonthView {
        MonthView
    }
}

impl StatefulWidget for MonthView {
    type State = Planner;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [area] = Layout::horizontal([MAIN_WIDTH.min(area.width)])
            .flex(Flex::Center)
            .areas(area);
        let grid = state.grid();
        let today = state.today();
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(grid.view());
        canvas.draw_header();
        for (row, week) in (0u16..).zip(grid.weeks()) {
            for (col, cell) in (0u16..).zip(week.iter()) {
                canvas.draw_cell(row, col, cell, cell.date == today);
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, view: time::Date) {
        let title = format!("{} {}", view.month(), view.year());
        let width = u16::try_from(title.len()).unwrap_or(MAIN_WIDTH);
        let x = MAIN_WIDTH.saturating_sub(width) / 2;
        self.mvprint(0, x, &title, TITLE_STYLE, MAIN_WIDTH);
    }

    fn draw_header(&mut self) {
        for (col, name) in (0u16..).zip(DAY_NAMES) {
            self.mvprint(1, col * DAY_WIDTH + 1, name, WEEKDAY_STYLE, DAY_WIDTH);
        }
        self.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_cell(&mut self, row: u16, col: u16, cell: &DayCell, is_today: bool) {
        let y = HEADER_LINES + row * WEEK_LINES;
        let x = col * DAY_WIDTH;
        let day = cell.date.day();
        let (number, number_style) = if is_today {
            (format!("[{day:2}]"), TODAY_STYLE)
        } else if cell.in_view_month {
            (format!(" {day:2} "), BASE_STYLE)
        } else {
            (format!(" {day:2} "), ADJACENT_STYLE)
        };
        self.mvprint(y, x, &number, number_style, DAY_WIDTH);

        let entries = cell
            .subjects
            .iter()
            .map(|subject| (subject.name.clone(), BASE_STYLE.fg(subject.color)))
            .chain(cell.events.iter().map(|event| (event.label(), EVENT_STYLE)))
            .collect::<Vec<_>>();
        let shown = if entries.len() > LABEL_SLOTS {
            LABEL_SLOTS - 1
        } else {
            entries.len()
        };
        for (line, (text, style)) in (1u16..).zip(entries.iter().take(shown)) {
            let style = if cell.in_view_month {
                *style
            } else {
                ADJACENT_STYLE
            };
            self.mvprint(y + line, x + 1, text, style, LABEL_WIDTH);
        }
        if entries.len() > shown {
            let more = format!("+{}", entries.len() - shown);
            let style = if cell.in_view_month {
                EVENT_STYLE
            } else {
                ADJACENT_STYLE
            };
            self.mvprint(y + WEEK_LINES - 1, x + 1, &more, style, LABEL_WIDTH);
        }
    }

    fn mvprint(&mut self, y: u16, x: u16, s: &str, style: Style, max_width: u16) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s, style);
            let width = u16::try_from(text.width())
                .unwrap_or(u16::MAX)
                .min(max_width);
            // Rendering through a Paragraph truncates text that would
            // extend beyond the cell or the calendar's area; the Rect must
            // stay within the frame lest a panic result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(
            y,
            x,
            &String::from(ch).repeat(length.into()),
            BASE_STYLE,
            length,
        );
    }
}
