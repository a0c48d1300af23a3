use crate::schedule::Event;
use crate::theme::{
    form::{ACTIVE_LABEL_STYLE, READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use time::{Date, Month, Time};

const DATE_DIGITS: usize = 8;
const TIME_DIGITS: usize = 4;
const TITLE_LIMIT: usize = 32;

const OUTER_WIDTH: u16 = 45;
const OUTER_HEIGHT: u16 = 10;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct EventForm;

impl StatefulWidget for EventForm {
    type State = EventFormState;

    /*
     * ...........................................
     * .┌─────────────── New Event ─────────────┐.
     * .│                                       │.
     * .│ Date   YYYY-MM-DD                     │.
     * .│ Title  Essay draft_                   │.
     * .│ Time   HH:MM                          │.
     * .│                                       │.
     * .│                [ENTER]                │.
     * .└───────────────────────────────────────┘.
     * ...........................................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" New Event ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

/// Input state for the event dialog: a masked date field, a free-text
/// title, and a masked time field, visited in that order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct EventFormState {
    field: Field,
    date: [Option<u8>; DATE_DIGITS],
    title: String,
    time: [Option<u8>; TIME_DIGITS],
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Field {
    #[default]
    Date,
    Title,
    Time,
    Confirm,
}

impl Field {
    fn next(self) -> Field {
        match self {
            Field::Date => Field::Title,
            Field::Title => Field::Time,
            Field::Time => Field::Confirm,
            Field::Confirm => Field::Date,
        }
    }
}

impl EventFormState {
    pub(crate) fn new() -> EventFormState {
        EventFormState::default()
    }

    pub(crate) fn handle_input(&mut self, input: FormInput) -> FormOutput {
        match input {
            FormInput::Char(c) => self.insert(c),
            FormInput::Backspace => self.erase(),
            FormInput::Next => {
                self.field = self.field.next();
                FormOutput::Ok
            }
            FormInput::Enter => {
                if self.field == Field::Confirm {
                    match self.event() {
                        Some(event) => FormOutput::Submit(event),
                        None => FormOutput::Invalid,
                    }
                } else {
                    self.field = self.field.next();
                    FormOutput::Ok
                }
            }
        }
    }

    fn insert(&mut self, c: char) -> FormOutput {
        match self.field {
            Field::Date => push_digit(&mut self.date, c),
            Field::Time => push_digit(&mut self.time, c),
            Field::Title => {
                if !c.is_control() && self.title.chars().count() < TITLE_LIMIT {
                    self.title.push(c);
                    FormOutput::Ok
                } else {
                    FormOutput::Invalid
                }
            }
            Field::Confirm => FormOutput::Invalid,
        }
    }

    fn erase(&mut self) -> FormOutput {
        match self.field {
            Field::Date => pop_digit(&mut self.date),
            Field::Time => pop_digit(&mut self.time),
            Field::Title => {
                if self.title.pop().is_some() {
                    FormOutput::Ok
                } else {
                    FormOutput::Invalid
                }
            }
            Field::Confirm => FormOutput::Invalid,
        }
    }

    // All three fields validate together on confirm: the digit groups must
    // form a real calendar date and wall-clock time, and the trimmed title
    // must be non-empty.
    fn event(&self) -> Option<Event> {
        let year = i32::try_from(group_number(&self.date[..4])?).ok()?;
        let month = Month::try_from(u8::try_from(group_number(&self.date[4..6])?).ok()?).ok()?;
        let day = u8::try_from(group_number(&self.date[6..])?).ok()?;
        let date = Date::from_calendar_date(year, month, day).ok()?;
        let hour = u8::try_from(group_number(&self.time[..2])?).ok()?;
        let minute = u8::try_from(group_number(&self.time[2..])?).ok()?;
        let time = Time::from_hms(hour, minute, 0).ok()?;
        let title = self.title.trim();
        (!title.is_empty()).then(|| Event {
            date,
            title: title.to_owned(),
            time,
        })
    }

    fn to_text(&self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            self.date_line(),
            self.title_line(),
            self.time_line(),
            Line::styled("", BASE_STYLE),
            // Style a span and convert it to a line so that only the
            // "[ENTER]" text and not its centering padding is underlined:
            Line::from(Span::styled(
                "[ENTER]",
                if self.field == Field::Confirm {
                    READY_ENTER_STYLE
                } else {
                    BASE_STYLE
                },
            ))
            .centered(),
        ])
    }

    fn label(&self, text: &'static str, field: Field) -> Span<'static> {
        let style = if self.field == field {
            ACTIVE_LABEL_STYLE
        } else {
            BASE_STYLE
        };
        Span::styled(format!("{text:<7}"), style)
    }

    fn date_line(&self) -> Line<'static> {
        let mut spans = vec![self.label("Date", Field::Date)];
        let mut first = true;
        for (fallback, cells) in [
            ("Y", &self.date[..4]),
            ("M", &self.date[4..6]),
            ("D", &self.date[6..]),
        ] {
            if !std::mem::replace(&mut first, false) {
                spans.push(Span::styled("-", BASE_STYLE));
            }
            for cell in cells {
                spans.push(match cell {
                    Some(d) => Span::styled(format!("{d}"), BASE_STYLE),
                    None => Span::styled(fallback, UNFILLED_CELL_STYLE),
                });
            }
        }
        Line::from_iter(spans)
    }

    fn title_line(&self) -> Line<'static> {
        let mut spans = vec![
            self.label("Title", Field::Title),
            Span::styled(self.title.clone(), BASE_STYLE),
        ];
        if self.field == Field::Title {
            spans.push(Span::styled("_", UNFILLED_CELL_STYLE));
        }
        Line::from_iter(spans)
    }

    fn time_line(&self) -> Line<'static> {
        let mut spans = vec![self.label("Time", Field::Time)];
        let mut first = true;
        for (fallback, cells) in [("H", &self.time[..2]), ("M", &self.time[2..])] {
            if !std::mem::replace(&mut first, false) {
                spans.push(Span::styled(":", BASE_STYLE));
            }
            for cell in cells {
                spans.push(match cell {
                    Some(d) => Span::styled(format!("{d}"), BASE_STYLE),
                    None => Span::styled(fallback, UNFILLED_CELL_STYLE),
                });
            }
        }
        Line::from_iter(spans)
    }
}

fn push_digit(cells: &mut [Option<u8>], c: char) -> FormOutput {
    let Some(digit) = c.to_digit(10) else {
        return FormOutput::Invalid;
    };
    match cells.iter_mut().find(|cell| cell.is_none()) {
        Some(cell) => {
            *cell = Some(digit as u8);
            FormOutput::Ok
        }
        None => FormOutput::Invalid,
    }
}

fn pop_digit(cells: &mut [Option<u8>]) -> FormOutput {
    match cells.iter_mut().rev().find(|cell| cell.is_some()) {
        Some(cell) => {
            *cell = None;
            FormOutput::Ok
        }
        None => FormOutput::Invalid,
    }
}

fn group_number(cells: &[Option<u8>]) -> Option<u32> {
    cells
        .iter()
        .try_fold(0u32, |acc, cell| Some(acc * 10 + u32::from((*cell)?)))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FormInput {
    Char(char),
    Backspace,
    Next,
    Enter,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum FormOutput {
    Ok,
    Invalid,
    Submit(Event),
}
