use crate::calendar::{MonthView, Planner};
use crate::form::{EventForm, EventFormState, FormInput, FormOutput};
use crate::help::Help;
use crate::theme::BASE_STYLE;
use crate::weekplan::WeekPlan;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    planner: Planner,
    state: AppState,
}

impl App {
    pub(crate) fn new(planner: Planner) -> App {
        App {
            planner,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.previous_month(),
                KeyCode::Char('l') | KeyCode::Right => self.next_month(),
                KeyCode::Char('t') | KeyCode::Home => {
                    self.planner.jump_to_today();
                    true
                }
                KeyCode::Char('a') => {
                    self.state = AppState::AddingEvent(EventFormState::new());
                    true
                }
                KeyCode::Char('p') => {
                    self.state = AppState::Plan;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
            AppState::Helping | AppState::Plan => {
                self.state = AppState::Calendar;
                true
            }
            AppState::AddingEvent(state) => {
                if key == KeyCode::Esc {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char(c) => state.handle_input(FormInput::Char(c)),
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(FormInput::Backspace)
                        }
                        KeyCode::Tab => state.handle_input(FormInput::Next),
                        KeyCode::Enter => state.handle_input(FormInput::Enter),
                        _ => FormOutput::Invalid,
                    };
                    match output {
                        FormOutput::Ok => true,
                        FormOutput::Invalid => false,
                        FormOutput::Submit(event) => {
                            self.planner.add_event(event);
                            self.state = AppState::Calendar;
                            true
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn previous_month(&mut self) -> bool {
        self.planner.month_backwards().is_ok()
    }

    fn next_month(&mut self) -> bool {
        self.planner.month_forwards().is_ok()
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        MonthView::new().render(area, buf, &mut self.planner);
        match &mut self.state {
            AppState::Helping => Help(BASE_STYLE).render(area, buf),
            AppState::Plan => WeekPlan(self.planner.plan()).render(area, buf),
            AppState::AddingEvent(state) => EventForm.render(area, buf, state),
            AppState::Calendar | AppState::Quitting => (),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Plan,
    AddingEvent(EventFormState),
    Quitting,
}
