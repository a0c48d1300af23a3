use ratatui::style::Color;
use time::{Date, Time, Weekday};

/// A standing weekly study commitment: the subject is shown on every
/// occurrence of its weekday, in its own color.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct RecurringSubject {
    pub(crate) name: String,
    pub(crate) day: Weekday,
    pub(crate) color: Color,
}

/// The fixed weekly plan, in the order the subjects were declared.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct StudyPlan {
    subjects: Vec<RecurringSubject>,
}

impl StudyPlan {
    pub(crate) fn new(subjects: Vec<RecurringSubject>) -> StudyPlan {
        StudyPlan { subjects }
    }

    pub(crate) fn subjects(&self) -> &[RecurringSubject] {
        &self.subjects
    }

    /// Subjects scheduled on the given weekday, in declaration order.
    pub(crate) fn on(&self, day: Weekday) -> impl Iterator<Item = &RecurringSubject> {
        self.subjects.iter().filter(move |subject| subject.day == day)
    }
}

/// A one-off calendar entry entered through the event form.  Events live
/// only for the current session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Event {
    pub(crate) date: Date,
    pub(crate) title: String,
    pub(crate) time: Time,
}

impl Event {
    pub(crate) fn label(&self) -> String {
        let hour = self.time.hour();
        let minute = self.time.minute();
        format!("{hour:02}:{minute:02} {}", self.title)
    }
}

/// Session-local events in creation order.  Entries are only ever appended.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct EventList(Vec<Event>);

impl EventList {
    pub(crate) fn new() -> EventList {
        EventList::default()
    }

    pub(crate) fn add(&mut self, event: Event) {
        self.0.push(event);
    }

    /// Events whose date is exactly `date`, in creation order.
    pub(crate) fn on(&self, date: Date) -> impl Iterator<Item = &Event> {
        self.0.iter().filter(move |event| event.date == date)
    }
}
