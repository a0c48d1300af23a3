use crate::schedule::StudyPlan;
use crate::theme::{BASE_STYLE, WEEKDAY_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};
use time::Weekday::{self, Friday, Monday, Saturday, Sunday, Thursday, Tuesday, Wednesday};

static WEEK: [Weekday; 7] = [
    Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday,
];

/// Overlay listing the recurring study plan weekday by weekday.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct WeekPlan<'a>(pub(crate) &'a StudyPlan);

impl WeekPlan<'_> {
    fn to_text(self) -> Text<'static> {
        let mut lines = Vec::with_capacity(WEEK.len() + 2);
        for weekday in WEEK {
            let mut spans = vec![Span::styled(
                format!("{:<10}", weekday.to_string()),
                WEEKDAY_STYLE,
            )];
            let mut first = true;
            for subject in self.0.on(weekday) {
                if !std::mem::replace(&mut first, false) {
                    spans.push(Span::styled(", ", BASE_STYLE));
                }
                spans.push(Span::styled(
                    subject.name.clone(),
                    BASE_STYLE.fg(subject.color),
                ));
            }
            if first {
                spans.push(Span::styled("-", BASE_STYLE));
            }
            lines.push(Line::from_iter(spans));
        }
        lines.push(Line::raw(""));
        lines.push(Line::raw("Press the Any Key to dismiss."));
        Text::from_iter(lines)
    }
}

impl Widget for WeekPlan<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.to_text();
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Weekly Plan ")
                    .title_alignment(Alignment::Center),
            )
            .style(BASE_STYLE);
        let [plan_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [plan_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(plan_area);
        let outer_area = Rect {
            x: plan_area.x.saturating_sub(1),
            y: plan_area.y,
            width: plan_area.width.saturating_add(2),
            height: plan_area.height,
        };
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        para.render(plan_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::RecurringSubject;
    use ratatui::style::Color;

    #[test]
    fn lists_subjects_under_their_weekday() {
        let plan = StudyPlan::new(vec![
            RecurringSubject {
                name: "Math".into(),
                day: Monday,
                color: Color::Blue,
            },
            RecurringSubject {
                name: "Computer Science".into(),
                day: Monday,
                color: Color::LightBlue,
            },
        ]);
        let area = Rect::new(0, 0, 60, 14);
        let mut buffer = Buffer::empty(area);
        WeekPlan(&plan).render(area, &mut buffer);
        let rows = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer.cell((x, y)).map_or(" ", |cell| cell.symbol()))
                    .collect::<String>()
            })
            .collect::<Vec<_>>();
        assert!(rows
            .iter()
            .any(|row| row.contains("Monday    Math, Computer Science")));
        // Weekdays without subjects still get a line.
        assert!(rows.iter().any(|row| row.contains("Tuesday   -")));
    }
}
