use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::charting::{status_color, time_chart};
use super::theme::{subject_color, Palette};
use crate::app::ActiveSession;
use crate::dashboard::live_chart_series;
use crate::session::QuestionStatus;
use crate::timer::TimerState;
use crate::util::format_clock;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub fn render(active: &ActiveSession, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let session = &active.session;
    let timer = &active.timer;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // subject / chapter
            Constraint::Length(1), // padding
            Constraint::Length(1), // "QUESTION"
            Constraint::Length(1), // number
            Constraint::Length(1), // padding
            Constraint::Length(1), // clock
            Constraint::Length(1), // padding
            Constraint::Length(1), // classify actions
            Constraint::Length(1), // timer controls
            Constraint::Length(1), // padding
            Constraint::Min(6),    // live chart
        ])
        .split(area);

    let header = Line::from(vec![
        Span::styled(
            format!(" {} ", session.subject()),
            palette.badge(subject_color(session.subject())),
        ),
        Span::styled(format!("  {}", session.chapter()), palette.bold()),
    ]);
    Paragraph::new(header).render(chunks[0], buf);

    Paragraph::new(Span::styled("QUESTION", palette.dim()))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);
    Paragraph::new(Span::styled(
        session.next_question_number().to_string(),
        palette.bold(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    let mut clock = vec![Span::styled(format_clock(timer.elapsed()), palette.bold())];
    if timer.state() == TimerState::Paused {
        clock.push(Span::styled(
            "  PAUSED",
            palette
                .base()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ));
    }
    Paragraph::new(Line::from(clock))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

    let button = |label: &'static str, status: QuestionStatus| {
        Span::styled(label, palette.badge(status_color(Some(status))))
    };
    let actions = Line::from(vec![
        button(" (c) Correct ", QuestionStatus::Correct),
        Span::raw("  "),
        button(" (w) Wrong ", QuestionStatus::Incorrect),
        Span::raw("  "),
        button(" (s) Skip ", QuestionStatus::Skipped),
    ]);
    Paragraph::new(actions)
        .alignment(Alignment::Center)
        .render(chunks[7], buf);

    let pause_label = match timer.state() {
        TimerState::Running => "(p) Pause",
        TimerState::Paused => "(p) Resume",
    };
    Paragraph::new(Span::styled(
        format!("{pause_label}   (e) End Session   (d) theme   (esc)ape"),
        palette.dim().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[8], buf);

    let series = live_chart_series(
        session.records(),
        session.next_question_number(),
        timer.elapsed(),
    );
    time_chart(&series, chunks[10].width, palette, "Time per Question (Seconds)")
        .render(chunks[10], buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Theme;
    use crate::clock::{ClockId, ManualScheduler};
    use crate::session::{Session, Subject};
    use crate::timer::QuestionTimer;
    use crate::ui::buffer_text;
    use std::rc::Rc;

    fn active() -> ActiveSession {
        let mut session = Session::new(Subject::Physics, "Rotational Motion");
        session.record(30, QuestionStatus::Correct);
        let mut timer = QuestionTimer::start(Rc::new(ManualScheduler::new()));
        for _ in 0..75 {
            timer.on_tick(ClockId::Question);
        }
        ActiveSession { session, timer }
    }

    fn draw(active: &ActiveSession) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        render(active, &Palette::for_theme(Theme::Light), area, &mut buffer);
        buffer_text(&buffer)
    }

    #[test]
    fn shows_question_number_and_clock() {
        let text = draw(&active());
        assert!(text.contains("Rotational Motion"));
        assert!(text.contains("QUESTION"));
        assert!(text.contains("01:15"));
        assert!(text.contains("(p) Pause"));
        assert!(!text.contains("PAUSED"));
        assert!(text.contains("Q2"));
    }

    #[test]
    fn marks_paused_timer() {
        let mut a = active();
        a.timer.pause();
        let text = draw(&a);
        assert!(text.contains("PAUSED"));
        assert!(text.contains("(p) Resume"));
    }
}
