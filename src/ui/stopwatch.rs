use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier},
    text::Span,
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::centered;
use super::theme::Palette;
use crate::app::Theme;
use crate::stopwatch::{Stopwatch, StopwatchState};
use crate::util::format_clock;

pub fn render(sw: &Stopwatch, theme: Theme, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let mode_label = match theme {
        Theme::Light => "(d) Dark Mode",
        Theme::Dark => "(d) Light Mode",
    };
    Paragraph::new(Span::styled(mode_label, palette.dim()))
        .alignment(Alignment::Right)
        .render(Rect::new(area.x, area.y, area.width, area.height.min(1)), buf);

    let panel = centered(area, 30, 11);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // padding
            Constraint::Length(3), // clock between rules
            Constraint::Length(1), // padding
            Constraint::Length(1), // start / stop
            Constraint::Length(1), // padding
            Constraint::Length(1), // reset
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(panel);

    Paragraph::new(Span::styled(
        "SPEED TRACKER",
        palette.dim().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    Paragraph::new(Span::styled(format_clock(sw.elapsed()), palette.bold()))
        .block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(palette.border()),
        )
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    let (label, color) = match sw.state() {
        StopwatchState::Running => ("  STOP  ", Color::Red),
        StopwatchState::Stopped => ("  START  ", Color::Green),
    };
    Paragraph::new(Span::styled(label, palette.badge(color)))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

    Paragraph::new(Span::styled("(r) RESET", palette.base()))
        .alignment(Alignment::Center)
        .render(chunks[6], buf);

    Paragraph::new(Span::styled(
        "(space) start/stop   (esc)ape",
        palette.dim().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[8], buf);
}
