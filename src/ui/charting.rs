use ratatui::{
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block},
};

use super::theme::Palette;
use crate::dashboard::ChartBar;
use crate::session::QuestionStatus;

pub const BAR_WIDTH: u16 = 4;
pub const BAR_GAP: u16 = 1;

/// Bar color per outcome; blue for a question that has no status yet
pub fn status_color(status: Option<QuestionStatus>) -> Color {
    match status {
        Some(QuestionStatus::Correct) => Color::Green,
        Some(QuestionStatus::Incorrect) => Color::Red,
        Some(QuestionStatus::Skipped) => Color::Gray,
        None => Color::Blue,
    }
}

/// How many bars fit inside a bordered chart of the given outer width
pub fn bars_that_fit(outer_width: u16) -> usize {
    let inner = outer_width.saturating_sub(2);
    ((inner + BAR_GAP) / (BAR_WIDTH + BAR_GAP)) as usize
}

/// Bar chart of seconds per question, keeping the most recent bars when space runs out
pub fn time_chart(
    series: &[ChartBar],
    outer_width: u16,
    palette: &Palette,
    title: &str,
) -> BarChart<'static> {
    let skip = series.len().saturating_sub(bars_that_fit(outer_width));
    let bars: Vec<Bar<'static>> = series
        .iter()
        .skip(skip)
        .map(|b| {
            let color = status_color(b.status);
            Bar::default()
                .value(b.time_in_seconds)
                .label(Line::from(b.label()))
                .style(Style::default().fg(color))
                .value_style(palette.badge(color))
        })
        .collect();

    BarChart::default()
        .block(
            Block::bordered()
                .title(title.to_string())
                .border_style(palette.border())
                .style(palette.base()),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(BAR_GAP)
        .label_style(palette.dim())
}
