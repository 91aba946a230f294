use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

use super::charting::{status_color, time_chart};
use super::theme::{subject_color, Palette};
use crate::app::{AnalysisState, Review};
use crate::dashboard::chart_series;
use crate::util::format_minutes_seconds;

const HORIZONTAL_MARGIN: u16 = 2;

pub fn render(review: &Review, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let session = review.session();
    let stats = review.stats();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(1)
        .constraints([
            Constraint::Length(1),  // header
            Constraint::Length(4),  // stat cards
            Constraint::Min(8),     // chart
            Constraint::Length(10), // breakdown + analysis
            Constraint::Length(1),  // legend
        ])
        .split(area);

    let header = Line::from(vec![
        Span::styled(
            format!(" {} ", session.subject()),
            palette.badge(subject_color(session.subject())),
        ),
        Span::styled(format!("  {}", session.chapter()), palette.bold()),
        Span::styled(
            format!("   started {}", session.started_at().format("%H:%M")),
            palette.dim(),
        ),
    ]);
    Paragraph::new(header).render(chunks[0], buf);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(chunks[1]);
    let card_values = [
        ("Total Time", format_minutes_seconds(stats.total_time), palette.fg),
        ("Avg / Question", format!("{:.1}s", stats.avg_time), palette.fg),
        ("Accuracy", format!("{}%", stats.accuracy), Color::Green),
        ("Solved", stats.solved.to_string(), Color::Blue),
    ];
    for ((title, value, color), card) in card_values.into_iter().zip(cards.iter()) {
        Paragraph::new(Span::styled(
            value,
            palette.base().fg(color).add_modifier(Modifier::BOLD),
        ))
        .block(
            Block::bordered()
                .title(Span::styled(title, palette.dim()))
                .border_style(palette.border()),
        )
        .alignment(Alignment::Center)
        .render(*card, buf);
    }

    let series = chart_series(session.records());
    if series.is_empty() {
        Paragraph::new(Span::styled("No questions were recorded.", palette.dim()))
            .block(
                Block::bordered()
                    .title("Time per Question (Seconds)")
                    .border_style(palette.border()),
            )
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    } else {
        time_chart(&series, chunks[2].width, palette, "Time per Question (Seconds)")
            .render(chunks[2], buf);
    }

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[3]);
    render_breakdown(review, palette, bottom[0], buf);
    render_analysis(&review.analysis, palette, bottom[1], buf);

    Paragraph::new(Span::styled(
        "(a)i feedback / (n)ew session / ↑↓ scroll / (d) theme / (esc)ape",
        palette.dim().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[4], buf);
}

fn render_breakdown(review: &Review, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let lines: Vec<Line> = review
        .session()
        .records()
        .iter()
        .skip(review.scroll)
        .map(|r| {
            Line::from(vec![
                Span::styled(format!("Question {:<4}", r.question_number), palette.bold()),
                Span::styled(format!("{:>5}s  ", r.time_in_seconds), palette.dim()),
                Span::styled(
                    format!(" {} ", r.status),
                    Style::default()
                        .fg(status_color(Some(r.status)))
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();

    Paragraph::new(lines)
        .block(
            Block::bordered()
                .title("Detailed Breakdown")
                .border_style(palette.border()),
        )
        .render(area, buf);
}

fn render_analysis(analysis: &AnalysisState, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let body = match analysis {
        AnalysisState::Idle => Paragraph::new(Span::styled(
            "Press (a) to ask the AI coach about this session.",
            palette.dim().add_modifier(Modifier::ITALIC),
        )),
        AnalysisState::Pending { .. } => Paragraph::new(Span::styled(
            "Analyzing your session...",
            palette.base().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        )),
        AnalysisState::Ready(text) => Paragraph::new(text.as_str()).style(palette.base()),
    };

    body.wrap(Wrap { trim: false })
        .block(
            Block::bordered()
                .title("AI Insights")
                .border_style(palette.border()),
        )
        .render(area, buf);
}
