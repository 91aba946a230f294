use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use super::centered;
use super::theme::{subject_color, Palette};
use crate::session::Subject;
use crate::setup::SetupForm;

const PLACEHOLDER: &str = "e.g. Thermodynamics";

pub fn render(form: &SetupForm, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let panel = centered(area, 60, 14);
    let block = Block::bordered()
        .title(" New Study Session ")
        .title_alignment(Alignment::Center)
        .border_style(palette.border())
        .style(palette.base());
    let inner = block.inner(panel);
    block.render(panel, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(2)
        .constraints([
            Constraint::Length(1), // padding
            Constraint::Length(1), // subject label
            Constraint::Length(1), // subject picker
            Constraint::Length(1), // padding
            Constraint::Length(1), // chapter label
            Constraint::Length(3), // chapter input
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(inner);

    Paragraph::new(Span::styled("Subject", palette.bold())).render(chunks[1], buf);

    let picker: Vec<Span> = Subject::ALL
        .iter()
        .flat_map(|&s| {
            let label = format!(" {s} ");
            let style = if s == form.subject {
                palette.badge(subject_color(s))
            } else {
                palette.dim()
            };
            [Span::styled(label, style), Span::raw("  ")]
        })
        .collect();
    Paragraph::new(Line::from(picker))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    Paragraph::new(Span::styled("Chapter / Topic", palette.bold())).render(chunks[4], buf);

    let input = if form.chapter.is_empty() {
        Span::styled(PLACEHOLDER, palette.dim().add_modifier(Modifier::ITALIC))
    } else {
        Span::styled(form.chapter.as_str(), palette.base())
    };
    let input_block = Block::bordered().border_style(palette.border());
    let input_inner = input_block.inner(chunks[5]);
    Paragraph::new(input).block(input_block).render(chunks[5], buf);

    let cursor_x = input_inner.x + form.chapter_width() as u16;
    if cursor_x < input_inner.right() {
        if let Some(cell) = buf.cell_mut((cursor_x, input_inner.y)) {
            cell.set_style(Style::default().add_modifier(Modifier::REVERSED));
        }
    }

    let start_style = if form.can_submit() {
        palette.bold()
    } else {
        palette.dim()
    };
    let legend = Line::from(vec![
        Span::styled("(enter) Start Timer", start_style),
        Span::styled("   (tab) subject   (esc)ape", palette.dim()),
    ]);
    Paragraph::new(legend)
        .alignment(Alignment::Center)
        .render(chunks[7], buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Theme;
    use crate::ui::buffer_text;

    fn draw(form: &SetupForm) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        render(form, &Palette::for_theme(Theme::Light), area, &mut buffer);
        buffer_text(&buffer)
    }

    #[test]
    fn shows_subjects_and_placeholder() {
        let text = draw(&SetupForm::default());
        assert!(text.contains("New Study Session"));
        assert!(text.contains("Physics"));
        assert!(text.contains("Chemistry"));
        assert!(text.contains("Mathematics"));
        assert!(text.contains(PLACEHOLDER));
    }

    #[test]
    fn shows_typed_chapter() {
        let text = draw(&SetupForm::new(Subject::Chemistry).with_chapter("Ionic Equilibrium"));
        assert!(text.contains("Ionic Equilibrium"));
        assert!(!text.contains(PLACEHOLDER));
    }

    #[test]
    fn survives_tiny_terminal() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        render(&SetupForm::default(), &Palette::for_theme(Theme::Dark), area, &mut buffer);
    }
}
