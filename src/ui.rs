pub mod charting;
pub mod dashboard;
pub mod question;
pub mod setup;
pub mod stopwatch;
pub mod theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Widget},
};

use crate::app::{App, Stage};
use theme::Palette;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = Palette::for_theme(self.theme);
        Block::default().style(palette.base()).render(area, buf);

        match &self.stage {
            Stage::Setup(form) => setup::render(form, &palette, area, buf),
            Stage::Question(active) => question::render(active, &palette, area, buf),
            Stage::Dashboard(review) => dashboard::render(review, &palette, area, buf),
            Stage::Stopwatch(sw) => stopwatch::render(sw, self.theme, &palette, area, buf),
        }
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
pub(crate) fn buffer_text(buffer: &Buffer) -> String {
    buffer.content.iter().map(|c| c.symbol()).collect()
}
