//! Bottom help bar shared by every screen.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

/// Render the key hints for the current mode, centered in a bordered bar
pub fn render_help_bar(f: &mut Frame, area: Rect, text: &str) {
    let bar = Paragraph::new(text)
        .style(theme::help_text_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(bar, area);
}
