use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};

use crate::state::RequestState;

/// Render a request indicator in the top-right corner
/// Shows the current request state with color coding
pub fn render_loading_indicator(f: &mut Frame, area: Rect, request_state: &RequestState) {
    let (text, color) = match &request_state {
        RequestState::Idle => return, // Don't show anything
        RequestState::InFlight(throbber_state) => {
            let simple = throbber_widgets_tui::Throbber::default()
                .throbber_set(throbber_widgets_tui::BRAILLE_EIGHT);
            f.render_stateful_widget(simple, area, &mut throbber_state.clone());
            return;
        }
        RequestState::Done => ("✓", Color::Green),
        RequestState::Error(_) => ("x", Color::Red),
    };

    let indicator =
        Paragraph::new(Span::styled(text, Style::default().fg(color))).alignment(Alignment::Right);

    f.render_widget(indicator, area);
}
