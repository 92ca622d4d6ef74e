use ratatui::{
    prelude::*,
    widgets::{List, ListItem},
    Frame,
};

use crate::state::InputMode;
use crate::ui::{layouts, screens::Screen, theme};

pub fn render_help_popup(f: &mut Frame, screen: &Screen) {
    let help_items = get_help_items(screen);

    // Use shared popup frame
    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::LARGE,
        " Help (press ? or Esc to close) ",
        theme::accent_border_style(),
    );

    // Create the help list
    let items: Vec<ListItem> = help_items
        .iter()
        .map(|(key, description)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:15}", key), theme::header_style()),
                Span::raw(*description),
            ]))
        })
        .collect();

    let list = List::new(items).style(Style::default().fg(Color::White));

    f.render_widget(list, inner);
}

fn get_help_items(screen: &Screen) -> Vec<(&'static str, &'static str)> {
    let mut items = vec![];

    // Screen-specific help
    match screen {
        Screen::Invoice(state) => {
            items.push(("↑/k", "Move selection up"));
            items.push(("↓/j", "Move selection down"));
            items.push(("n", "Add a new line item"));
            items.push(("e", "Edit selected item"));
            items.push(("d/Backspace", "Remove selected item"));
            items.push(("i", "Edit invoice details"));
            items.push(("t", "Edit tax rate"));
            if state.input_mode == InputMode::ItemForm {
                items.push(("Tab/Shift+Tab", "Move between form fields"));
                items.push(("Enter", "Add the item"));
                items.push(("Ctrl+L", "Clear current field"));
                items.push(("Esc", "Close the form"));
            }
            items.push(("s", "Save invoice to server"));
            items.push(("p", "Export PDF of current form"));
            items.push(("P", "Export PDF of saved invoice"));
            items.push(("Esc", "Dismiss status message"));
        }
        Screen::Logs(..) => {
            items.push(("↑/k", "Scroll up (older logs)"));
            items.push(("↓/j", "Scroll down (newer logs)"));
            items.push(("Page Up", "Scroll up one page"));
            items.push(("Page Down", "Scroll down one page"));
            items.push(("g then g", "Scroll to oldest logs"));
            items.push(("G", "Scroll to newest logs"));
            items.push(("h/←/Esc", "Back to invoice"));
        }
    }

    // Global help
    items.push(("", ""));
    items.push(("--- Global ---", ""));
    items.push(("g then l", "Go to logs"));
    items.push(("g then g", "Navigate to top of list"));
    items.push(("G", "Navigate to bottom of list"));
    items.push(("?", "Toggle this help"));
    items.push(("q", "Quit application"));

    items
}
