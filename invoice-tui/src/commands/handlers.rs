use crate::events::AppCommand;
use crate::input::{Key, KeyEvent};
use crate::state::*;
use crate::ui::screens::Screen;

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    // Priority 1: active input modes capture all keystrokes
    if let Screen::Invoice(invoice_state) = state.current_screen() {
        match invoice_state.input_mode {
            InputMode::ItemForm => return handle_item_form_keys(event),
            InputMode::HeaderForm => return handle_header_form_keys(event),
            InputMode::TaxRate => return handle_tax_rate_keys(event),
            InputMode::Normal => {}
        }
    }

    // Priority 2: help popup swallows everything except dismiss/quit
    if state.help_visible {
        return match key {
            Key::Char('?') | Key::Esc => Some(AppCommand::ToggleHelp),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    // Handle multi-key sequences
    if let Some(pending) = state.pending_key {
        let on_logs = matches!(state.current_screen(), Screen::Logs(_));
        return match (pending, key) {
            // 'g' followed by 'g' -> top of the table, or oldest logs
            ('g', Key::Char('g')) if on_logs => Some(AppCommand::ScrollLogsToTop),
            ('g', Key::Char('g')) => Some(AppCommand::NavigateToTop),
            // 'g' followed by 'l' -> go to logs
            ('g', Key::Char('l')) => Some(AppCommand::NavigateToLogs),
            // Any other key clears the pending key
            _ => Some(AppCommand::ClearPendingKey),
        };
    }

    match (state.current_screen(), key) {
        // Global help toggle
        (_, Key::Char('?')) => Some(AppCommand::ToggleHelp),

        // Global quit command
        (_, Key::Char('q')) => Some(AppCommand::Quit),

        // Multi-key sequence initiator: 'g' sets pending key
        (_, Key::Char('g')) => Some(AppCommand::SetPendingKey('g')),

        // Navigate to bottom: 'G' (Shift+g)
        (Screen::Logs(..), Key::Char('G')) => Some(AppCommand::ScrollLogsToBottom),
        (_, Key::Char('G')) => Some(AppCommand::NavigateToBottom),

        // Invoice screen
        (Screen::Invoice(..), Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (Screen::Invoice(..), Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (Screen::Invoice(..), Key::Char('n')) => Some(AppCommand::EnterItemForm),
        (Screen::Invoice(invoice_state), Key::Char('e')) => {
            invoice_state
                .selected_index()
                .map(|_| AppCommand::EditSelectedItem)
        }
        (Screen::Invoice(invoice_state), Key::Backspace | Key::Char('d')) => {
            invoice_state
                .selected_index()
                .map(|_| AppCommand::RemoveSelectedItem)
        }
        (Screen::Invoice(..), Key::Char('i')) => Some(AppCommand::EnterHeaderForm),
        (Screen::Invoice(..), Key::Char('t')) => Some(AppCommand::EnterTaxRateEdit),
        (Screen::Invoice(..), Key::Char('s')) => Some(AppCommand::SaveInvoice),
        (Screen::Invoice(..), Key::Char('p')) => Some(AppCommand::ExportPdfDirect),
        (Screen::Invoice(..), Key::Char('P')) => Some(AppCommand::ExportPdfByNumber),
        (Screen::Invoice(invoice_state), Key::Esc) => {
            invoice_state.status.as_ref().map(|_| AppCommand::ClearStatus)
        }

        // Logs screen
        (Screen::Logs(..), Key::Up | Key::Char('k')) => Some(AppCommand::ScrollLogsUp),
        (Screen::Logs(..), Key::Down | Key::Char('j')) => Some(AppCommand::ScrollLogsDown),
        (Screen::Logs(..), Key::PageUp) => Some(AppCommand::ScrollLogsPageUp),
        (Screen::Logs(..), Key::PageDown) => Some(AppCommand::ScrollLogsPageDown),
        (Screen::Logs(..), Key::Esc | Key::Left | Key::Char('h')) => {
            Some(AppCommand::NavigateBack)
        }

        // Ignore other keys
        _ => None,
    }
}

/// Handle keyboard input when editing a line item
fn handle_item_form_keys(event: KeyEvent) -> Option<AppCommand> {
    let key = event.key;

    // Ctrl+L to clear current field
    if event.modifiers.ctrl && matches!(key, Key::Char('l')) {
        return Some(AppCommand::ClearFormField);
    }

    match key {
        // Escape to cancel and close form
        Key::Esc => Some(AppCommand::ExitItemForm),

        // Tab / Shift+Tab to move between fields
        Key::Tab => Some(AppCommand::NavigateFormField { forward: true }),
        Key::BackTab => Some(AppCommand::NavigateFormField { forward: false }),

        // Enter to submit the row
        Key::Enter => Some(AppCommand::SubmitItemForm),

        Key::Backspace => Some(AppCommand::DeleteFormFieldChar),

        // Regular character input
        Key::Char(c) => Some(AppCommand::AppendFormFieldChar { c }),

        // Ignore other keys
        _ => None,
    }
}

/// Handle keyboard input when editing the invoice header
fn handle_header_form_keys(event: KeyEvent) -> Option<AppCommand> {
    let key = event.key;

    if event.modifiers.ctrl && matches!(key, Key::Char('l')) {
        return Some(AppCommand::ClearFormField);
    }

    match key {
        Key::Esc | Key::Enter => Some(AppCommand::ExitHeaderForm),
        Key::Tab | Key::Down => Some(AppCommand::NavigateFormField { forward: true }),
        Key::BackTab | Key::Up => Some(AppCommand::NavigateFormField { forward: false }),
        Key::Backspace => Some(AppCommand::DeleteFormFieldChar),
        Key::Char(c) => Some(AppCommand::AppendFormFieldChar { c }),
        _ => None,
    }
}

/// Handle keyboard input when editing the tax rate
fn handle_tax_rate_keys(event: KeyEvent) -> Option<AppCommand> {
    let key = event.key;

    if event.modifiers.ctrl && matches!(key, Key::Char('l')) {
        return Some(AppCommand::ClearFormField);
    }

    match key {
        Key::Esc | Key::Enter => Some(AppCommand::ExitTaxRateEdit),
        Key::Backspace => Some(AppCommand::DeleteFormFieldChar),
        // Only numeric input makes sense here
        Key::Char(c) if c.is_ascii_digit() || c == '.' => {
            Some(AppCommand::AppendFormFieldChar { c })
        }
        _ => None,
    }
}
