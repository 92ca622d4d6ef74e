use crate::background::{submitter::Submitter, BackgroundTaskManager};
use crate::events::AppCommand;
use crate::state::*;
use crate::state::validators::{build_payload, validate_new_item};
use crate::ui::screens::Screen;
use invoice_api::models::InvoicePayload;
use throbber_widgets_tui::ThrobberState;

/// A server request produced by a command. Kept separate from the state
/// transition so tests can exercise every command without a network.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkAction {
    Save(Box<InvoicePayload>),
    ExportDirect {
        payload: Box<InvoicePayload>,
        invoice_number: String,
    },
    ExportByNumber {
        invoice_number: String,
    },
}

/// Execute a command: apply the state transition, then spawn a background
/// task for any resulting server request
pub fn execute_command(
    command: AppCommand,
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    submitter: &Submitter,
) {
    let Some(action) = apply_command(command, state) else {
        return;
    };

    match action {
        NetworkAction::Save(payload) => {
            let submitter = submitter.clone();
            let future = async move {
                submitter.save_invoice(*payload).await;
            };
            task_manager.spawn_request_task("save_invoice".to_string(), future);
        }

        NetworkAction::ExportDirect {
            payload,
            invoice_number,
        } => {
            let submitter = submitter.clone();
            let future = async move {
                submitter.export_pdf_direct(*payload, invoice_number).await;
            };
            task_manager.spawn_request_task("export_pdf".to_string(), future);
        }

        NetworkAction::ExportByNumber { invoice_number } => {
            let submitter = submitter.clone();
            let future = async move {
                submitter.export_pdf_by_number(invoice_number).await;
            };
            task_manager.spawn_request_task("export_pdf".to_string(), future);
        }
    }
}

/// Synchronous command execution for testing (no background tasks)
///
/// Applies the same state transitions as `execute_command` but discards the
/// resulting network action. Tests inject the corresponding DataEvents
/// directly instead.
pub fn execute_command_sync(command: AppCommand, state: &mut AppState) {
    let _ = apply_command(command, state);
}

/// Pure state transition for a command. Returns the server request to
/// spawn, if any.
fn apply_command(command: AppCommand, state: &mut AppState) -> Option<NetworkAction> {
    // Save whether we're setting a pending key (we don't want to clear it in that case)
    let is_setting_pending_key = matches!(command, AppCommand::SetPendingKey(_));
    let mut action = None;

    match command {
        AppCommand::SelectNext => {
            if let Screen::Invoice(invoice_state) = state.current_screen_mut() {
                invoice_state.select_next();
            }
        }

        AppCommand::SelectPrevious => {
            if let Screen::Invoice(invoice_state) = state.current_screen_mut() {
                invoice_state.select_prev();
            }
        }

        AppCommand::NavigateToTop => {
            if let Screen::Invoice(invoice_state) = state.current_screen_mut() {
                if !invoice_state.items.is_empty() {
                    invoice_state.select_index(0);
                }
            }
        }

        AppCommand::NavigateToBottom => {
            if let Screen::Invoice(invoice_state) = state.current_screen_mut() {
                if !invoice_state.items.is_empty() {
                    invoice_state.select_index(invoice_state.items.len() - 1);
                }
            }
        }

        AppCommand::NavigateBack => {
            state.navigate_back();
        }

        AppCommand::EnterItemForm => {
            if let Screen::Invoice(invoice_state) = state.current_screen_mut() {
                match invoice_state.edit_mode {
                    crate::config::EditMode::Staged => {
                        invoice_state.input_mode = InputMode::ItemForm;
                        invoice_state.item_form = Some(ItemFormState::new());
                    }
                    crate::config::EditMode::Inline => {
                        // Append an editable row immediately; every keystroke
                        // writes through to it
                        let id = invoice_state.allocate_row_id();
                        let row = ItemRow {
                            id,
                            name: String::new(),
                            quantity: "1".to_string(),
                            unit_price: "0".to_string(),
                            total: summary::line_total("1", "0"),
                        };
                        invoice_state.items.push(row);
                        invoice_state.select_index(invoice_state.items.len() - 1);
                        invoice_state.recalculate();

                        let form = invoice_state
                            .items
                            .last()
                            .map(ItemFormState::from_row)
                            .unwrap_or_default();
                        invoice_state.item_form = Some(form);
                        invoice_state.input_mode = InputMode::ItemForm;
                    }
                }
            }
        }

        AppCommand::EditSelectedItem => {
            if let Screen::Invoice(invoice_state) = state.current_screen_mut() {
                if let Some(idx) = invoice_state.selected_index() {
                    invoice_state.item_form = Some(ItemFormState::from_row(&invoice_state.items[idx]));
                    invoice_state.input_mode = InputMode::ItemForm;
                }
            }
        }

        AppCommand::ExitItemForm => {
            if let Screen::Invoice(invoice_state) = state.current_screen_mut() {
                close_item_form(invoice_state);
            }
        }

        AppCommand::SubmitItemForm => {
            if let Screen::Invoice(invoice_state) = state.current_screen_mut() {
                submit_item_form(invoice_state);
            }
        }

        AppCommand::RemoveSelectedItem => {
            if let Screen::Invoice(invoice_state) = state.current_screen_mut() {
                if let Some(idx) = invoice_state.selected_index() {
                    invoice_state.items.remove(idx);
                    if invoice_state.items.is_empty() {
                        invoice_state.table_state.borrow_mut().select(None);
                    } else {
                        invoice_state.select_index(idx.min(invoice_state.items.len() - 1));
                    }
                    invoice_state.recalculate();
                }
            }
        }

        AppCommand::NavigateFormField { forward } => {
            if let Screen::Invoice(invoice_state) = state.current_screen_mut() {
                match invoice_state.input_mode {
                    InputMode::ItemForm => {
                        if let Some(ref mut form) = invoice_state.item_form {
                            form.current_field = if forward {
                                form.current_field.next()
                            } else {
                                form.current_field.prev()
                            };
                        }
                    }
                    InputMode::HeaderForm => {
                        invoice_state.header_focus = if forward {
                            invoice_state.header_focus.next()
                        } else {
                            invoice_state.header_focus.prev()
                        };
                    }
                    _ => {}
                }
            }
        }

        AppCommand::AppendFormFieldChar { c } => {
            if let Screen::Invoice(invoice_state) = state.current_screen_mut() {
                edit_active_field(invoice_state, |buffer| buffer.push(c));
            }
        }

        AppCommand::DeleteFormFieldChar => {
            if let Screen::Invoice(invoice_state) = state.current_screen_mut() {
                edit_active_field(invoice_state, |buffer| {
                    buffer.pop();
                });
            }
        }

        AppCommand::ClearFormField => {
            if let Screen::Invoice(invoice_state) = state.current_screen_mut() {
                edit_active_field(invoice_state, |buffer| buffer.clear());
            }
        }

        AppCommand::EnterHeaderForm => {
            if let Screen::Invoice(invoice_state) = state.current_screen_mut() {
                invoice_state.input_mode = InputMode::HeaderForm;
            }
        }

        AppCommand::ExitHeaderForm => {
            if let Screen::Invoice(invoice_state) = state.current_screen_mut() {
                invoice_state.input_mode = InputMode::Normal;
            }
        }

        AppCommand::EnterTaxRateEdit => {
            if let Screen::Invoice(invoice_state) = state.current_screen_mut() {
                invoice_state.input_mode = InputMode::TaxRate;
            }
        }

        AppCommand::ExitTaxRateEdit => {
            if let Screen::Invoice(invoice_state) = state.current_screen_mut() {
                invoice_state.input_mode = InputMode::Normal;
                invoice_state.recalculate();
            }
        }

        AppCommand::SaveInvoice => {
            if let Some(invoice_state) = state.invoice_state_mut() {
                if request_in_flight(invoice_state) {
                    return None;
                }
                let payload = build_payload(invoice_state);
                tracing::info!(
                    invoice_number = %payload.header.invoice_number,
                    products = payload.products.len(),
                    "Submitting invoice"
                );
                invoice_state.request = RequestState::InFlight(ThrobberState::default());
                action = Some(NetworkAction::Save(Box::new(payload)));
            }
        }

        AppCommand::ExportPdfDirect => {
            if let Some(invoice_state) = state.invoice_state_mut() {
                if request_in_flight(invoice_state) {
                    return None;
                }
                let payload = build_payload(invoice_state);
                let invoice_number = payload.header.invoice_number.clone();
                tracing::info!(invoice_number = %invoice_number, "Exporting PDF from current form");
                invoice_state.request = RequestState::InFlight(ThrobberState::default());
                action = Some(NetworkAction::ExportDirect {
                    payload: Box::new(payload),
                    invoice_number,
                });
            }
        }

        AppCommand::ExportPdfByNumber => {
            if let Some(invoice_state) = state.invoice_state_mut() {
                if request_in_flight(invoice_state) {
                    return None;
                }
                let invoice_number = invoice_state.header.invoice_number.trim().to_string();
                if invoice_number.is_empty() {
                    invoice_state.status = Some(StatusLine::error(
                        "Enter an invoice number before exporting a saved invoice",
                    ));
                    return None;
                }
                tracing::info!(invoice_number = %invoice_number, "Exporting PDF of saved invoice");
                invoice_state.request = RequestState::InFlight(ThrobberState::default());
                action = Some(NetworkAction::ExportByNumber { invoice_number });
            }
        }

        AppCommand::ClearStatus => {
            if let Some(invoice_state) = state.invoice_state_mut() {
                invoice_state.status = None;
            }
        }

        AppCommand::NavigateToLogs => {
            if !matches!(state.current_screen(), Screen::Logs(_)) {
                state.navigate_to(Screen::Logs(LogsState::default()));
            }
        }

        AppCommand::ScrollLogsUp => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                // Scroll up means going back in time (increase offset)
                if logs_state.scroll_offset < logs_state.total_entries.saturating_sub(1) {
                    logs_state.scroll_offset += 1;
                }
            }
        }

        AppCommand::ScrollLogsDown => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                // Scroll down means going forward in time (decrease offset)
                logs_state.scroll_offset = logs_state.scroll_offset.saturating_sub(1);
            }
        }

        AppCommand::ScrollLogsPageUp => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                let page_size = 20;
                logs_state.scroll_offset = (logs_state.scroll_offset + page_size)
                    .min(logs_state.total_entries.saturating_sub(1));
            }
        }

        AppCommand::ScrollLogsPageDown => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                let page_size = 20;
                logs_state.scroll_offset = logs_state.scroll_offset.saturating_sub(page_size);
            }
        }

        AppCommand::ScrollLogsToTop => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = logs_state.total_entries.saturating_sub(1);
            }
        }

        AppCommand::ScrollLogsToBottom => {
            if let Screen::Logs(logs_state) = state.current_screen_mut() {
                logs_state.scroll_offset = 0;
            }
        }

        AppCommand::SetPendingKey(c) => {
            state.pending_key = Some(c);
        }

        AppCommand::ClearPendingKey => {
            state.pending_key = None;
        }

        AppCommand::ToggleHelp => {
            state.help_visible = !state.help_visible;
        }

        AppCommand::Quit => {
            state.should_quit = true;
        }
    }

    // Clear pending key after any command except SetPendingKey
    // This ensures multi-key sequences are properly reset after completion
    if !is_setting_pending_key && state.pending_key.is_some() {
        state.pending_key = None;
    }

    action
}

/// Refuse a new submission while one is still running
fn request_in_flight(invoice_state: &mut InvoiceState) -> bool {
    if matches!(invoice_state.request, RequestState::InFlight(_)) {
        invoice_state.status = Some(StatusLine::error(
            "A request is already in progress, please wait",
        ));
        true
    } else {
        false
    }
}

/// Apply an edit to the buffer the active input mode points at
fn edit_active_field(invoice_state: &mut InvoiceState, edit: impl FnOnce(&mut String)) {
    match invoice_state.input_mode {
        InputMode::ItemForm => {
            let Some(ref mut form) = invoice_state.item_form else {
                return;
            };
            edit(form.active_buffer_mut());
            form.validation_error = None;

            // Inline mode writes through to the table row on every edit
            if invoice_state.edit_mode == crate::config::EditMode::Inline {
                if let Some(row_id) = invoice_state.item_form.as_ref().and_then(|f| f.editing_row_id)
                {
                    write_form_to_row(invoice_state, row_id);
                    invoice_state.recalculate_row(row_id);
                }
            }
        }
        InputMode::HeaderForm => {
            let header = &mut invoice_state.header;
            let buffer = match invoice_state.header_focus {
                HeaderField::InvoiceNumber => &mut header.invoice_number,
                HeaderField::InvoiceDate => &mut header.invoice_date,
                HeaderField::DueDate => &mut header.due_date,
                HeaderField::CustomerName => &mut header.customer_name,
                HeaderField::CustomerAddress => &mut header.customer_address,
                HeaderField::CustomerPhone => &mut header.customer_phone,
                HeaderField::CustomerEmail => &mut header.customer_email,
            };
            edit(buffer);
        }
        InputMode::TaxRate => {
            edit(&mut invoice_state.tax_rate);
            invoice_state.recalculate();
        }
        InputMode::Normal => {}
    }
}

/// Copy the form buffers into the row they are editing
fn write_form_to_row(invoice_state: &mut InvoiceState, row_id: u64) {
    let Some(form) = invoice_state.item_form.clone() else {
        return;
    };
    if let Some(row) = invoice_state.items.iter_mut().find(|row| row.id == row_id) {
        row.name = form.name;
        row.quantity = form.quantity;
        row.unit_price = form.unit_price;
    }
}

fn close_item_form(invoice_state: &mut InvoiceState) {
    // An inline row abandoned without a product name is dropped
    if invoice_state.edit_mode == crate::config::EditMode::Inline {
        if let Some(row_id) = invoice_state.item_form.as_ref().and_then(|f| f.editing_row_id) {
            if let Some(idx) = invoice_state.items.iter().position(|row| row.id == row_id) {
                if invoice_state.items[idx].name.trim().is_empty() {
                    invoice_state.items.remove(idx);
                    if invoice_state.items.is_empty() {
                        invoice_state.table_state.borrow_mut().select(None);
                    } else {
                        invoice_state.select_index(idx.min(invoice_state.items.len() - 1));
                    }
                    invoice_state.recalculate();
                }
            }
        }
    }

    invoice_state.item_form = None;
    invoice_state.input_mode = InputMode::Normal;
}

fn submit_item_form(invoice_state: &mut InvoiceState) {
    // Inline edits are already in the table; Enter just closes the form
    if invoice_state.edit_mode == crate::config::EditMode::Inline {
        close_item_form(invoice_state);
        return;
    }

    let Some(form) = invoice_state.item_form.clone() else {
        return;
    };

    let item = match validate_new_item(&form) {
        Ok(item) => item,
        Err(message) => {
            if let Some(ref mut form) = invoice_state.item_form {
                form.validation_error = Some(message);
            }
            return;
        }
    };

    match form.editing_row_id {
        Some(row_id) => {
            // Update the existing row in place and close the form
            if let Some(row) = invoice_state.items.iter_mut().find(|row| row.id == row_id) {
                row.name = item.name;
                row.quantity = form.quantity.trim().to_string();
                row.unit_price = form.unit_price.trim().to_string();
            }
            invoice_state.recalculate_row(row_id);
            invoice_state.item_form = None;
            invoice_state.input_mode = InputMode::Normal;
        }
        None => {
            // Append a new row and keep the form open for the next item
            let id = invoice_state.allocate_row_id();
            let quantity = form.quantity.trim().to_string();
            let unit_price = form.unit_price.trim().to_string();
            let total = summary::line_total(&quantity, &unit_price);
            invoice_state.items.push(ItemRow {
                id,
                name: item.name,
                quantity,
                unit_price,
                total,
            });
            invoice_state.select_index(invoice_state.items.len() - 1);
            invoice_state.recalculate();

            invoice_state.item_form = Some(ItemFormState::new());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EditMode, Settings};
    use invoice_api::models::Cents;

    fn staged_state() -> AppState {
        AppState::new(&Settings::default())
    }

    fn inline_state() -> AppState {
        AppState::new(&Settings {
            edit_mode: EditMode::Inline,
            ..Default::default()
        })
    }

    fn type_chars(state: &mut AppState, text: &str) {
        for c in text.chars() {
            execute_command_sync(AppCommand::AppendFormFieldChar { c }, state);
        }
    }

    fn add_staged_item(state: &mut AppState, name: &str, quantity: &str, unit_price: &str) {
        execute_command_sync(AppCommand::EnterItemForm, state);
        type_chars(state, name);
        execute_command_sync(AppCommand::NavigateFormField { forward: true }, state);
        type_chars(state, quantity);
        execute_command_sync(AppCommand::NavigateFormField { forward: true }, state);
        type_chars(state, unit_price);
        execute_command_sync(AppCommand::SubmitItemForm, state);
    }

    #[test]
    fn staged_submit_appends_row_and_keeps_form_open() {
        let mut state = staged_state();
        add_staged_item(&mut state, "Pen", "2", "1.50");

        let invoice = state.invoice_state().unwrap();
        assert_eq!(invoice.items.len(), 1);
        assert_eq!(invoice.items[0].name, "Pen");
        assert_eq!(invoice.items[0].total, Cents::new(300));
        assert_eq!(invoice.summary.subtotal, Cents::new(300));

        // Form stays open with cleared buffers, focus back on the name
        let form = invoice.item_form.as_ref().unwrap();
        assert!(form.name.is_empty());
        assert_eq!(form.current_field, ItemField::Name);
        assert_eq!(invoice.input_mode, InputMode::ItemForm);
    }

    #[test]
    fn staged_submit_with_empty_name_is_rejected() {
        let mut state = staged_state();
        execute_command_sync(AppCommand::EnterItemForm, &mut state);
        execute_command_sync(AppCommand::NavigateFormField { forward: true }, &mut state);
        type_chars(&mut state, "2");
        execute_command_sync(AppCommand::SubmitItemForm, &mut state);

        let invoice = state.invoice_state().unwrap();
        assert!(invoice.items.is_empty());
        assert!(invoice
            .item_form
            .as_ref()
            .unwrap()
            .validation_error
            .is_some());
        assert_eq!(invoice.input_mode, InputMode::ItemForm);
    }

    #[test]
    fn edit_updates_row_and_closes_form() {
        let mut state = staged_state();
        add_staged_item(&mut state, "Pen", "2", "1.50");
        execute_command_sync(AppCommand::ExitItemForm, &mut state);

        execute_command_sync(AppCommand::EditSelectedItem, &mut state);
        // Move to quantity and change 2 -> 3
        execute_command_sync(AppCommand::NavigateFormField { forward: true }, &mut state);
        execute_command_sync(AppCommand::ClearFormField, &mut state);
        type_chars(&mut state, "3");
        execute_command_sync(AppCommand::SubmitItemForm, &mut state);

        let invoice = state.invoice_state().unwrap();
        assert_eq!(invoice.items.len(), 1);
        assert_eq!(invoice.items[0].total, Cents::new(450));
        assert_eq!(invoice.summary.subtotal, Cents::new(450));
        assert_eq!(invoice.input_mode, InputMode::Normal);
        assert!(invoice.item_form.is_none());
    }

    #[test]
    fn remove_selected_item_updates_summary() {
        let mut state = staged_state();
        add_staged_item(&mut state, "Pen", "2", "1.50");
        add_staged_item(&mut state, "Book", "1", "9.99");
        execute_command_sync(AppCommand::ExitItemForm, &mut state);
        assert_eq!(
            state.invoice_state().unwrap().summary.subtotal,
            Cents::new(1299)
        );

        execute_command_sync(AppCommand::NavigateToTop, &mut state);
        execute_command_sync(AppCommand::RemoveSelectedItem, &mut state);

        let invoice = state.invoice_state().unwrap();
        assert_eq!(invoice.items.len(), 1);
        assert_eq!(invoice.items[0].name, "Book");
        assert_eq!(invoice.summary.subtotal, Cents::new(999));
        assert_eq!(invoice.summary.grand_total, Cents::new(1079));
    }

    #[test]
    fn inline_edits_write_through_on_every_keystroke() {
        let mut state = inline_state();
        execute_command_sync(AppCommand::EnterItemForm, &mut state);

        let invoice = state.invoice_state().unwrap();
        assert_eq!(invoice.items.len(), 1);
        assert_eq!(invoice.items[0].quantity, "1");

        type_chars(&mut state, "Pen");
        execute_command_sync(AppCommand::NavigateFormField { forward: true }, &mut state);
        execute_command_sync(AppCommand::ClearFormField, &mut state);
        type_chars(&mut state, "2");
        execute_command_sync(AppCommand::NavigateFormField { forward: true }, &mut state);
        execute_command_sync(AppCommand::ClearFormField, &mut state);
        type_chars(&mut state, "1.50");

        // Totals already reflect the row before the form is closed
        let invoice = state.invoice_state().unwrap();
        assert_eq!(invoice.items[0].name, "Pen");
        assert_eq!(invoice.items[0].total, Cents::new(300));
        assert_eq!(invoice.summary.subtotal, Cents::new(300));

        execute_command_sync(AppCommand::SubmitItemForm, &mut state);
        assert_eq!(
            state.invoice_state().unwrap().input_mode,
            InputMode::Normal
        );
    }

    #[test]
    fn inline_row_with_partial_input_contributes_zero() {
        let mut state = inline_state();
        execute_command_sync(AppCommand::EnterItemForm, &mut state);
        type_chars(&mut state, "Pen");
        execute_command_sync(AppCommand::NavigateFormField { forward: true }, &mut state);
        execute_command_sync(AppCommand::ClearFormField, &mut state);
        type_chars(&mut state, "2x"); // not a number

        let invoice = state.invoice_state().unwrap();
        assert_eq!(invoice.items[0].total, Cents::new(0));
        assert_eq!(invoice.summary.subtotal, Cents::new(0));
    }

    #[test]
    fn inline_row_without_name_is_dropped_on_escape() {
        let mut state = inline_state();
        execute_command_sync(AppCommand::EnterItemForm, &mut state);
        execute_command_sync(AppCommand::ExitItemForm, &mut state);

        assert!(state.invoice_state().unwrap().items.is_empty());
    }

    #[test]
    fn tax_rate_edit_recalculates_immediately() {
        let mut state = staged_state();
        add_staged_item(&mut state, "Book", "1", "9.99");
        execute_command_sync(AppCommand::ExitItemForm, &mut state);

        execute_command_sync(AppCommand::EnterTaxRateEdit, &mut state);
        execute_command_sync(AppCommand::ClearFormField, &mut state);
        type_chars(&mut state, "10");

        let invoice = state.invoice_state().unwrap();
        assert_eq!(invoice.summary.tax_amount, Cents::new(100));
        assert_eq!(invoice.summary.grand_total, Cents::new(1099));

        execute_command_sync(AppCommand::ExitTaxRateEdit, &mut state);
        assert_eq!(
            state.invoice_state().unwrap().input_mode,
            InputMode::Normal
        );
    }

    #[test]
    fn header_form_edits_focused_field() {
        let mut state = staged_state();
        execute_command_sync(AppCommand::EnterHeaderForm, &mut state);
        type_chars(&mut state, "INV-7");
        execute_command_sync(AppCommand::NavigateFormField { forward: true }, &mut state);
        type_chars(&mut state, "2025-01-15");
        execute_command_sync(AppCommand::ExitHeaderForm, &mut state);

        let invoice = state.invoice_state().unwrap();
        assert_eq!(invoice.header.invoice_number, "INV-7");
        assert_eq!(invoice.header.invoice_date, "2025-01-15");
    }

    #[test]
    fn save_sets_request_in_flight() {
        let mut state = staged_state();
        add_staged_item(&mut state, "Pen", "2", "1.50");
        execute_command_sync(AppCommand::ExitItemForm, &mut state);

        let action = apply_command(AppCommand::SaveInvoice, &mut state);
        assert!(matches!(action, Some(NetworkAction::Save(_))));
        assert!(matches!(
            state.invoice_state().unwrap().request,
            RequestState::InFlight(_)
        ));
    }

    #[test]
    fn save_is_refused_while_request_in_flight() {
        let mut state = staged_state();
        let first = apply_command(AppCommand::SaveInvoice, &mut state);
        assert!(first.is_some());

        let second = apply_command(AppCommand::SaveInvoice, &mut state);
        assert!(second.is_none());
        let status = state.invoice_state().unwrap().status.as_ref().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
    }

    #[test]
    fn export_by_number_requires_invoice_number() {
        let mut state = staged_state();
        let action = apply_command(AppCommand::ExportPdfByNumber, &mut state);
        assert!(action.is_none());

        let invoice = state.invoice_state().unwrap();
        assert_eq!(invoice.request, RequestState::Idle);
        assert_eq!(
            invoice.status.as_ref().unwrap().kind,
            StatusKind::Error
        );
    }

    #[test]
    fn export_by_number_trims_invoice_number() {
        let mut state = staged_state();
        state.invoice_state_mut().unwrap().header.invoice_number = "  INV-9  ".to_string();

        let action = apply_command(AppCommand::ExportPdfByNumber, &mut state);
        assert_eq!(
            action,
            Some(NetworkAction::ExportByNumber {
                invoice_number: "INV-9".to_string()
            })
        );
    }

    #[test]
    fn network_outcome_applies_while_on_logs_screen() {
        let mut state = staged_state();
        add_staged_item(&mut state, "Pen", "2", "1.50");
        execute_command_sync(AppCommand::ExitItemForm, &mut state);
        apply_command(AppCommand::SaveInvoice, &mut state);

        execute_command_sync(AppCommand::NavigateToLogs, &mut state);
        crate::state::reducer::reduce_data_event(
            &mut state,
            crate::events::DataEvent::InvoiceSaved {
                message: "ok".to_string(),
            },
        );

        assert!(matches!(state.current_screen(), Screen::Logs(_)));
        let invoice = state.invoice_state().unwrap();
        assert_eq!(invoice.request, RequestState::Done);
        assert!(invoice.items.is_empty());
    }

    #[test]
    fn pending_key_is_cleared_after_other_commands() {
        let mut state = staged_state();
        execute_command_sync(AppCommand::SetPendingKey('g'), &mut state);
        assert_eq!(state.pending_key, Some('g'));

        execute_command_sync(AppCommand::SelectNext, &mut state);
        assert_eq!(state.pending_key, None);
    }
}
