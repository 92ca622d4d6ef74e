use super::{AppState, RequestState, StatusLine};
use crate::events::DataEvent;

/// Pure state transition function for data events
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) {
    let Some(invoice) = state.invoice_state_mut() else {
        return;
    };

    match event {
        DataEvent::InvoiceSaved { message } => {
            invoice.request = RequestState::Done;
            invoice.status = Some(StatusLine::info(message));
            if invoice.reset_on_save {
                invoice.reset_form();
            }
        }

        DataEvent::InvoiceSaveFailed { error } => {
            invoice.request = RequestState::Error(error.clone());
            invoice.status = Some(StatusLine::error(format!(
                "Failed to save invoice: {error}"
            )));
        }

        DataEvent::PdfExported { path } => {
            invoice.request = RequestState::Done;
            invoice.status = Some(StatusLine::info(format!("Saved PDF to {}", path.display())));
        }

        DataEvent::PdfExportFailed { error } => {
            invoice.request = RequestState::Error(error.clone());
            invoice.status = Some(StatusLine::error(format!("Failed to export PDF: {error}")));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::state::{ItemRow, StatusKind};
    use invoice_api::models::Cents;
    use std::path::PathBuf;

    fn state_with_item() -> AppState {
        let mut state = AppState::new(&Settings::default());
        let invoice = state.invoice_state_mut().unwrap();
        invoice.items.push(ItemRow {
            id: 1,
            name: "Pen".to_string(),
            quantity: "2".to_string(),
            unit_price: "1.50".to_string(),
            total: Cents::new(300),
        });
        invoice.recalculate();
        state
    }

    #[test]
    fn save_success_resets_form_and_reports_message() {
        let mut state = state_with_item();
        reduce_data_event(
            &mut state,
            DataEvent::InvoiceSaved {
                message: "Invoice saved successfully".to_string(),
            },
        );

        let invoice = state.invoice_state().unwrap();
        assert_eq!(invoice.request, RequestState::Done);
        assert!(invoice.items.is_empty());
        let status = invoice.status.as_ref().unwrap();
        assert_eq!(status.kind, StatusKind::Info);
        assert_eq!(status.text, "Invoice saved successfully");
    }

    #[test]
    fn save_success_keeps_form_when_reset_disabled() {
        let mut state = state_with_item();
        state.invoice_state_mut().unwrap().reset_on_save = false;
        reduce_data_event(
            &mut state,
            DataEvent::InvoiceSaved {
                message: "ok".to_string(),
            },
        );

        let invoice = state.invoice_state().unwrap();
        assert_eq!(invoice.items.len(), 1);
        assert_eq!(invoice.summary.subtotal, Cents::new(300));
    }

    #[test]
    fn save_failure_preserves_entered_data() {
        let mut state = state_with_item();
        reduce_data_event(
            &mut state,
            DataEvent::InvoiceSaveFailed {
                error: "db down".to_string(),
            },
        );

        let invoice = state.invoice_state().unwrap();
        assert_eq!(invoice.request, RequestState::Error("db down".to_string()));
        assert_eq!(invoice.items.len(), 1);
        let status = invoice.status.as_ref().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("db down"));
    }

    #[test]
    fn pdf_export_reports_path() {
        let mut state = state_with_item();
        reduce_data_event(
            &mut state,
            DataEvent::PdfExported {
                path: PathBuf::from("/tmp/invoice_INV-1.pdf"),
            },
        );

        let invoice = state.invoice_state().unwrap();
        assert_eq!(invoice.request, RequestState::Done);
        assert!(invoice
            .status
            .as_ref()
            .unwrap()
            .text
            .contains("invoice_INV-1.pdf"));
        // Export never resets the form
        assert_eq!(invoice.items.len(), 1);
    }
}
