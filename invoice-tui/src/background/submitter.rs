use crate::events::DataEvent;
use invoice_api::models::InvoicePayload;
use invoice_api::Client;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs server requests off the UI task and reports outcomes as DataEvents
#[derive(Clone)]
pub struct Submitter {
    pub api_client: Arc<Client>,
    pub download_dir: PathBuf,
    pub data_tx: mpsc::UnboundedSender<DataEvent>,
}

impl Submitter {
    pub fn new(
        api_client: Arc<Client>,
        download_dir: PathBuf,
        data_tx: mpsc::UnboundedSender<DataEvent>,
    ) -> Self {
        Self {
            api_client,
            download_dir,
            data_tx,
        }
    }

    pub async fn save_invoice(&self, payload: InvoicePayload) {
        match self.api_client.save_invoice(&payload).await {
            Ok(response) => {
                tracing::info!("Invoice saved: {}", response.message);
                let _ = self.data_tx.send(DataEvent::InvoiceSaved {
                    message: response.message,
                });
            }
            Err(e) => {
                tracing::error!("Failed to save invoice: {}", e);
                let _ = self.data_tx.send(DataEvent::InvoiceSaveFailed {
                    error: e.to_string(),
                });
            }
        }
    }

    pub async fn export_pdf_direct(&self, payload: InvoicePayload, invoice_number: String) {
        match self.api_client.export_pdf_direct(&payload).await {
            Ok(bytes) => self.write_pdf(&invoice_number, bytes).await,
            Err(e) => {
                tracing::error!("Failed to export PDF: {}", e);
                let _ = self.data_tx.send(DataEvent::PdfExportFailed {
                    error: e.to_string(),
                });
            }
        }
    }

    pub async fn export_pdf_by_number(&self, invoice_number: String) {
        match self.api_client.export_pdf(&invoice_number).await {
            Ok(bytes) => self.write_pdf(&invoice_number, bytes).await,
            Err(e) => {
                tracing::error!("Failed to export PDF for invoice {}: {}", invoice_number, e);
                let _ = self.data_tx.send(DataEvent::PdfExportFailed {
                    error: e.to_string(),
                });
            }
        }
    }

    async fn write_pdf(&self, invoice_number: &str, bytes: Vec<u8>) {
        let path = self.download_dir.join(pdf_filename(invoice_number));
        tracing::info!("Writing {} byte PDF to {}", bytes.len(), path.display());

        match write_file(&self.download_dir, &path, &bytes).await {
            Ok(()) => {
                let _ = self.data_tx.send(DataEvent::PdfExported { path });
            }
            Err(e) => {
                tracing::error!("Failed to write PDF to {}: {}", path.display(), e);
                let _ = self.data_tx.send(DataEvent::PdfExportFailed {
                    error: e.to_string(),
                });
            }
        }
    }
}

async fn write_file(dir: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(path, bytes).await
}

/// Exported PDFs are named after the invoice number, regardless of which
/// endpoint produced them
pub fn pdf_filename(invoice_number: &str) -> String {
    let trimmed = invoice_number.trim();
    if trimmed.is_empty() {
        "invoice_draft.pdf".to_string()
    } else {
        format!("invoice_{}.pdf", trimmed)
    }
}
