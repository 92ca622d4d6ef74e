mod error;
pub mod models;

pub use crate::error::InvoiceApiError;
use crate::models::{ErrorResponse, InvoicePayload, SaveInvoiceResponse};

/// HTTP client for the invoice server.
///
/// The server exposes three endpoints: saving an assembled invoice,
/// fetching a previously saved invoice's PDF by number, and generating a
/// PDF directly from an unsaved payload. Every call is a single attempt;
/// failures are surfaced to the caller, never retried here.
pub struct Client {
    inner: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Persist an invoice on the server. Returns the server's confirmation
    /// message on success.
    pub async fn save_invoice(
        &self,
        payload: &InvoicePayload,
    ) -> Result<SaveInvoiceResponse, InvoiceApiError> {
        let url = format!("{}/save_invoice", self.base_url);
        let response = self.inner.post(&url).json(payload).send().await?;

        let response = Self::check_status(response).await?;
        Ok(response.json::<SaveInvoiceResponse>().await?)
    }

    /// Fetch the PDF for a previously saved invoice, identified by its
    /// invoice number. Returns the raw PDF bytes.
    pub async fn export_pdf(&self, invoice_number: &str) -> Result<Vec<u8>, InvoiceApiError> {
        let url = format!("{}/export_pdf/{}", self.base_url, invoice_number);
        let response = self.inner.get(&url).send().await?;

        let response = Self::check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Generate a PDF from the given payload without saving it first.
    /// Returns the raw PDF bytes.
    pub async fn export_pdf_direct(
        &self,
        payload: &InvoicePayload,
    ) -> Result<Vec<u8>, InvoiceApiError> {
        let url = format!("{}/export_pdf_direct", self.base_url);
        let response = self.inner.post(&url).json(payload).send().await?;

        let response = Self::check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Convert a non-2xx response into a structured server error, keeping
    /// the server's message verbatim.
    async fn check_status(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, InvoiceApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(parsed) => parsed.error,
            // Server didn't return the structured {error} shape; fall back
            // to the raw body so the user still sees something actionable.
            Err(_) if !body.is_empty() => body,
            Err(_) => status.to_string(),
        };

        Err(InvoiceApiError::Server { status, message })
    }
}
