use reqwest::StatusCode;

/// Error returned by the invoice server client.
///
/// `Server` carries the message from the server's `{error}` body verbatim;
/// `Transport` covers everything below that (connection refused, DNS, bad
/// response bodies). Callers display both the same way.
#[derive(Debug, thiserror::Error)]
pub enum InvoiceApiError {
    #[error("({status}) {message}")]
    Server { status: StatusCode, message: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
