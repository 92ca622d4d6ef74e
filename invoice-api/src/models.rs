//! Wire types for the invoice server.
//!
//! Field names follow the server's JSON contract (camelCase). Monetary
//! amounts are handled as integer cents on our side and serialized as
//! plain JSON numbers in major units, which is what the server expects.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;
use std::iter::Sum;
use std::ops::Add;

/// A monetary amount in integer cents.
///
/// All arithmetic happens on the integer representation so repeated
/// summation cannot drift. Conversions from fractional input round half
/// away from zero to the nearest cent.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cents(i64);

impl Cents {
    pub fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Convert a major-unit amount (e.g. `12.99`) to cents.
    pub fn from_major_units(amount: f64) -> Self {
        Self(round_half_away(amount * 100.0))
    }

    pub fn inner(&self) -> i64 {
        self.0
    }

    pub fn as_major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Multiply by a fractional factor, rounding to the nearest cent.
    /// Used for tax-rate application.
    pub fn scale(&self, factor: f64) -> Self {
        Self(round_half_away(self.0 as f64 * factor))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Round to the nearest integer, halves away from zero.
///
/// Decimal amounts like 1.005 have no exact f64 form and can sit a few
/// ulps below the true half, where a bare `.round()` would go the wrong
/// way. A nudge far larger than that error but far smaller than any real
/// cent difference restores the decimal result.
fn round_half_away(value: f64) -> i64 {
    let nudge = 1e-9_f64.max(value.abs() * 1e-12);
    (value + nudge.copysign(value)).round() as i64
}

impl Add for Cents {
    type Output = Cents;

    fn add(self, rhs: Cents) -> Cents {
        Cents(self.0 + rhs.0)
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Cents>>(iter: I) -> Self {
        Cents(iter.map(|c| c.0).sum())
    }
}

impl From<i64> for Cents {
    fn from(cents: i64) -> Self {
        Cents(cents)
    }
}

impl Display for Cents {
    /// Always two decimals: `1299` renders as `12.99`, `-50` as `-0.50`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Cents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_major_units())
    }
}

impl<'de> Deserialize<'de> for Cents {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Ok(Cents::from_major_units(amount))
    }
}

/// One product line on the invoice. `total_product` is derived from
/// quantity × unit price and never edited independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_name: String,
    pub quantity: f64,
    pub unit_price: Cents,
    pub total_product: Cents,
}

/// Free-form invoice header fields, passed through verbatim. No cross-field
/// invariants; the server treats them as opaque strings.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceHeader {
    pub invoice_number: String,
    pub invoice_date: String,
    pub due_date: String,
    pub customer_name: String,
    pub customer_address: String,
    pub customer_phone: String,
    pub customer_email: String,
}

/// The full request body for `/save_invoice` and `/export_pdf_direct`.
///
/// Header fields are flattened to the top level and the summary is sent as
/// `subtotal`/`taxRate`/`grandTotal`; the tax amount itself is not a wire
/// field (the server derives it from the other two).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePayload {
    #[serde(flatten)]
    pub header: InvoiceHeader,
    pub products: Vec<LineItem>,
    pub subtotal: Cents,
    pub tax_rate: f64,
    pub grand_total: Cents,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveInvoiceResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_from_major_units_rounds_to_nearest() {
        assert_eq!(Cents::from_major_units(12.99).inner(), 1299);
        assert_eq!(Cents::from_major_units(-0.5).inner(), -50);
        assert_eq!(Cents::from_major_units(0.0).inner(), 0);
    }

    #[test]
    fn cents_from_major_units_rounds_halves_away_from_zero() {
        // 1.005 and 2.675 are the classic cases where the nearest f64 sits
        // just below the decimal half
        assert_eq!(Cents::from_major_units(1.005).inner(), 101);
        assert_eq!(Cents::from_major_units(2.675).inner(), 268);
        assert_eq!(Cents::from_major_units(-1.005).inner(), -101);
    }

    #[test]
    fn cents_scale_rounds_to_nearest_cent() {
        // 12.99 at 8% tax -> 1.0392 -> 1.04
        assert_eq!(Cents::new(1299).scale(0.08).inner(), 104);
        // 1.50 * 2
        assert_eq!(Cents::new(150).scale(2.0).inner(), 300);
        // 1.50 at 7% -> 0.105 -> 0.11
        assert_eq!(Cents::new(150).scale(0.07).inner(), 11);
    }

    #[test]
    fn cents_display_always_two_decimals() {
        assert_eq!(Cents::new(1299).to_string(), "12.99");
        assert_eq!(Cents::new(300).to_string(), "3.00");
        assert_eq!(Cents::new(5).to_string(), "0.05");
        assert_eq!(Cents::new(-50).to_string(), "-0.50");
        assert_eq!(Cents::new(0).to_string(), "0.00");
    }

    #[test]
    fn cents_sum_is_exact() {
        // 0.10 summed 100 times is exactly 10.00 in cents, where f64
        // accumulation would drift.
        let total: Cents = std::iter::repeat(Cents::new(10)).take(100).sum();
        assert_eq!(total, Cents::new(1000));
    }

    #[test]
    fn payload_serializes_with_wire_field_names() {
        let payload = InvoicePayload {
            header: InvoiceHeader {
                invoice_number: "INV-001".to_string(),
                invoice_date: "2025-01-15".to_string(),
                due_date: "2025-02-15".to_string(),
                customer_name: "Acme".to_string(),
                customer_address: "1 Main St".to_string(),
                customer_phone: "555-0100".to_string(),
                customer_email: "billing@acme.test".to_string(),
            },
            products: vec![LineItem {
                product_name: "Pen".to_string(),
                quantity: 2.0,
                unit_price: Cents::new(150),
                total_product: Cents::new(300),
            }],
            subtotal: Cents::new(300),
            tax_rate: 8.0,
            grand_total: Cents::new(324),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["invoiceNumber"], "INV-001");
        assert_eq!(json["customerEmail"], "billing@acme.test");
        assert_eq!(json["products"][0]["productName"], "Pen");
        assert_eq!(json["products"][0]["unitPrice"], 1.5);
        assert_eq!(json["products"][0]["totalProduct"], 3.0);
        assert_eq!(json["subtotal"], 3.0);
        assert_eq!(json["taxRate"], 8.0);
        assert_eq!(json["grandTotal"], 3.24);
    }

    #[test]
    fn payload_round_trips() {
        let payload = InvoicePayload {
            header: InvoiceHeader::default(),
            products: vec![],
            subtotal: Cents::new(0),
            tax_rate: 0.0,
            grand_total: Cents::new(0),
        };
        let json = serde_json::to_string(&payload).unwrap();
        let back: InvoicePayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn error_response_parses_server_body() {
        let body = r#"{"error": "db down"}"#;
        let parsed: ErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error, "db down");
    }
}
