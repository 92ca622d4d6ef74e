use crate::state::{InvoiceState, ItemFormState};
use crate::utils::math::parse_amount;
use invoice_api::models::{Cents, InvoicePayload, LineItem};

/// A validated line item ready to be appended to the table
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub quantity: f64,
    pub unit_price: Cents,
}

/// Validate the staged item form. Returns the parsed item or a message for
/// the form's validation line.
pub fn validate_new_item(form: &ItemFormState) -> Result<NewItem, String> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err("Product name is required".to_string());
    }

    let quantity = parse_amount(&form.quantity)
        .ok_or_else(|| format!("Invalid quantity: {}", form.quantity))?;
    if quantity <= 0.0 {
        return Err("Quantity must be greater than zero".to_string());
    }

    let unit_price = parse_amount(&form.unit_price)
        .ok_or_else(|| format!("Invalid unit price: {}", form.unit_price))?;
    if unit_price < 0.0 {
        return Err("Unit price cannot be negative".to_string());
    }

    Ok(NewItem {
        name: name.to_string(),
        quantity,
        unit_price: Cents::from_major_units(unit_price),
    })
}

/// Build the request body from the current invoice state.
///
/// Header fields pass through verbatim. Rows whose buffers do not parse are
/// sent with quantity and unit price 0, matching their zero row total. The
/// summary is the last computed one, which by then reflects every row.
pub fn build_payload(state: &InvoiceState) -> InvoicePayload {
    let products = state
        .items
        .iter()
        .map(|row| LineItem {
            product_name: row.name.clone(),
            quantity: parse_amount(&row.quantity).unwrap_or(0.0),
            unit_price: parse_amount(&row.unit_price)
                .map(Cents::from_major_units)
                .unwrap_or_default(),
            total_product: row.total,
        })
        .collect();

    InvoicePayload {
        header: state.header.clone(),
        products,
        subtotal: state.summary.subtotal,
        tax_rate: state.tax_rate.trim().parse().unwrap_or(0.0),
        grand_total: state.summary.grand_total,
    }
}
