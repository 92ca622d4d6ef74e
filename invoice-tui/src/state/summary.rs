//! Invoice totals, recomputed whenever a line item or the tax rate changes.
//!
//! Parsing is fail-soft: a row whose quantity or unit price does not parse
//! contributes zero, and an unparseable tax rate is treated as 0%. Totals
//! therefore always reflect the current inputs, never a stale error state.

use crate::state::ItemRow;
use crate::utils::math::parse_amount;
use invoice_api::models::Cents;

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub subtotal: Cents,
    pub tax_amount: Cents,
    pub grand_total: Cents,
}

/// Compute a row total from the raw input buffers.
///
/// Both fields accept math expressions. The product is formed in major
/// units and converted to cents once, so the total is quantity times unit
/// price rounded to the nearest cent. If either field fails to parse the
/// row total is zero.
pub fn line_total(quantity: &str, unit_price: &str) -> Cents {
    match (parse_amount(quantity), parse_amount(unit_price)) {
        (Some(qty), Some(price)) => Cents::from_major_units(qty * price),
        _ => Cents::new(0),
    }
}

/// Recompute the summary from the stored row totals and the tax-rate input.
///
/// Row totals are summed as stored, so this must run after any row total
/// has been updated. Tax is applied to the subtotal and rounded to the
/// nearest cent.
pub fn recalculate_summary(items: &[ItemRow], tax_rate: &str) -> Summary {
    let subtotal: Cents = items.iter().map(|row| row.total).sum();
    let rate = tax_rate.trim().parse::<f64>().unwrap_or(0.0);
    let tax_amount = subtotal.scale(rate / 100.0);
    Summary {
        subtotal,
        tax_amount,
        grand_total: subtotal + tax_amount,
    }
}
