//! Receipt
//!
//! Text rendering of a priced cart, laid out like the checkout summary.

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    basket::Cart,
    items::{CartLine, CartLineError},
    pricing::OrderPricing,
};

/// Errors that can occur when rendering a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error calculating a line total.
    #[error(transparent)]
    Line(#[from] CartLineError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Write the cart lines and the pricing summary.
///
/// # Errors
///
/// Returns an error if a total cannot be calculated or the output cannot be written.
pub fn write_receipt(
    mut out: impl io::Write,
    cart: &Cart<'_>,
    pricing: &OrderPricing<'_>,
) -> Result<(), ReceiptError> {
    if cart.is_empty() {
        return writeln!(out, "\n Your cart is empty\n").map_err(|_err| ReceiptError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Qty", "Unit Price", "Was", "Line Total"]);

    for (idx, line) in cart.iter().enumerate() {
        builder.push_record(line_cells(idx, line)?);
    }

    write_lines_table(&mut out, builder)?;
    write_summary(&mut out, pricing)
}

fn line_cells(idx: usize, line: &CartLine<'_>) -> Result<[String; 6], ReceiptError> {
    let was = line
        .original_price()
        .map(ToString::to_string)
        .unwrap_or_default();

    Ok([
        format!("#{:<3}", idx + 1),
        format!("{}\n{}", line.name(), line.sku()),
        line.quantity().to_string(),
        line.unit_price().to_string(),
        was,
        line.line_total()?.to_string(),
    ])
}

fn write_lines_table(out: &mut impl io::Write, builder: Builder) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..6), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)
}

fn write_summary(
    out: &mut impl io::Write,
    pricing: &OrderPricing<'_>,
) -> Result<(), ReceiptError> {
    let mut rows = vec![(" Subtotal:".to_string(), pricing.subtotal().to_string())];

    if is_positive(&pricing.markdown()) {
        rows.push((" You save:".to_string(), pricing.markdown().to_string()));
    }

    if let Some(code) = pricing.promo_code() {
        rows.push((
            format!(" Discount ({code}):"),
            format!("-{}", pricing.discount()),
        ));
    }

    let shipping = if pricing.shipping_waived() {
        "FREE".to_string()
    } else {
        pricing.shipping().to_string()
    };

    rows.push((" Shipping:".to_string(), shipping));
    rows.push((" Total:".to_string(), pricing.total().to_string()));
    rows.push((" Includes VAT:".to_string(), pricing.vat().to_string()));

    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    let value_width = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or(0);

    for (label, value) in &rows {
        writeln!(out, "{label:<label_width$} {value:>value_width$}")
            .map_err(|_err| ReceiptError::IO)?;
    }

    if !pricing.shipping_waived() && is_positive(&pricing.amount_to_free_shipping()) {
        writeln!(
            out,
            "\n Add {} more for free shipping",
            pricing.amount_to_free_shipping()
        )
        .map_err(|_err| ReceiptError::IO)?;
    }

    writeln!(out).map_err(|_err| ReceiptError::IO)
}

fn is_positive(money: &Money<'_, Currency>) -> bool {
    money.to_minor_units() > 0
}
