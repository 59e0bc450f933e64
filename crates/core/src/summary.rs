//! Cart summary
//!
//! Console rendering of the cart: one table row per line, then the totals
//! block.

use std::io;

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
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
    cart::Cart,
    context::DiscountPercent,
    lines::CartLine,
    pricing::{TAX_RATE, TIP_RATE, Totals},
};

/// Errors that can occur while writing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The output could not be written.
    #[error("failed to write summary: {0}")]
    Io(#[from] io::Error),
}

/// A borrowed view of a cart ready to be printed.
#[derive(Debug)]
pub struct CartSummary<'a> {
    lines: &'a [CartLine],
    discount: DiscountPercent,
    totals: Totals,
}

impl<'a> CartSummary<'a> {
    /// Summarises the cart as it is now.
    #[must_use]
    pub fn new(cart: &'a Cart) -> Self {
        Self {
            lines: cart.lines(),
            discount: cart.context().discount,
            totals: cart.totals(),
        }
    }

    /// Writes the line table and totals to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::Io`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write, currency: &Currency) -> Result<(), SummaryError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Kind", "Qty", "Unit Price", "Line Total", "Note"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.name().to_string(),
                line.kind().to_string(),
                line.quantity().to_string(),
                format!("{}", Totals::money(line.unit_price(), currency)),
                format!("{}", Totals::money(line.line_total(), currency)),
                line.note().to_string(),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..6), Alignment::right());

        writeln!(out, "\n{table}")?;

        self.write_totals(&mut out, currency)
    }

    fn write_totals(&self, out: &mut impl io::Write, currency: &Currency) -> Result<(), SummaryError> {
        let totals = &self.totals;

        let mut rows = vec![("Subtotal:".to_string(), totals.subtotal)];

        if !totals.discount_amount.is_zero() {
            rows.push((
                format!("Discount ({}%):", self.discount.points().normalize()),
                -totals.discount_amount,
            ));
        }

        rows.extend([
            ("Net:".to_string(), totals.net_subtotal),
            (format!("Tax ({}%):", percent_points(TAX_RATE)), totals.tax),
            (format!("Tip ({}%):", percent_points(TIP_RATE)), totals.tip),
            ("Total:".to_string(), totals.total),
        ]);

        let rendered: Vec<(String, String)> = rows
            .into_iter()
            .map(|(label, amount)| (label, format!("{}", Totals::money(amount, currency))))
            .collect();

        let label_width = rendered.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
        let value_width = rendered.iter().map(|(_, value)| value.chars().count()).max().unwrap_or(0);

        for (label, value) in &rendered {
            writeln!(out, " {label:>label_width$}  {value:>value_width$}  ")?;
        }

        writeln!(out)?;

        Ok(())
    }
}

/// Converts a fractional rate to percent points for display.
fn percent_points(rate: Decimal) -> Decimal {
    (rate * Decimal::ONE_HUNDRED).normalize()
}
