//! Solution Summaries
//!
//! Renders solutions as terminal tables. Amounts are shown in a caller-chosen
//! currency; no conversion takes place.

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cost::Cost, solution::Solution};

/// Errors that can occur when writing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Write a ranked list of solutions, one row each.
///
/// # Errors
///
/// Returns [`SummaryError::IO`] if writing to `out` fails.
pub fn write_ranking(
    out: &mut impl io::Write,
    solutions: &[Solution],
    currency: &'static Currency,
) -> Result<(), SummaryError> {
    let mut builder = Builder::default();

    builder.push_record(["#", "Cost", "Vendors", "Vendor IDs", "Short"]);

    for (rank, solution) in solutions.iter().enumerate() {
        let missing: u64 = solution.shortfall.iter().map(|s| u64::from(s.missing)).sum();

        builder.push_record([
            (rank + 1).to_string(),
            format_cost(solution.total_cost, currency),
            solution.vendor_count().to_string(),
            solution
                .vendor_ids
                .iter()
                .map(|id| id.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            if missing == 0 {
                String::new()
            } else {
                missing.to_string()
            },
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..3), Alignment::right());

    writeln!(out, "{table}").map_err(|_err| SummaryError::IO)
}

/// Write one solution broken down by vendor, followed by its total.
///
/// # Errors
///
/// Returns [`SummaryError::IO`] if writing to `out` fails.
pub fn write_breakdown(
    out: &mut impl io::Write,
    solution: &Solution,
    currency: &'static Currency,
) -> Result<(), SummaryError> {
    let mut builder = Builder::default();

    builder.push_record(["Vendor", "Lots", "Units", "Spend"]);

    for (vendor_id, spend) in solution.spend_by_vendor() {
        let entries = solution
            .allocation
            .iter()
            .filter(|entry| &entry.vendor_id == vendor_id);

        let (lots, units) = entries.fold((0_usize, 0_u64), |(lots, units), entry| {
            (lots + 1, units + u64::from(entry.quantity))
        });

        builder.push_record([
            vendor_id.to_string(),
            lots.to_string(),
            units.to_string(),
            format_money(spend, currency),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..4), Alignment::right());

    writeln!(out, "{table}").map_err(|_err| SummaryError::IO)?;

    writeln!(
        out,
        " \x1b[1mTotal:\x1b[0m {}",
        format_cost(solution.total_cost, currency)
    )
    .map_err(|_err| SummaryError::IO)?;

    for short in &solution.shortfall {
        writeln!(out, " Missing {} x {} ({})", short.missing, short.wanted, short.name)
            .map_err(|_err| SummaryError::IO)?;
    }

    Ok(())
}

/// Format a cost, showing infeasible purchases as such.
pub fn format_cost(cost: Cost, currency: &'static Currency) -> String {
    match cost {
        Cost::Finite(amount) => format_money(amount, currency),
        Cost::Infinite => "infeasible".to_string(),
    }
}

fn format_money(amount: Decimal, currency: &'static Currency) -> String {
    Money::from_decimal(amount, currency).to_string()
}
