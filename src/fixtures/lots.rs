//! Lot Fixtures

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{catalog::Lot, fixtures::FixtureError, wanted::ColorId};

/// Wrapper for a price catalog in YAML
#[derive(Debug, Deserialize)]
pub struct LotsFixture {
    /// ISO currency code prices are quoted in
    pub currency: String,

    /// Lots on offer
    pub lots: Vec<LotFixture>,
}

/// Lot from YAML
#[derive(Debug, Deserialize)]
pub struct LotFixture {
    /// Catalog item identifier
    pub item: String,

    /// Wanted color this lot satisfies
    pub color: ColorId,

    /// Color actually sold, when it differs from the wanted color
    #[serde(default)]
    pub matched_color: Option<ColorId>,

    /// Selling vendor
    pub vendor: String,

    /// Units available
    pub quantity: u32,

    /// Unit price, e.g. "0.05"
    pub price: String,
}

impl TryFrom<LotFixture> for Lot {
    type Error = FixtureError;

    fn try_from(fixture: LotFixture) -> Result<Self, Self::Error> {
        let unit_cost = parse_amount(&fixture.price)?;
        let lot = Lot::new(
            fixture.item,
            fixture.color,
            fixture.vendor,
            fixture.quantity,
            unit_cost,
        );

        Ok(match fixture.matched_color {
            Some(color) => lot.with_matched_color(color),
            None => lot,
        })
    }
}

/// Parse a non-negative decimal amount.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidPrice`] if the string is not a decimal or is negative.
pub fn parse_amount(s: &str) -> Result<Decimal, FixtureError> {
    let amount =
        Decimal::from_str(s.trim()).map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount < Decimal::ZERO {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    Ok(amount)
}
