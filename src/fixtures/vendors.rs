//! Vendor Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    catalog::Vendor,
    fixtures::{FixtureError, lots::parse_amount},
};

/// Wrapper for vendors in YAML
#[derive(Debug, Deserialize)]
pub struct VendorsFixture {
    /// Map of vendor id -> vendor fixture
    pub vendors: FxHashMap<String, VendorFixture>,
}

/// Vendor from YAML
#[derive(Debug, Default, Deserialize)]
pub struct VendorFixture {
    /// Minimum spend, e.g. "5.00"
    #[serde(default)]
    pub minimum: Option<String>,
}

impl VendorFixture {
    /// Convert to a [`Vendor`] with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::InvalidPrice`] if the minimum is not a valid amount.
    pub fn try_into_vendor(self, id: String) -> Result<Vendor, FixtureError> {
        let vendor = Vendor::new(id);

        match self.minimum {
            Some(minimum) => Ok(vendor.with_minimum_purchase(parse_amount(&minimum)?)),
            None => Ok(vendor),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn minimum_is_optional() -> TestResult {
        let fixture: VendorsFixture = serde_norway::from_str(
            r#"
vendors:
  one:
    minimum: "5.00"
  two: {}
"#,
        )?;

        let mut vendors = fixture
            .vendors
            .into_iter()
            .map(|(id, vendor)| vendor.try_into_vendor(id))
            .collect::<Result<Vec<_>, _>>()?;

        vendors.sort_by(|a, b| a.id().cmp(b.id()));

        let minimums: Vec<(&str, Decimal)> = vendors
            .iter()
            .map(|v| (v.id().as_str(), v.minimum_purchase()))
            .collect();

        assert_eq!(
            minimums,
            [("one", Decimal::from(5)), ("two", Decimal::ZERO)]
        );

        Ok(())
    }
}
