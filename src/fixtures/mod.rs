//! Fixtures
//!
//! Loads wanted lists, price catalogs and vendor terms from YAML files laid out
//! as `<base>/{wanted,lots,vendors}/<name>.yml`.

use std::{fs, io, path::PathBuf};

use rusty_money::iso::{self, Currency};
use thiserror::Error;

use crate::{
    catalog::{Lot, Vendors},
    fixtures::{lots::LotsFixture, vendors::VendorsFixture, wanted::WantedFixture},
    wanted::WantedItem,
};

pub mod lots;
pub mod vendors;
pub mod wanted;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between catalogs
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No catalog loaded yet
    #[error("No lots loaded yet; currency unknown")]
    NoCurrency,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Merged wanted list
    wanted: Vec<WantedItem>,

    /// Lots in file order
    lots: Vec<Lot>,

    /// Explicit vendor terms, if a vendors file was loaded
    vendors: Option<Vendors>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            wanted: Vec::new(),
            lots: Vec::new(),
            vendors: None,
            currency: None,
        }
    }

    /// Load a wanted list, merging rows that repeat an item and color.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_wanted(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = fs::read_to_string(self.path("wanted", name))?;
        let fixture: WantedFixture = serde_norway::from_str(&contents)?;

        self.wanted.extend(fixture.into_wanted_items());

        Ok(self)
    }

    /// Load a price catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a price is invalid,
    /// or the currency differs from a previously loaded catalog.
    pub fn load_lots(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = fs::read_to_string(self.path("lots", name))?;
        let fixture: LotsFixture = serde_norway::from_str(&contents)?;

        let currency = iso::find(&fixture.currency)
            .ok_or_else(|| FixtureError::UnknownCurrency(fixture.currency.clone()))?;

        match self.currency {
            Some(existing) if existing != currency => {
                return Err(FixtureError::CurrencyMismatch(
                    existing.iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }
            Some(_) => {}
            None => self.currency = Some(currency),
        }

        for lot in fixture.lots {
            self.lots.push(Lot::try_from(lot)?);
        }

        Ok(self)
    }

    /// Load vendor terms.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a minimum is invalid.
    pub fn load_vendors(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = fs::read_to_string(self.path("vendors", name))?;
        let fixture: VendorsFixture = serde_norway::from_str(&contents)?;

        let vendors = fixture
            .vendors
            .into_iter()
            .map(|(id, vendor)| vendor.try_into_vendor(id))
            .collect::<Result<Vendors, _>>()?;

        self.vendors = Some(vendors);

        Ok(self)
    }

    /// Load a complete fixture set (wanted list, lots and, when present, vendors
    /// with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in(Self::new(), name)
    }

    /// [`Fixture::from_set`] relative to a custom base path.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_with_base_path(
        base_path: impl Into<PathBuf>,
        name: &str,
    ) -> Result<Self, FixtureError> {
        Self::from_set_in(Self::with_base_path(base_path), name)
    }

    fn from_set_in(mut fixture: Self, name: &str) -> Result<Self, FixtureError> {
        fixture.load_wanted(name)?.load_lots(name)?;

        if fixture.path("vendors", name).exists() {
            fixture.load_vendors(name)?;
        }

        Ok(fixture)
    }

    /// Get the wanted list
    pub fn wanted(&self) -> &[WantedItem] {
        &self.wanted
    }

    /// Get all lots
    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    /// Vendor terms, defaulting to every vendor in the lots with no minimum.
    pub fn vendors(&self) -> Vendors {
        self.vendors
            .clone()
            .unwrap_or_else(|| Vendors::from_lots(&self.lots))
    }

    /// Currency the catalog is quoted in
    ///
    /// # Errors
    ///
    /// Returns an error if no lots have been loaded.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    fn path(&self, kind: &str, name: &str) -> PathBuf {
        self.base_path.join(kind).join(format!("{name}.yml"))
    }
}
