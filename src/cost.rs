//! Cost

use std::{fmt, iter::Sum, ops::Add};

use rust_decimal::Decimal;

/// Total monetary cost of a purchase.
///
/// `Infinite` marks a purchase that cannot be completed from the lots on offer.
/// It orders after every finite cost and absorbs addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cost {
    /// A completed purchase
    Finite(Decimal),

    /// Demand could not be met
    Infinite,
}

impl Cost {
    /// Zero cost.
    pub const ZERO: Self = Self::Finite(Decimal::ZERO);

    /// Whether the cost is finite.
    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// The finite amount, if any.
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Self::Finite(amount) => Some(*amount),
            Self::Infinite => None,
        }
    }
}

impl Default for Cost {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Decimal> for Cost {
    fn from(value: Decimal) -> Self {
        Self::Finite(value)
    }
}

impl Add for Cost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Finite(a), Self::Finite(b)) => Self::Finite(a + b),
            _ => Self::Infinite,
        }
    }
}

impl Add<Decimal> for Cost {
    type Output = Self;

    fn add(self, rhs: Decimal) -> Self::Output {
        self + Self::Finite(rhs)
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(amount) => write!(f, "{amount}"),
            Self::Infinite => f.write_str("inf"),
        }
    }
}

/// Price of `quantity` units at `unit_cost`.
pub fn line_cost(unit_cost: Decimal, quantity: u32) -> Decimal {
    unit_cost * Decimal::from(quantity)
}
