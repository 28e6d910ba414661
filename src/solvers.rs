//! Purchase Solvers

use good_lp::ResolutionError;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    catalog::{Lot, VendorId, Vendors},
    observer::{NoopObserver, SolveObserver},
    solution::Solution,
    validation::Violation,
    wanted::{ItemKey, WantedItem},
};

pub mod brute_force;
pub mod feasibility;
pub mod greedy;
pub mod ilp;
pub mod per_item;

use ilp::IlpConfig;

/// Solver Errors
#[derive(Debug, Error)]
pub enum SolverError {
    /// Money amount cannot be represented as a solver coefficient.
    #[error("amount cannot be represented as a solver coefficient: {0}")]
    CostNotRepresentable(Decimal),

    /// A lot is sold by a vendor missing from the vendor set.
    #[error("lot references unknown vendor {0}")]
    UnknownVendor(VendorId),

    /// The solver bought a fractional quantity from a lot.
    #[error("non-integral quantity {value} of {wanted} from {vendor_id}")]
    NonIntegralQuantity {
        /// Wanted item
        wanted: ItemKey,
        /// Selling vendor
        vendor_id: VendorId,
        /// Solved quantity
        value: f64,
    },

    /// The solver bought more than a lot offers.
    #[error("bought {quantity} of {wanted} from {vendor_id}, lot has {available}")]
    OverPurchase {
        /// Wanted item
        wanted: ItemKey,
        /// Selling vendor
        vendor_id: VendorId,
        /// Rounded quantity
        quantity: u32,
        /// Units available in the lot
        available: u32,
    },

    /// The decoded allocation failed validation.
    #[error("solved allocation failed validation ({} violations)", .0.len())]
    InvalidSolution(Vec<Violation>),

    /// A configuration value is out of range.
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(&'static str),

    /// Wrapped solver resolution error
    #[error(transparent)]
    ResolutionError(#[from] ResolutionError),

    /// Internal solver invariant was violated (this is a bug).
    #[error("solver invariant violated: {message}")]
    InvariantViolation {
        /// What invariant was violated
        message: &'static str,
    },
}

/// Top-level purchase algorithm.
#[derive(Debug, Clone, PartialEq)]
pub enum Algorithm {
    /// Cheapest lots per item, ignoring vendors
    PerItem,

    /// Every subset of `k` vendors, ranked by cost
    BruteForce {
        /// Subset size
        k: usize,
    },

    /// Largest-coverage vendor first
    Greedy,

    /// Mixed-integer program
    Ilp(IlpConfig),
}

impl Algorithm {
    /// Short name for display.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PerItem => "per-item",
            Self::BruteForce { .. } => "brute-force",
            Self::Greedy => "greedy",
            Self::Ilp(_) => "ilp",
        }
    }
}

/// Run `algorithm` over the inputs.
///
/// Brute force returns every covering subset cheapest first; the other
/// algorithms return a single solution.
///
/// # Errors
///
/// Only [`Algorithm::Ilp`] can fail; see [`ilp::optimize`].
pub fn solve(
    algorithm: &Algorithm,
    wanted: &[WantedItem],
    lots: &[Lot],
    vendors: &Vendors,
) -> Result<Vec<Solution>, SolverError> {
    solve_with_observer(algorithm, wanted, lots, vendors, &mut NoopObserver)
}

/// [`solve`] with an observer attached to the chosen algorithm.
///
/// # Errors
///
/// Only [`Algorithm::Ilp`] can fail; see [`ilp::optimize`].
pub fn solve_with_observer(
    algorithm: &Algorithm,
    wanted: &[WantedItem],
    lots: &[Lot],
    vendors: &Vendors,
    observer: &mut dyn SolveObserver,
) -> Result<Vec<Solution>, SolverError> {
    let solutions = match algorithm {
        Algorithm::PerItem => vec![per_item::min_cost_with_observer(wanted, lots, observer)],
        Algorithm::BruteForce { k } => brute_force::ranked(
            brute_force::brute_force_with_observer(wanted, lots, *k, observer),
        ),
        Algorithm::Greedy => vec![greedy::greedy_with_observer(wanted, lots, observer)],
        Algorithm::Ilp(config) => vec![ilp::optimize_with_observer(
            wanted, lots, vendors, config, observer,
        )?],
    };

    Ok(solutions)
}
