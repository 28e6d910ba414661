//! ILP Purchase Optimizer
//!
//! Jointly chooses vendors and quantities with a mixed-integer program:
//!
//! - `u_v` binary per vendor, 1 when the vendor is used
//! - `q_l` per lot, the quantity bought, bounded by the lot's availability
//!
//! subject to vendor activation (`q_l <= avail_l * u_v`), demand
//! (`sum(q_l) >= need`), optional minimum purchases
//! (`sum(cost_l * q_l) >= m_v * u_v`) and an optional vendor limit
//! (`sum(u_v) <= k`), minimising `sum(cost_l * q_l) + fixed * sum(u_v)`.
//!
//! Quantities are continuous unless [`IlpConfig::integral_quantities`] is set,
//! except for lots of vendors with an enforced minimum purchase, which are
//! always integer. Either way the decoded allocation must be integral within
//! [`IlpConfig::rounding_tolerance`] and pass [`validate`]; anything else is
//! reported as a [`SolverError`] rather than rounded away.

use std::time::{Duration, Instant};

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    catalog::{Lot, Vendors},
    cost::Cost,
    observer::{NoopObserver, SolveObserver, SolverStatus},
    solution::{AllocationEntry, Solution},
    solvers::{SolverError, feasibility::covers},
    validation::validate,
    wanted::WantedItem,
};

pub(crate) mod backend;
pub mod state;

use backend::{Assignment, DefaultBackend, MilpBackend};
use state::PurchaseModel;

pub use state::{ConstraintKind, ConstraintRelation, decimal_to_coefficient};

/// ILP optimizer settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IlpConfig {
    /// Cost charged once for every vendor used, e.g. shipping
    pub fixed_cost_per_vendor: Decimal,

    /// Relative optimality gap at which the solver may stop
    pub relative_gap: f64,

    /// Wall-clock limit handed to the solver, when it supports one
    pub time_limit: Option<Duration>,

    /// Whether vendor minimum purchases are enforced
    pub enforce_minimum_purchase: bool,

    /// Whether lot quantities are integer variables instead of continuous ones
    pub integral_quantities: bool,

    /// Maximum number of vendors the purchase may use
    pub max_vendors: Option<usize>,

    /// Largest distance from an integer a solved quantity may have
    pub rounding_tolerance: f64,
}

impl Default for IlpConfig {
    fn default() -> Self {
        Self {
            fixed_cost_per_vendor: Decimal::ZERO,
            relative_gap: 0.01,
            time_limit: None,
            enforce_minimum_purchase: true,
            integral_quantities: false,
            max_vendors: None,
            rounding_tolerance: 1e-3,
        }
    }
}

impl IlpConfig {
    /// Set the per-vendor fixed cost.
    #[must_use]
    pub fn with_fixed_cost(mut self, amount: Decimal) -> Self {
        self.fixed_cost_per_vendor = amount;
        self
    }

    /// Set the relative optimality gap.
    #[must_use]
    pub fn with_relative_gap(mut self, gap: f64) -> Self {
        self.relative_gap = gap;
        self
    }

    /// Set the solver time limit.
    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Enable or disable minimum purchase constraints.
    #[must_use]
    pub fn with_minimum_purchase(mut self, enforce: bool) -> Self {
        self.enforce_minimum_purchase = enforce;
        self
    }

    /// Make lot quantities integer variables.
    #[must_use]
    pub fn with_integral_quantities(mut self, integral: bool) -> Self {
        self.integral_quantities = integral;
        self
    }

    /// Cap the number of vendors used.
    #[must_use]
    pub fn with_max_vendors(mut self, limit: usize) -> Self {
        self.max_vendors = Some(limit);
        self
    }

    /// Check that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidConfig`] naming the first bad setting.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.fixed_cost_per_vendor < Decimal::ZERO {
            return Err(SolverError::InvalidConfig("fixed cost per vendor is negative"));
        }

        if !self.relative_gap.is_finite() || self.relative_gap < 0.0 {
            return Err(SolverError::InvalidConfig(
                "relative gap must be a non-negative number",
            ));
        }

        if !self.rounding_tolerance.is_finite()
            || self.rounding_tolerance < 0.0
            || self.rounding_tolerance >= 0.5
        {
            return Err(SolverError::InvalidConfig(
                "rounding tolerance must be in [0, 0.5)",
            ));
        }

        Ok(())
    }
}

/// Cheapest purchase honouring vendor fixed costs, minimum purchases and the
/// vendor limit.
///
/// Returns [`Solution::infeasible`] when no purchase satisfies every constraint.
/// The solution's cost includes the fixed cost of every vendor bought from.
///
/// # Errors
///
/// Returns [`SolverError`] if the configuration is invalid, a lot references a
/// vendor missing from `vendors`, the solver fails, or the solver's answer does
/// not decode to a valid integral allocation.
pub fn optimize(
    wanted: &[WantedItem],
    lots: &[Lot],
    vendors: &Vendors,
    config: &IlpConfig,
) -> Result<Solution, SolverError> {
    optimize_with_observer(wanted, lots, vendors, config, &mut NoopObserver)
}

/// [`optimize`] reporting model construction and the solver run to `observer`.
///
/// # Errors
///
/// See [`optimize`].
pub fn optimize_with_observer(
    wanted: &[WantedItem],
    lots: &[Lot],
    vendors: &Vendors,
    config: &IlpConfig,
    observer: &mut dyn SolveObserver,
) -> Result<Solution, SolverError> {
    optimize_with_backend(wanted, lots, vendors, config, &DefaultBackend, observer)
}

pub(crate) fn optimize_with_backend(
    wanted: &[WantedItem],
    lots: &[Lot],
    vendors: &Vendors,
    config: &IlpConfig,
    backend: &dyn MilpBackend,
    observer: &mut dyn SolveObserver,
) -> Result<Solution, SolverError> {
    config.validate()?;

    if wanted.iter().all(|item| item.quantity() == 0) {
        return Ok(Solution::new(Cost::ZERO, Vec::new()));
    }

    let model = PurchaseModel::build(wanted, lots, vendors, config, observer)?;

    // Demand no lot set can meet never reaches the solver
    if !covers(wanted, lots) {
        observer.on_solver_finished(SolverStatus::Infeasible, Duration::ZERO);

        return Ok(Solution::infeasible());
    }

    observer.on_solver_started(model.variable_count(), model.constraint_count());

    let started = Instant::now();
    let outcome = backend.solve(model, config);
    let elapsed = started.elapsed();

    let assignment = match outcome {
        Ok(Some(assignment)) => {
            observer.on_solver_finished(
                SolverStatus::Solved {
                    objective: assignment.objective,
                },
                elapsed,
            );

            assignment
        }
        Ok(None) => {
            observer.on_solver_finished(SolverStatus::Infeasible, elapsed);

            return Ok(Solution::infeasible());
        }
        Err(err) => {
            observer.on_solver_finished(SolverStatus::Failed, elapsed);

            return Err(err);
        }
    };

    decode(wanted, vendors, config, &assignment)
}

/// Turn solved quantities into a validated allocation.
fn decode(
    wanted: &[WantedItem],
    vendors: &Vendors,
    config: &IlpConfig,
    assignment: &Assignment<'_>,
) -> Result<Solution, SolverError> {
    let mut allocation = Vec::new();

    for (lot_var, value) in &assignment.lots {
        let lot = lot_var.lot;
        let rounded = value.round();

        if (value - rounded).abs() > config.rounding_tolerance {
            return Err(SolverError::NonIntegralQuantity {
                wanted: lot.wanted_key().clone(),
                vendor_id: lot.vendor_id().clone(),
                value: *value,
            });
        }

        let quantity = rounded
            .max(0.0)
            .to_u32()
            .ok_or_else(|| SolverError::NonIntegralQuantity {
                wanted: lot.wanted_key().clone(),
                vendor_id: lot.vendor_id().clone(),
                value: *value,
            })?;

        if quantity > lot.quantity() {
            return Err(SolverError::OverPurchase {
                wanted: lot.wanted_key().clone(),
                vendor_id: lot.vendor_id().clone(),
                quantity,
                available: lot.quantity(),
            });
        }

        if quantity > 0 && !assignment.selects(lot.vendor_id()) {
            return Err(SolverError::InvariantViolation {
                message: "lot bought from a vendor the solver left unselected",
            });
        }

        if quantity > 0 {
            allocation.push(AllocationEntry::from_lot(lot, quantity));
        }
    }

    let checked_vendors = config.enforce_minimum_purchase.then_some(vendors);
    let report = validate(wanted, &allocation, checked_vendors);

    if !report.is_valid() {
        return Err(SolverError::InvalidSolution(report.into_violations()));
    }

    let solution = Solution::priced(allocation);
    let used = Decimal::from(solution.vendor_count());
    let fixed = config.fixed_cost_per_vendor * used;

    Ok(Solution {
        total_cost: solution.total_cost + fixed,
        ..solution
    })
}
