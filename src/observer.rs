//! Solve Observers
//!
//! Solvers report progress through a [`SolveObserver`] instead of printing. Every
//! callback has a no-op default, so an observer only implements the checkpoints
//! it cares about. [`NoopObserver`] is used by the plain solver entry points and
//! [`TracingObserver`] forwards everything to `tracing`.

use std::time::Duration;

use good_lp::{Expression, Variable};
use tracing::{debug, info, warn};

use crate::{
    catalog::VendorId,
    cost::Cost,
    solution::Shortfall,
    solvers::ilp::state::{ConstraintKind, ConstraintRelation},
    wanted::WantedItem,
};

/// How an external solver run ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverStatus {
    /// A solution within the requested gap was found
    Solved {
        /// Objective value reported by the solver
        objective: f64,
    },

    /// The model has no feasible solution
    Infeasible,

    /// The solver failed for another reason
    Failed,
}

/// Observer for solver checkpoints.
pub trait SolveObserver {
    /// A vendor subset was evaluated by the subset search.
    ///
    /// `cost` is `None` when the subset cannot cover the wanted list.
    fn on_subset_evaluated(&mut self, _vendors: &[&VendorId], _cost: Option<Cost>) {}

    /// The greedy heuristic picked a vendor.
    ///
    /// `coverage` is the number of still-wanted units the vendor can supply;
    /// `remaining` is the outstanding demand after buying from it.
    fn on_vendor_selected(&mut self, _vendor: &VendorId, _coverage: u64, _remaining: u64) {}

    /// A wanted item could not be filled from the lots on offer.
    fn on_item_unsatisfiable(&mut self, _item: &WantedItem, _missing: u32) {}

    /// A solver stopped with demand still outstanding.
    fn on_demand_exhausted(&mut self, _shortfall: &[Shortfall]) {}

    /// A binary "vendor used" variable was created.
    fn on_vendor_variable(&mut self, _vendor: &VendorId, _var: Variable, _fixed_cost: f64) {}

    /// A "quantity purchased" variable was created for a lot.
    fn on_lot_variable(&mut self, _lot_idx: usize, _var: Variable, _unit_cost: f64) {}

    /// A linear constraint was recorded.
    fn on_constraint(
        &mut self,
        _kind: ConstraintKind,
        _lhs: &Expression,
        _relation: ConstraintRelation,
        _rhs: f64,
    ) {
    }

    /// The external solver is about to run.
    fn on_solver_started(&mut self, _variables: usize, _constraints: usize) {}

    /// The external solver returned.
    fn on_solver_finished(&mut self, _status: SolverStatus, _elapsed: Duration) {}
}

/// No-op observer for unobserved solves.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl SolveObserver for NoopObserver {}

/// Observer that emits `tracing` events.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl SolveObserver for TracingObserver {
    fn on_subset_evaluated(&mut self, vendors: &[&VendorId], cost: Option<Cost>) {
        let k = vendors.len();
        let vendors = join_ids(vendors);

        match cost {
            Some(cost) => debug!(%vendors, %cost, k, "subset covers wanted list"),
            None => debug!(%vendors, "subset does not cover wanted list"),
        }
    }

    fn on_vendor_selected(&mut self, vendor: &VendorId, coverage: u64, remaining: u64) {
        debug!(%vendor, coverage, remaining, "vendor selected");
    }

    fn on_item_unsatisfiable(&mut self, item: &WantedItem, missing: u32) {
        warn!(item = %item.key(), name = item.name(), missing, "not enough inventory");
    }

    fn on_demand_exhausted(&mut self, shortfall: &[Shortfall]) {
        let missing: u64 = shortfall.iter().map(|s| u64::from(s.missing)).sum();

        warn!(items = shortfall.len(), missing, "demand left unmet");
    }

    fn on_solver_started(&mut self, variables: usize, constraints: usize) {
        info!(variables, constraints, "solver started");
    }

    fn on_solver_finished(&mut self, status: SolverStatus, elapsed: Duration) {
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

        match status {
            SolverStatus::Solved { objective } => {
                info!(objective, elapsed_ms, "solver finished");
            }
            SolverStatus::Infeasible => info!(elapsed_ms, "solver found no feasible purchase"),
            SolverStatus::Failed => warn!(elapsed_ms, "solver failed"),
        }
    }
}

fn join_ids(vendors: &[&VendorId]) -> String {
    vendors
        .iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
