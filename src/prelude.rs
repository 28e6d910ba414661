//! Lotpick prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{
        Lot, Vendor, VendorId, Vendors,
        index::{by_item, by_vendor, index_by},
    },
    cost::Cost,
    observer::{NoopObserver, SolveObserver, SolverStatus, TracingObserver},
    solution::{AllocationEntry, Shortfall, Solution},
    solvers::{
        Algorithm, SolverError,
        brute_force::{brute_force, ranked, sweep},
        feasibility::covers,
        greedy::greedy,
        ilp::{IlpConfig, optimize},
        per_item::min_cost,
        solve,
    },
    validation::{ValidationReport, Violation, is_valid, unsatisfied, validate},
    wanted::{ColorId, ItemKey, WantedItem},
};
