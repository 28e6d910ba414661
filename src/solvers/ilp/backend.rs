//! MILP Backends
//!
//! The purchase model is solver-agnostic; a [`MilpBackend`] turns it into a
//! concrete `good_lp` model, solves it and reads the variable values back.

use good_lp::{ResolutionError, Solution, SolverModel};

#[cfg(feature = "solver-highs")]
use good_lp::solvers::highs::highs as default_solver;
#[cfg(all(not(feature = "solver-highs"), feature = "solver-microlp"))]
use good_lp::solvers::microlp::microlp as default_solver;

use crate::{
    catalog::VendorId,
    solvers::{
        SolverError,
        ilp::{
            IlpConfig,
            state::{ConstraintRelation, LotVar, PurchaseModel, RecordedConstraint, VendorVar},
        },
    },
};

/// Variable values read back from a solved model.
#[derive(Debug, Clone)]
pub(crate) struct Assignment<'a> {
    /// Vendor selection values, in model order
    pub(crate) vendors: Vec<(VendorVar<'a>, f64)>,

    /// Lot quantity values, in model order
    pub(crate) lots: Vec<(LotVar<'a>, f64)>,

    /// Objective value of the assignment
    pub(crate) objective: f64,
}

impl Assignment<'_> {
    /// Whether the solver switched `vendor_id` on.
    pub(crate) fn selects(&self, vendor_id: &VendorId) -> bool {
        self.vendors
            .iter()
            .any(|(vendor, value)| vendor.vendor_id == vendor_id && *value > 0.5)
    }
}

/// Something that can solve a purchase model.
pub(crate) trait MilpBackend {
    /// Solve `model`, returning `None` when it has no feasible assignment.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError`] for solver failures other than infeasibility.
    fn solve<'a>(
        &self,
        model: PurchaseModel<'a>,
        config: &IlpConfig,
    ) -> Result<Option<Assignment<'a>>, SolverError>;
}

/// Backend selected by the enabled solver feature.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct DefaultBackend;

impl MilpBackend for DefaultBackend {
    fn solve<'a>(
        &self,
        model: PurchaseModel<'a>,
        config: &IlpConfig,
    ) -> Result<Option<Assignment<'a>>, SolverError> {
        let (pb, cost, vendors, lots, constraints) = model.into_parts();

        let model = pb.minimise(cost.clone()).using(default_solver);
        let model = configure(model, config);
        let model = apply_recorded_constraints(model, constraints);

        let solution = match model.solve() {
            Ok(solution) => solution,
            Err(ResolutionError::Infeasible) => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(Assignment {
            vendors: vendors
                .into_iter()
                .map(|vendor| (vendor, solution.value(vendor.var)))
                .collect(),
            lots: lots
                .into_iter()
                .map(|lot| (lot, solution.value(lot.var)))
                .collect(),
            objective: solution.eval(&cost),
        }))
    }
}

/// Apply the gap and time limit through HiGHS options.
#[cfg(feature = "solver-highs")]
fn configure(
    model: good_lp::solvers::highs::HighsProblem,
    config: &IlpConfig,
) -> good_lp::solvers::highs::HighsProblem {
    let model = model.set_option("mip_rel_gap", config.relative_gap);

    match config.time_limit {
        Some(limit) => model.set_option("time_limit", limit.as_secs_f64()),
        None => model,
    }
}

/// microlp always solves to optimality and has no time limit.
#[cfg(all(not(feature = "solver-highs"), feature = "solver-microlp"))]
fn configure<M>(model: M, _config: &IlpConfig) -> M {
    model
}

fn apply_recorded_constraints<S: SolverModel>(
    mut model: S,
    constraints: Vec<RecordedConstraint>,
) -> S {
    for constraint in constraints {
        model = match constraint.relation {
            ConstraintRelation::Leq => model.with(constraint.lhs.leq(constraint.rhs)),
            ConstraintRelation::Geq => model.with(constraint.lhs.geq(constraint.rhs)),
        };
    }

    model
}
