//! Purchase Model State
//!
//! Collects the decision variables, objective and linear constraints of the
//! purchase MILP before a backend turns them into a solver model.

use std::fmt;

use good_lp::{Expression, ProblemVariables, Variable, variable};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::{
    catalog::{Lot, VendorId, Vendors},
    observer::SolveObserver,
    solvers::{SolverError, ilp::IlpConfig},
    wanted::WantedItem,
};

/// Relation operator for a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintRelation {
    /// Less than or equal (`lhs <= rhs`)
    Leq,

    /// Greater than or equal (`lhs >= rhs`)
    Geq,
}

impl fmt::Display for ConstraintRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leq => f.write_str("<="),
            Self::Geq => f.write_str(">="),
        }
    }
}

/// Which part of the purchase model a constraint encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// A lot can only be bought from when its vendor is used: `q_l - avail_l * u_v <= 0`
    VendorActivation,

    /// A wanted item receives at least its quantity: `sum(q_l) >= need`
    Demand,

    /// A used vendor's spend reaches its minimum: `sum(cost_l * q_l) - m_v * u_v >= 0`
    MinimumPurchase,

    /// At most `k` vendors are used: `sum(u_v) <= k`
    VendorLimit,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::VendorActivation => "vendor activation",
            Self::Demand => "demand",
            Self::MinimumPurchase => "minimum purchase",
            Self::VendorLimit => "vendor limit",
        };

        f.write_str(name)
    }
}

/// Recorded linear constraint.
#[derive(Debug, Clone)]
pub(crate) struct RecordedConstraint {
    /// Left-hand side expression
    pub(crate) lhs: Expression,

    /// Relation operator
    pub(crate) relation: ConstraintRelation,

    /// Right-hand side scalar
    pub(crate) rhs: f64,
}

/// A lot that takes part in the model.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LotVar<'a> {
    /// Source lot
    pub(crate) lot: &'a Lot,

    /// Quantity purchased
    pub(crate) var: Variable,
}

/// Vendor selection variable.
#[derive(Debug, Clone, Copy)]
pub(crate) struct VendorVar<'a> {
    /// Vendor id
    pub(crate) vendor_id: &'a VendorId,

    /// Binary "vendor used"
    pub(crate) var: Variable,
}

/// Builder state for the purchase MILP.
pub(crate) struct PurchaseModel<'a> {
    pb: ProblemVariables,
    cost: Expression,
    vendors: SmallVec<[VendorVar<'a>; 8]>,
    lots: Vec<LotVar<'a>>,
    constraints: Vec<RecordedConstraint>,
}

impl fmt::Debug for PurchaseModel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PurchaseModel")
            .field("pb", &"<ProblemVariables>")
            .field("cost", &"<Expression>")
            .field("vendors", &format!("[{} variables]", self.vendors.len()))
            .field("lots", &format!("[{} variables]", self.lots.len()))
            .field(
                "constraints",
                &format!("[{} constraints]", self.constraints.len()),
            )
            .finish()
    }
}

impl<'a> PurchaseModel<'a> {
    /// Build the full model for `wanted` over `lots`.
    ///
    /// Only lots matching a wanted item get a quantity variable, and only vendors
    /// selling such a lot get a selection variable.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::UnknownVendor`] if a relevant lot's vendor is not in
    /// `vendors`, or [`SolverError::CostNotRepresentable`] if a price cannot become
    /// a solver coefficient.
    pub(crate) fn build(
        wanted: &[WantedItem],
        lots: &'a [Lot],
        vendors: &'a Vendors,
        config: &IlpConfig,
        observer: &mut dyn SolveObserver,
    ) -> Result<Self, SolverError> {
        let mut model = Self {
            pb: ProblemVariables::new(),
            cost: Expression::default(),
            vendors: SmallVec::new(),
            lots: Vec::new(),
            constraints: Vec::new(),
        };

        let relevant: Vec<(usize, &'a Lot)> = lots
            .iter()
            .enumerate()
            .filter(|(_, lot)| wanted.iter().any(|item| item.key() == lot.wanted_key()))
            .collect();

        model.add_vendor_variables(&relevant, vendors, config, observer)?;
        model.add_lot_variables(&relevant, vendors, config, observer)?;
        model.add_activation_constraints(observer)?;
        model.add_demand_constraints(wanted, observer);

        if config.enforce_minimum_purchase {
            model.add_minimum_purchase_constraints(vendors, observer)?;
        }

        if let Some(limit) = config.max_vendors {
            model.add_vendor_limit(limit, observer)?;
        }

        Ok(model)
    }

    /// One binary variable per vendor, sorted by id, each charged the fixed cost.
    fn add_vendor_variables(
        &mut self,
        relevant: &[(usize, &'a Lot)],
        vendors: &'a Vendors,
        config: &IlpConfig,
        observer: &mut dyn SolveObserver,
    ) -> Result<(), SolverError> {
        let mut ids: Vec<&'a VendorId> = relevant.iter().map(|(_, lot)| lot.vendor_id()).collect();
        ids.sort_unstable();
        ids.dedup();

        let fixed_cost = decimal_to_coefficient(config.fixed_cost_per_vendor)?;

        for id in ids {
            let vendor = vendors
                .get(id)
                .ok_or_else(|| SolverError::UnknownVendor(id.clone()))?;

            let var = self.pb.add(variable().binary());

            self.cost += var * fixed_cost;
            self.vendors.push(VendorVar {
                vendor_id: vendor.id(),
                var,
            });

            observer.on_vendor_variable(vendor.id(), var, fixed_cost);
        }

        Ok(())
    }

    /// One quantity variable per relevant lot, bounded by its availability.
    ///
    /// Lots of a vendor with an enforced minimum purchase are always integer,
    /// otherwise the relaxation reaches the minimum with a fraction of a unit.
    fn add_lot_variables(
        &mut self,
        relevant: &[(usize, &'a Lot)],
        vendors: &Vendors,
        config: &IlpConfig,
        observer: &mut dyn SolveObserver,
    ) -> Result<(), SolverError> {
        for &(lot_idx, lot) in relevant {
            let unit_cost = decimal_to_coefficient(lot.unit_cost())?;
            let bounds = variable().min(0.0).max(f64::from(lot.quantity()));

            let has_minimum = config.enforce_minimum_purchase
                && vendors
                    .get(lot.vendor_id())
                    .is_some_and(|vendor| vendor.minimum_purchase() > Decimal::ZERO);

            let var = if config.integral_quantities || has_minimum {
                self.pb.add(bounds.integer())
            } else {
                self.pb.add(bounds)
            };

            self.cost += var * unit_cost;
            self.lots.push(LotVar { lot, var });

            observer.on_lot_variable(lot_idx, var, unit_cost);
        }

        Ok(())
    }

    /// (a) `q_l - avail_l * u_v <= 0`
    fn add_activation_constraints(
        &mut self,
        observer: &mut dyn SolveObserver,
    ) -> Result<(), SolverError> {
        let mut pending = Vec::with_capacity(self.lots.len());

        for lot_var in &self.lots {
            let vendor_var = self.vendor_var(lot_var.lot.vendor_id())?;

            let lhs = Expression::from(lot_var.var)
                - vendor_var * f64::from(lot_var.lot.quantity());

            pending.push(lhs);
        }

        for lhs in pending {
            self.record(ConstraintKind::VendorActivation, lhs, ConstraintRelation::Leq, 0.0, observer);
        }

        Ok(())
    }

    /// (b) `sum(q_l) >= need` for every wanted item.
    fn add_demand_constraints(&mut self, wanted: &[WantedItem], observer: &mut dyn SolveObserver) {
        for item in wanted.iter().filter(|item| item.quantity() > 0) {
            let lhs: Expression = self
                .lots
                .iter()
                .filter(|lot_var| lot_var.lot.wanted_key() == item.key())
                .map(|lot_var| lot_var.var)
                .sum();

            self.record(
                ConstraintKind::Demand,
                lhs,
                ConstraintRelation::Geq,
                f64::from(item.quantity()),
                observer,
            );
        }
    }

    /// (c) `sum(cost_l * q_l) - m_v * u_v >= 0` for vendors with a positive minimum.
    fn add_minimum_purchase_constraints(
        &mut self,
        vendors: &Vendors,
        observer: &mut dyn SolveObserver,
    ) -> Result<(), SolverError> {
        let mut pending = Vec::new();

        for vendor_var in &self.vendors {
            let minimum = vendors
                .get(vendor_var.vendor_id)
                .map_or(Decimal::ZERO, |vendor| vendor.minimum_purchase());

            if minimum <= Decimal::ZERO {
                continue;
            }

            let mut lhs = Expression::default();

            for lot_var in self
                .lots
                .iter()
                .filter(|lot_var| lot_var.lot.vendor_id() == vendor_var.vendor_id)
            {
                lhs += lot_var.var * decimal_to_coefficient(lot_var.lot.unit_cost())?;
            }

            lhs -= vendor_var.var * decimal_to_coefficient(minimum)?;

            pending.push(lhs);
        }

        for lhs in pending {
            self.record(ConstraintKind::MinimumPurchase, lhs, ConstraintRelation::Geq, 0.0, observer);
        }

        Ok(())
    }

    /// `sum(u_v) <= limit`
    fn add_vendor_limit(
        &mut self,
        limit: usize,
        observer: &mut dyn SolveObserver,
    ) -> Result<(), SolverError> {
        let rhs = limit
            .to_f64()
            .ok_or(SolverError::InvalidConfig("vendor limit is not representable"))?;

        let lhs: Expression = self.vendors.iter().map(|vendor_var| vendor_var.var).sum();

        self.record(ConstraintKind::VendorLimit, lhs, ConstraintRelation::Leq, rhs, observer);

        Ok(())
    }

    fn vendor_var(&self, vendor_id: &VendorId) -> Result<Variable, SolverError> {
        self.vendors
            .iter()
            .find(|vendor_var| vendor_var.vendor_id == vendor_id)
            .map(|vendor_var| vendor_var.var)
            .ok_or(SolverError::InvariantViolation {
                message: "lot variable has no matching vendor variable",
            })
    }

    fn record(
        &mut self,
        kind: ConstraintKind,
        lhs: Expression,
        relation: ConstraintRelation,
        rhs: f64,
        observer: &mut dyn SolveObserver,
    ) {
        observer.on_constraint(kind, &lhs, relation, rhs);

        self.constraints.push(RecordedConstraint { lhs, relation, rhs });
    }

    /// Number of decision variables.
    pub(crate) fn variable_count(&self) -> usize {
        self.vendors.len() + self.lots.len()
    }

    /// Number of recorded constraints.
    pub(crate) fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Split into the parts a backend needs.
    pub(crate) fn into_parts(
        self,
    ) -> (
        ProblemVariables,
        Expression,
        SmallVec<[VendorVar<'a>; 8]>,
        Vec<LotVar<'a>>,
        Vec<RecordedConstraint>,
    ) {
        (self.pb, self.cost, self.vendors, self.lots, self.constraints)
    }
}

/// Convert a decimal amount to a solver coefficient.
///
/// # Errors
///
/// Returns [`SolverError::CostNotRepresentable`] if the amount has no finite `f64` value.
pub fn decimal_to_coefficient(amount: Decimal) -> Result<f64, SolverError> {
    amount
        .to_f64()
        .filter(|value| value.is_finite())
        .ok_or(SolverError::CostNotRepresentable(amount))
}
