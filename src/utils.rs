//! Utils

use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;

use crate::solvers::{Algorithm, ilp::IlpConfig};

/// Algorithm choice on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    /// Cheapest lots per item
    PerItem,

    /// Every `k`-vendor subset
    BruteForce,

    /// Subset search for every size up to `k`, best `top` per size
    Sweep,

    /// Largest-coverage vendor first
    Greedy,

    /// Mixed-integer program
    Ilp,
}

/// Arguments for the purchase example
#[derive(Debug, Parser)]
pub struct ExamplePurchaseArgs {
    /// Fixture set to load the wanted list, lots and vendors from
    #[clap(short, long, default_value = "shipping")]
    pub fixture: String,

    /// Algorithm to run
    #[clap(short, long, value_enum, default_value_t = AlgorithmArg::Ilp)]
    pub algorithm: AlgorithmArg,

    /// Subset size for brute force, largest size for a sweep, vendor limit for the ILP
    #[clap(short, long)]
    pub k: Option<usize>,

    /// Solutions kept per subset size when sweeping
    #[clap(short, long, default_value_t = 10)]
    pub top: usize,

    /// Fixed cost charged per vendor by the ILP, e.g. shipping
    #[clap(long, default_value = "0")]
    pub fixed_cost: Decimal,

    /// Relative optimality gap for the ILP
    #[clap(long, default_value_t = 0.01)]
    pub gap: f64,

    /// Solve the ILP with integer lot quantities
    #[clap(long)]
    pub integral: bool,

    /// Ignore vendor minimum purchases
    #[clap(long)]
    pub no_minimums: bool,
}

impl ExamplePurchaseArgs {
    /// ILP settings described by the arguments.
    pub fn ilp_config(&self) -> IlpConfig {
        let config = IlpConfig::default()
            .with_fixed_cost(self.fixed_cost)
            .with_relative_gap(self.gap)
            .with_integral_quantities(self.integral)
            .with_minimum_purchase(!self.no_minimums);

        match self.k {
            Some(limit) => config.with_max_vendors(limit),
            None => config,
        }
    }

    /// Algorithm to run, or `None` for a sweep.
    pub fn algorithm(&self) -> Option<Algorithm> {
        match self.algorithm {
            AlgorithmArg::PerItem => Some(Algorithm::PerItem),
            AlgorithmArg::BruteForce => Some(Algorithm::BruteForce {
                k: self.k.unwrap_or(1),
            }),
            AlgorithmArg::Sweep => None,
            AlgorithmArg::Greedy => Some(Algorithm::Greedy),
            AlgorithmArg::Ilp => Some(Algorithm::Ilp(self.ilp_config())),
        }
    }
}
