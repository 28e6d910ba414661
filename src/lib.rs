//! Lotpick
//!
//! Lotpick plans multi-vendor purchases: given a wanted list and a catalog of
//! priced lots from many vendors, it decides which lots to buy so every wanted
//! item is covered at the lowest cost, optionally honouring per-vendor fixed
//! costs, minimum purchases and a cap on the number of vendors.
//!
//! Several solvers trade cost, completeness and runtime differently:
//!
//! - [`solvers::per_item`] fills each item from its cheapest lots (a lower bound)
//! - [`solvers::brute_force`] searches every `k`-vendor subset exactly
//! - [`solvers::greedy`] picks the vendor covering the most demand first
//! - [`solvers::ilp`] optimises vendors and quantities jointly as a MILP
//!
//! Any result can be certified with [`validation::validate`].

pub mod catalog;
pub mod cost;
pub mod fixtures;
pub mod observer;
pub mod prelude;
pub mod solution;
pub mod solvers;
pub mod summary;
pub mod utils;
pub mod validation;
pub mod wanted;
