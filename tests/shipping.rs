//! Integration test for the shipping fixture set.
//!
//! Wanted: 10 x 3001/1, 8 x 3003/1, 6 x 3004/5 (the 3001 line is split across
//! two wanted rows and merged on load).
//!
//! Vendors:
//!
//! - bricks-r-us stocks everything: 3001 @ 0.25, 3003 @ 0.20, 3004 @ 0.15
//! - cheap-parts stocks 10 x 3001 @ 0.10 and 4 x 3003 @ 0.10
//! - corner-shop stocks 8 x 3003 and 6 x 3004 @ 0.12, minimum purchase 2.00
//!
//! Corner-shop can sell at most 1.68, so its minimum rules it out whenever
//! minimums are enforced.
//!
//! Expected costs:
//!
//! - Per item, ignoring minimums: cheap-parts + corner-shop = 2.60
//! - Bricks-r-us alone: 2.50 + 1.60 + 0.90 = 5.00
//! - Bricks-r-us + cheap-parts: 1.00 + 0.40 + 0.80 + 0.90 = 3.10
//! - Bricks-r-us + corner-shop: 2.50 + 0.96 + 0.72 = 4.18

use rust_decimal::Decimal;
use testresult::TestResult;

use lotpick::{
    catalog::VendorId,
    cost::Cost,
    fixtures::Fixture,
    solvers::{
        Algorithm,
        brute_force::{brute_force, ranked, sweep},
        greedy::greedy,
        ilp::{IlpConfig, optimize},
        per_item::min_cost,
        solve,
    },
    validation::{Violation, is_valid, validate},
};

fn cents(amount: i64) -> Cost {
    Cost::Finite(Decimal::new(amount, 2))
}

fn vendor_names(ids: &std::collections::BTreeSet<VendorId>) -> Vec<&str> {
    ids.iter().map(VendorId::as_str).collect()
}

#[test]
fn per_item_ignores_minimums() -> TestResult {
    let fixture = Fixture::from_set("shipping")?;
    let vendors = fixture.vendors();

    let solution = min_cost(fixture.wanted(), fixture.lots());

    assert_eq!(solution.total_cost, cents(260));
    assert_eq!(vendor_names(&solution.vendor_ids), ["cheap-parts", "corner-shop"]);
    assert!(is_valid(fixture.wanted(), &solution.allocation, None));

    let report = validate(fixture.wanted(), &solution.allocation, Some(&vendors));

    assert_eq!(
        report.violations(),
        [Violation::BelowMinimum {
            vendor_id: VendorId::from("corner-shop"),
            spend: Decimal::new(120, 2),
            minimum: Decimal::from(2),
        }]
    );

    Ok(())
}

#[test]
fn greedy_settles_on_the_full_range_vendor() -> TestResult {
    let fixture = Fixture::from_set("shipping")?;

    let solution = greedy(fixture.wanted(), fixture.lots());

    assert_eq!(solution.total_cost, cents(500));
    assert_eq!(vendor_names(&solution.vendor_ids), ["bricks-r-us"]);
    assert!(solution.shortfall.is_empty());

    Ok(())
}

#[test]
fn single_vendor_subsets_only_bricks_r_us_covers() -> TestResult {
    let fixture = Fixture::from_set("shipping")?;

    let solutions = brute_force(fixture.wanted(), fixture.lots(), 1);

    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions.first().map(|s| s.total_cost), Some(cents(500)));

    Ok(())
}

#[test]
fn two_vendor_subsets_are_ranked_by_cost() -> TestResult {
    let fixture = Fixture::from_set("shipping")?;

    let solutions = ranked(brute_force(fixture.wanted(), fixture.lots(), 2));

    let costs: Vec<Cost> = solutions.iter().map(|s| s.total_cost).collect();

    assert_eq!(costs, [cents(260), cents(310), cents(418)]);
    assert_eq!(
        solutions.first().map(|s| vendor_names(&s.vendor_ids)),
        Some(vec!["cheap-parts", "corner-shop"])
    );

    Ok(())
}

#[test]
fn brute_force_over_every_vendor_matches_per_item() -> TestResult {
    let fixture = Fixture::from_set("shipping")?;
    let everyone = fixture.vendors().len();

    let solutions = brute_force(fixture.wanted(), fixture.lots(), everyone);
    let per_item = min_cost(fixture.wanted(), fixture.lots());

    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions.first().map(|s| s.total_cost), Some(per_item.total_cost));

    Ok(())
}

#[test]
fn sweep_keeps_the_best_per_size() -> TestResult {
    let fixture = Fixture::from_set("shipping")?;

    let results = sweep(fixture.wanted(), fixture.lots(), 3, 1);

    let best: Vec<(usize, Option<Cost>)> = results
        .iter()
        .map(|(k, solutions)| (*k, solutions.first().map(|s| s.total_cost)))
        .collect();

    assert_eq!(
        best,
        [
            (1, Some(cents(500))),
            (2, Some(cents(260))),
            (3, Some(cents(260)))
        ]
    );

    Ok(())
}

#[test]
fn ilp_respects_vendor_minimum() -> TestResult {
    let fixture = Fixture::from_set("shipping")?;
    let vendors = fixture.vendors();

    let solution = optimize(fixture.wanted(), fixture.lots(), &vendors, &IlpConfig::default())?;

    assert_eq!(solution.total_cost, cents(310));
    assert_eq!(vendor_names(&solution.vendor_ids), ["bricks-r-us", "cheap-parts"]);
    assert!(is_valid(fixture.wanted(), &solution.allocation, Some(&vendors)));

    Ok(())
}

#[test]
fn ilp_without_minimums_reaches_per_item_cost() -> TestResult {
    let fixture = Fixture::from_set("shipping")?;
    let vendors = fixture.vendors();
    let config = IlpConfig::default().with_minimum_purchase(false);

    let solution = optimize(fixture.wanted(), fixture.lots(), &vendors, &config)?;

    assert_eq!(solution.total_cost, cents(260));

    Ok(())
}

#[test]
fn fixed_cost_per_vendor_is_added_to_total() -> TestResult {
    let fixture = Fixture::from_set("shipping")?;
    let vendors = fixture.vendors();
    let config = IlpConfig::default().with_fixed_cost(Decimal::ONE);

    let solution = optimize(fixture.wanted(), fixture.lots(), &vendors, &config)?;

    // 3.10 + 2 x 1.00 still beats 5.00 + 1.00
    assert_eq!(solution.total_cost, cents(510));
    assert_eq!(solution.vendor_count(), 2);

    Ok(())
}

#[test]
fn high_fixed_cost_consolidates_vendors() -> TestResult {
    let fixture = Fixture::from_set("shipping")?;
    let vendors = fixture.vendors();
    let config = IlpConfig::default().with_fixed_cost(Decimal::from(2));

    let solution = optimize(fixture.wanted(), fixture.lots(), &vendors, &config)?;

    assert_eq!(solution.total_cost, cents(700));
    assert_eq!(vendor_names(&solution.vendor_ids), ["bricks-r-us"]);

    Ok(())
}

#[test]
fn vendor_limit_of_one() -> TestResult {
    let fixture = Fixture::from_set("shipping")?;
    let vendors = fixture.vendors();
    let config = IlpConfig::default().with_max_vendors(1);

    let solution = optimize(fixture.wanted(), fixture.lots(), &vendors, &config)?;

    assert_eq!(solution.total_cost, cents(500));
    assert_eq!(solution.vendor_count(), 1);

    Ok(())
}

#[test]
fn ilp_never_undercuts_per_item_bound() -> TestResult {
    let fixture = Fixture::from_set("shipping")?;
    let vendors = fixture.vendors();

    let bound = min_cost(fixture.wanted(), fixture.lots()).total_cost;

    for config in [
        IlpConfig::default(),
        IlpConfig::default().with_minimum_purchase(false),
        IlpConfig::default().with_integral_quantities(true),
        IlpConfig::default().with_max_vendors(2),
    ] {
        let solution = optimize(fixture.wanted(), fixture.lots(), &vendors, &config)?;

        assert!(solution.total_cost >= bound, "{config:?}");
    }

    Ok(())
}

#[test]
fn solve_dispatches_each_algorithm() -> TestResult {
    let fixture = Fixture::from_set("shipping")?;
    let vendors = fixture.vendors();

    let cases = [
        (Algorithm::PerItem, cents(260)),
        (Algorithm::BruteForce { k: 1 }, cents(500)),
        (Algorithm::Greedy, cents(500)),
        (Algorithm::Ilp(IlpConfig::default()), cents(310)),
    ];

    for (algorithm, expected) in cases {
        let solutions = solve(&algorithm, fixture.wanted(), fixture.lots(), &vendors)?;

        assert_eq!(
            solutions.first().map(|s| s.total_cost),
            Some(expected),
            "{}",
            algorithm.name()
        );
    }

    Ok(())
}
