use std::collections::HashSet;

use super::*;
use crate::error::AppraiseError;
use crate::matching::MatchingRules;
use crate::registry::{Entity, EntityId, EntityRegistry, IngredientSlot};

fn universe(ids: &[&str], recipes: Vec<Recipe>) -> Universe {
    let registry = EntityRegistry::new(ids.iter().map(|id| Entity::new(*id)).collect()).unwrap();
    Universe::new(registry, recipes).unwrap()
}

fn solver<'u>(universe: &'u Universe, rules: &MatchingRules) -> DepthSolver<'u> {
    solver_with(universe, rules, &OverrideTable::new(), SolverConfig::default())
}

fn solver_with<'u>(
    universe: &'u Universe,
    rules: &MatchingRules,
    overrides: &OverrideTable,
    config: SolverConfig,
) -> DepthSolver<'u> {
    let valuation = ValuationTable::seeded(&universe.registry, rules, overrides);
    DepthSolver::new(universe, valuation, &config)
}

/// `c0` needs one `c1`, which needs one `c2`, and so on up to `c{len-1}`
fn chain(len: usize) -> (Vec<String>, Vec<Recipe>) {
    let ids: Vec<String> = (0..len).map(|i| format!("c{}", i)).collect();
    let recipes = ids
        .windows(2)
        .map(|pair| Recipe::new(pair[0].as_str(), 1).with_ingredient(pair[1].as_str(), 1))
        .collect();
    (ids, recipes)
}

fn chain_universe(len: usize) -> Universe {
    let (ids, recipes) = chain(len);
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    universe(&refs, recipes)
}

#[test]
fn test_end_to_end_single_ingredient() {
    let universe = universe(&["x", "y"], vec![Recipe::new("x", 1).with_ingredient("y", 2)]);
    let rules = MatchingRules::new().with_rule("y", 3.0);
    let mut solver = solver(&universe, &rules);

    let summary = solver.solve_all(&OverrideTable::new());

    assert_eq!(solver.worth_of("x"), Some(6.0));
    // y is priced by match cost and never visited as a terminator
    assert!(!solver.tracker().is_terminator("y"));
    // Only y, which has no recipe, counts as unsolved
    assert_eq!(summary.attempted, 1);
    assert_eq!(summary.solved, 1);
    assert_eq!(summary.unsolved, 1);
}

#[test]
fn test_output_count_normalizes() {
    let universe = universe(
        &["x", "a", "b"],
        vec![Recipe::new("x", 3).with_ingredient("a", 2).with_ingredient("b", 4)],
    );
    let rules = MatchingRules::new().with_rule("a", 5.0).with_rule("b", 5.0);
    let mut solver = solver(&universe, &rules);

    assert_eq!(solver.solve(&Stack::one("x"), RecursionPath::empty()), Some(10.0));
}

#[test]
fn test_cheapest_recipe_wins() {
    for flipped in [false, true] {
        let mut recipes = vec![
            Recipe::new("x", 1).with_ingredient("a", 1),
            Recipe::new("x", 2).with_ingredient("b", 5),
        ];
        if flipped {
            recipes.reverse();
        }
        let universe = universe(&["x", "a", "b"], recipes);
        let rules = MatchingRules::new().with_rule("a", 7.0).with_rule("b", 2.0);
        let mut solver = solver(&universe, &rules);

        solver.solve_all(&OverrideTable::new());
        assert_eq!(solver.worth_of("x"), Some(5.0));
    }
}

#[test]
fn test_direct_cycle_terminates_unpriced() {
    let universe = universe(
        &["a", "b"],
        vec![
            Recipe::new("a", 1).with_ingredient("b", 1),
            Recipe::new("b", 1).with_ingredient("a", 1),
        ],
    );
    let mut solver = solver(&universe, &MatchingRules::new());

    let summary = solver.solve_all(&OverrideTable::new());

    assert_eq!(solver.valuation().computed("a"), None);
    assert_eq!(solver.valuation().computed("b"), None);
    assert_eq!(solver.tracker().terminators().count(), 0);
    assert_eq!(summary.unsolved, 2);
}

#[test]
fn test_self_recipe_terminates() {
    let universe = universe(&["a"], vec![Recipe::new("a", 2).with_ingredient("a", 1)]);
    let mut solver = solver(&universe, &MatchingRules::new());

    assert_eq!(solver.solve(&Stack::one("a"), RecursionPath::empty()), None);
}

#[test]
fn test_cycle_falls_through_to_next_alternative() {
    let universe = universe(
        &["x", "y", "m"],
        vec![
            Recipe::new("x", 1).with_slot(IngredientSlot::any_of(["y", "m"], 1)),
            Recipe::new("y", 1).with_ingredient("x", 1),
        ],
    );
    let rules = MatchingRules::new().with_rule("m", 2.0);
    let mut solver = solver(&universe, &rules);

    solver.solve_all(&OverrideTable::new());

    assert_eq!(solver.worth_of("x"), Some(2.0));
    // y is solved after x and reuses its memoized worth
    assert_eq!(solver.worth_of("y"), Some(2.0));
}

#[test]
fn test_partially_resolved_recipe_excluded() {
    let universe = universe(
        &["x", "a", "ore"],
        vec![Recipe::new("x", 1).with_ingredient("a", 1).with_ingredient("ore", 1)],
    );
    let rules = MatchingRules::new().with_rule("a", 1.0);
    let mut solver = solver(&universe, &rules);

    assert_eq!(solver.solve(&Stack::one("x"), RecursionPath::empty()), None);
    assert_eq!(solver.worth_of("x"), None);
    assert!(solver.tracker().is_terminator("ore"));
}

#[test]
fn test_all_slots_attempted_after_failure() {
    // The first slot fails, the second still gets visited and memoized
    let universe = universe(
        &["x", "ore", "plate", "m"],
        vec![
            Recipe::new("x", 1).with_ingredient("ore", 1).with_ingredient("plate", 1),
            Recipe::new("plate", 1).with_ingredient("m", 2),
        ],
    );
    let rules = MatchingRules::new().with_rule("m", 1.5);
    let mut solver = solver(&universe, &rules);

    assert_eq!(solver.solve(&Stack::one("x"), RecursionPath::empty()), None);
    assert_eq!(solver.valuation().computed("plate"), Some(3.0));
}

#[test]
fn test_first_resolving_alternative_used() {
    let universe = universe(
        &["x", "oak", "birch"],
        vec![Recipe::new("x", 1).with_slot(IngredientSlot::any_of(["oak", "birch"], 2))],
    );
    let rules = MatchingRules::new().with_rule("oak", 4.0).with_rule("birch", 1.0);
    let mut solver = solver(&universe, &rules);

    // No averaging and no minimum across alternatives
    assert_eq!(solver.solve(&Stack::one("x"), RecursionPath::empty()), Some(8.0));
}

#[test]
fn test_unresolvable_alternative_skipped() {
    let universe = universe(
        &["x", "ore", "birch"],
        vec![Recipe::new("x", 1).with_slot(IngredientSlot::any_of(["ore", "birch"], 1))],
    );
    let rules = MatchingRules::new().with_rule("birch", 1.0);
    let mut solver = solver(&universe, &rules);

    assert_eq!(solver.solve(&Stack::one("x"), RecursionPath::empty()), Some(1.0));
    assert!(solver.tracker().is_terminator("ore"));
}

#[test]
fn test_terminator_dependents_recorded() {
    let universe = universe(
        &["pick", "ingot", "ore"],
        vec![
            Recipe::new("pick", 1).with_ingredient("ingot", 3),
            Recipe::new("ingot", 1).with_ingredient("ore", 1),
        ],
    );
    let mut solver = solver(&universe, &MatchingRules::new());

    solver.solve_all(&OverrideTable::new());

    assert!(solver.tracker().is_terminator("ore"));
    let dependents = solver.tracker().dependents_of("ore").unwrap();
    let expected: HashSet<EntityId> = [EntityId::new("pick"), EntityId::new("ingot")]
        .into_iter()
        .collect();
    assert_eq!(dependents, &expected);
}

#[test]
fn test_depth_guard_permits_24_ancestors() {
    // c24 sits under 24 ancestors and may still look up c25
    let universe = chain_universe(26);
    let rules = MatchingRules::new().with_rule("c25", 1.0);
    let mut solver = solver(&universe, &rules);

    assert_eq!(solver.solve(&Stack::one("c0"), RecursionPath::empty()), Some(1.0));
    assert_eq!(solver.worth_of("c24"), Some(1.0));
}

#[test]
fn test_depth_guard_refuses_25_ancestors() {
    // c25 sits under 25 ancestors and may not look up c26
    let universe = chain_universe(27);
    let rules = MatchingRules::new().with_rule("c26", 1.0);
    let mut solver = solver(&universe, &rules);

    assert_eq!(solver.solve(&Stack::one("c0"), RecursionPath::empty()), None);
    assert_eq!(solver.valuation().computed_count(), 0);
}

#[test]
fn test_long_chain_primes_over_passes() {
    let universe = chain_universe(30);
    let rules = MatchingRules::new().with_rule("c29", 1.0);
    let mut solver = solver(&universe, &rules);

    let first = solver.solve_all(&OverrideTable::new());

    // c0..c3 are attempted before anything deep enough is primed
    for i in 0..4 {
        assert_eq!(solver.worth_of(&format!("c{}", i)), None);
    }
    for i in 4..29 {
        assert_eq!(solver.worth_of(&format!("c{}", i)), Some(1.0));
    }
    // c0..c3 plus c29, which has no recipe
    assert_eq!(first.unsolved, 5);

    let second = solver.solve_all(&OverrideTable::new());
    assert_eq!(solver.worth_of("c0"), Some(1.0));
    assert_eq!(second.unsolved, 1);
}

#[test]
fn test_max_depth_is_configurable() {
    let universe = chain_universe(5);
    let rules = MatchingRules::new().with_rule("c4", 1.0);
    let mut solver = solver_with(
        &universe,
        &rules,
        &OverrideTable::new(),
        SolverConfig { max_depth: 2 },
    );

    // c3 would need 3 ancestors
    assert_eq!(solver.solve(&Stack::one("c0"), RecursionPath::empty()), None);
    assert_eq!(solver.solve(&Stack::one("c1"), RecursionPath::empty()), Some(1.0));
}

#[test]
fn test_repeated_passes_are_deterministic() {
    let universe = universe(
        &["pick", "ingot", "ore", "stick", "plank", "log", "torch", "coal"],
        vec![
            Recipe::new("pick", 1)
                .with_ingredient("ingot", 3)
                .with_ingredient("stick", 2),
            Recipe::new("ingot", 1).with_ingredient("ore", 1),
            Recipe::new("ingot", 9).with_ingredient("log", 100),
            Recipe::new("stick", 4).with_ingredient("plank", 2),
            Recipe::new("plank", 4).with_ingredient("log", 1),
            Recipe::new("torch", 4)
                .with_slot(IngredientSlot::any_of(["coal", "log"], 1))
                .with_ingredient("stick", 1),
        ],
    );
    let rules = MatchingRules::new().with_rule("log", 2.0);

    let run = || {
        let mut solver = solver(&universe, &rules);
        let summary = solver.solve_all(&OverrideTable::new());
        let worths: Vec<Option<f64>> = universe
            .registry
            .iter()
            .map(|e| solver.worth_of(e.id.as_str()))
            .collect();
        (summary, worths)
    };

    let (first_summary, first) = run();
    let (second_summary, second) = run();
    assert_eq!(first_summary, second_summary);
    assert_eq!(first, second);
    assert!(first.iter().filter(|w| w.is_some()).count() >= 5);
}

#[test]
fn test_unsolved_accounting_asymmetry() {
    let universe = universe(
        &["gear", "ore", "gem"],
        vec![Recipe::new("gear", 1).with_ingredient("ore", 1)],
    );
    let mut overrides = OverrideTable::new();
    overrides.insert(EntityId::new("gear"), Some(3.0));
    overrides.insert(EntityId::new("gem"), Some(4.0));
    let mut solver = solver_with(
        &universe,
        &MatchingRules::new(),
        &overrides,
        SolverConfig::default(),
    );

    let summary = solver.solve_all(&overrides);

    // gear has a recipe and an override: not counted.
    // ore and gem have no recipe: always counted.
    assert_eq!(summary.unsolved, 2);
    assert_eq!(solver.worth_of("gear"), Some(3.0));
    assert_eq!(solver.worth_of("gem"), Some(4.0));
}

#[test]
fn test_match_cost_survives_own_recipe() {
    let universe = universe(
        &["ingot", "nugget"],
        vec![Recipe::new("ingot", 1).with_ingredient("nugget", 9)],
    );
    let rules = MatchingRules::new().with_rule("ingot", 2.0).with_rule("nugget", 1.0);
    let mut solver = solver(&universe, &rules);

    solver.solve_all(&OverrideTable::new());

    assert_eq!(solver.worth_of("ingot"), Some(2.0));
    assert_eq!(solver.valuation().computed("ingot"), None);
}

#[test]
fn test_worth_of_unknown_id() {
    let universe = universe(&["a"], Vec::new());
    let solver = solver(&universe, &MatchingRules::new());

    assert!(matches!(solver.worth_of_id("b"), Err(AppraiseError::EntityNotFound(_))));
    assert_eq!(solver.worth_of_id("a").unwrap(), None);
}
