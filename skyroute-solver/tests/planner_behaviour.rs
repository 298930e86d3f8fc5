//! Behavioural tests for `Planner` using rstest-bdd.

use std::cell::RefCell;
use std::collections::HashSet;
use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use skyroute_core::PointSet;
use skyroute_core::test_support::{StepClock, point_set};
use skyroute_solver::{FleetPlan, PlanError, Planner, PlannerConfig, RouteSearchConfig};

const STEP: Duration = Duration::from_millis(10);

#[derive(Debug, Default)]
struct PlannerWorld {
    points: RefCell<PointSet>,
    config: RefCell<Option<PlannerConfig>>,
    outcome: RefCell<Vec<Result<FleetPlan, PlanError>>>,
}

impl PlannerWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_plans(&self) -> Vec<FleetPlan> {
        self.outcome
            .borrow()
            .iter()
            .cloned()
            .map(|plan| plan.expect("every fleet size should plan"))
            .collect()
    }
}

#[fixture]
fn world() -> PlannerWorld {
    PlannerWorld::default()
}

#[given("three separated neighbourhoods of deliveries")]
fn given_neighbourhoods(world: &PlannerWorld) {
    world.points.replace(point_set(&[
        (0.0, 0.0),
        (1.5, 0.5),
        (0.5, 2.0),
        (2.0, 1.5),
        (200.0, 0.0),
        (201.0, 1.0),
        (199.5, 2.5),
        (100.0, 180.0),
        (101.5, 181.0),
        (99.0, 182.0),
        (100.5, 178.5),
    ]));
}

#[given("two deliveries")]
fn given_two_deliveries(world: &PlannerWorld) {
    world
        .points
        .replace(point_set(&[(-12.5, 4.0), (30.0, -8.25)]));
}

#[given("no deliveries")]
fn given_no_deliveries(world: &PlannerWorld) {
    world.points.replace(PointSet::default());
}

#[given("a planner allowing up to four drones")]
fn given_planner(world: &PlannerWorld) {
    world.config.replace(Some(PlannerConfig {
        restarts: 25,
        max_drones: 4,
        route_search: RouteSearchConfig {
            duration: STEP * 8,
            ..RouteSearchConfig::default()
        },
        ..PlannerConfig::default()
    }));
}

#[when("every fleet size is planned")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn when_planned(world: &PlannerWorld) {
    let configured = *world.config.borrow();
    let config = configured.expect("planner configured");
    let planner = Planner::with_clock(config, StepClock::new(STEP)).expect("valid config");
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let plans = planner.plan(&world.points.borrow(), &mut rng);
    world.outcome.replace(plans);
}

#[then("four fleet plans are produced")]
fn then_four_plans(world: &PlannerWorld) {
    let drones: Vec<u8> = world.expect_plans().iter().map(FleetPlan::drones).collect();
    assert_eq!(drones, vec![1, 2, 3, 4]);
}

#[then("two fleet plans are produced")]
fn then_two_plans(world: &PlannerWorld) {
    assert_eq!(world.expect_plans().len(), 2);
}

#[then("every plan serves each delivery exactly once")]
fn then_each_delivery_once(world: &PlannerWorld) {
    let total = world.points.borrow().len();
    for plan in world.expect_plans() {
        let visited: Vec<usize> = plan.solution().routes().iter().flatten().copied().collect();
        let unique: HashSet<usize> = visited.iter().copied().collect();
        assert_eq!(visited.len(), total);
        assert_eq!(unique.len(), total);
    }
}

#[then("the three-drone plan puts one launch pad in each neighbourhood")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_pads_in_neighbourhoods(world: &PlannerWorld) {
    let plans = world.expect_plans();
    let plan = plans.get(2).expect("three-drone plan");
    let mut served: Vec<usize> = plan.solution().served().to_vec();
    served.sort_unstable();
    assert_eq!(served, vec![3, 4, 4]);
}

#[then("planning reports that there is nothing to plan")]
fn then_nothing_to_plan(world: &PlannerWorld) {
    assert_eq!(*world.outcome.borrow(), vec![Err(PlanError::EmptyPointSet)]);
}

#[scenario(path = "tests/features/planner.feature", index = 0)]
fn separated_neighbourhoods(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planner.feature", index = 1)]
fn fleet_capped_by_deliveries(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planner.feature", index = 2)]
fn empty_delivery_list(world: PlannerWorld) {
    let _ = world;
}
