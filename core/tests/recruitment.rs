//! Recruitment pricing and talent-market hire flow.

use studio_ops_core::{
    candidate_generator::TalentCandidate,
    command::PlayerCommand,
    config::OpsConfig,
    engine::OpsEngine,
    error::OpsError,
    event::OpsEvent,
    recruitment::RecruitmentPricer,
    types::{Employee, GameDate, Position, SkillKind, SkillSet, StudioWorld},
};

fn candidate(salary: i64, level: u8) -> TalentCandidate {
    TalentCandidate {
        id: 1,
        name: "Mira Lockhart".into(),
        position: Position::Programmer,
        skills: SkillSet::exclusive(SkillKind::Development, level),
        expected_salary: salary,
        experience_years: 6,
    }
}

fn staff(id: u32) -> Employee {
    Employee {
        id,
        name: format!("Staff {id}"),
        position: Position::Programmer,
        skills: SkillSet::exclusive(SkillKind::Development, 3),
        salary: 6000,
    }
}

fn start() -> GameDate {
    GameDate::from_ymd_opt(2024, 1, 1).unwrap()
}

#[test]
fn fee_is_clamped_for_any_input() {
    let pricer = RecruitmentPricer::new(OpsConfig::default().recruitment);
    for (salary, level) in [(0, 1), (500, 2), (10_000, 3), (99_999, 5), (1, 5)] {
        let fee = pricer.fee(&candidate(salary, level));
        assert!((2_000..=30_000).contains(&fee), "fee {fee} out of bounds");
    }
}

#[test]
fn hire_fails_without_funds() {
    let pricer = RecruitmentPricer::new(OpsConfig::default().recruitment);
    // Fee for this candidate is 19_500.
    let verdict = pricer.plan_hire(&candidate(10_000, 3), &[], 19_499);
    assert!(matches!(
        verdict,
        Err(OpsError::InsufficientFunds { required: 19_500, available: 19_499 })
    ));
}

#[test]
fn hire_fails_when_the_roster_is_at_capacity() {
    let pricer = RecruitmentPricer::new(OpsConfig::default().recruitment);
    // At 25_000 funds capacity is 12.
    let roster: Vec<Employee> = (1..=12).map(staff).collect();
    let verdict = pricer.plan_hire(&candidate(3_000, 1), &roster, 25_000);
    assert!(matches!(verdict, Err(OpsError::RosterFull { capacity: 12 })));
}

#[test]
fn hire_assigns_the_next_roster_id() {
    let pricer = RecruitmentPricer::new(OpsConfig::default().recruitment);

    let on_empty = pricer.plan_hire(&candidate(10_000, 3), &[], 50_000).unwrap();
    assert_eq!(on_empty.employee.id, 1);

    let roster = vec![staff(3), staff(9), staff(4)];
    let plan = pricer.plan_hire(&candidate(10_000, 3), &roster, 50_000).unwrap();
    assert_eq!(plan.employee.id, 10);
    assert_eq!(plan.cost, 19_500);
    // The pricer mutates nothing; the roster is untouched.
    assert_eq!(roster.len(), 3);
}

/// End-to-end market hire through the engine command path: the fee is
/// charged, the employee lands on the roster, the candidate is consumed.
#[test]
fn market_hire_roundtrip_through_the_engine() {
    let mut engine = OpsEngine::new(OpsConfig::default(), start(), 77);
    let mut world = StudioWorld {
        funds: 120_000,
        fans: 1000,
        ..Default::default()
    };
    engine.run_days(&mut world, 1).unwrap();
    assert!(!engine.market.pool().is_empty(), "first day fills the pool");

    let candidate_id = engine.market.pool()[0].id;
    let funds_before = world.funds;
    let events = engine
        .handle_command(PlayerCommand::HireFromMarket { candidate_id }, &mut world)
        .unwrap();

    let fee = match &events[..] {
        [OpsEvent::CandidateHired { fee, .. }] => *fee,
        other => panic!("unexpected events: {other:?}"),
    };
    assert_eq!(world.funds, funds_before - fee);
    assert_eq!(world.roster.len(), 1);

    // The candidate was consumed exactly once.
    let again = engine.handle_command(PlayerCommand::HireFromMarket { candidate_id }, &mut world);
    assert!(matches!(again, Err(OpsError::NotFound { .. })));
}
