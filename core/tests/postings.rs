//! Posting lifecycle, applicant arrival, and hire flow.

use studio_ops_core::{
    command::PlayerCommand,
    config::OpsConfig,
    engine::OpsEngine,
    error::OpsError,
    event::OpsEvent,
    posting_pipeline::{ApplicantStatus, PostingStatus},
    types::{GameDate, Position, StudioWorld},
};

fn start() -> GameDate {
    GameDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn world() -> StudioWorld {
    StudioWorld {
        funds: 150_000,
        fans: 1000,
        ..Default::default()
    }
}

/// A generous, low-bar posting: attractiveness 1.0, so applicants
/// arrive every single day.
fn open_magnet_posting(engine: &mut OpsEngine, world: &mut StudioWorld) -> u32 {
    let events = engine
        .handle_command(
            PlayerCommand::OpenPosting {
                position: Position::Programmer,
                min_skill_level: 1,
                salary_min: 20_000,
                salary_max: 24_000,
            },
            world,
        )
        .unwrap();
    match &events[..] {
        [OpsEvent::PostingOpened { posting_id, .. }] => *posting_id,
        other => panic!("unexpected events: {other:?}"),
    }
}

#[test]
fn applicants_accumulate_in_bounded_waves() {
    let mut engine = OpsEngine::new(OpsConfig::default(), start(), 5);
    let mut world = world();
    let posting_id = open_magnet_posting(&mut engine, &mut world);

    let mut previous = 0usize;
    for _ in 0..14 {
        engine.run_days(&mut world, 1).unwrap();
        let posting = engine.postings.board().get(posting_id).unwrap();
        let count = posting.applicants.len();
        assert!(count >= previous, "applicant list must only grow");
        assert!(count - previous <= 3, "wave larger than 3: {}", count - previous);
        previous = count;
    }
    assert!(previous > 0, "a maximally attractive posting got no applicants");
}

#[test]
fn arrivals_match_the_posting_requirements() {
    let mut engine = OpsEngine::new(OpsConfig::default(), start(), 6);
    let mut world = world();
    let posting_id = open_magnet_posting(&mut engine, &mut world);
    engine.run_days(&mut world, 10).unwrap();

    let posting = engine.postings.board().get(posting_id).unwrap();
    assert!(!posting.applicants.is_empty());
    for a in &posting.applicants {
        assert_eq!(a.candidate.position, Position::Programmer);
        assert_eq!(a.candidate.skills.development, 1);
        assert!((20_000..=24_000).contains(&a.candidate.expected_salary));
        assert_eq!(a.status, ApplicantStatus::Pending);
    }
}

#[test]
fn paused_postings_stop_collecting() {
    let mut engine = OpsEngine::new(OpsConfig::default(), start(), 7);
    let mut world = world();
    let posting_id = open_magnet_posting(&mut engine, &mut world);
    engine.run_days(&mut world, 5).unwrap();

    engine
        .handle_command(PlayerCommand::PausePosting { posting_id }, &mut world)
        .unwrap();
    let frozen = engine.postings.board().get(posting_id).unwrap().applicants.len();
    engine.run_days(&mut world, 10).unwrap();
    assert_eq!(
        engine.postings.board().get(posting_id).unwrap().applicants.len(),
        frozen,
        "paused posting must not collect applicants"
    );
}

#[test]
fn lifecycle_transitions_are_validated() {
    let mut engine = OpsEngine::new(OpsConfig::default(), start(), 8);
    let mut world = world();
    let posting_id = open_magnet_posting(&mut engine, &mut world);

    // Resume only works from PAUSED.
    assert!(matches!(
        engine.handle_command(PlayerCommand::ResumePosting { posting_id }, &mut world),
        Err(OpsError::InvalidState { .. })
    ));

    engine
        .handle_command(PlayerCommand::PausePosting { posting_id }, &mut world)
        .unwrap();
    engine
        .handle_command(PlayerCommand::ResumePosting { posting_id }, &mut world)
        .unwrap();
    engine
        .handle_command(PlayerCommand::ClosePosting { posting_id }, &mut world)
        .unwrap();
    assert_eq!(
        engine.postings.board().get(posting_id).unwrap().status,
        PostingStatus::Closed
    );

    // Closing is terminal.
    assert!(matches!(
        engine.handle_command(PlayerCommand::ClosePosting { posting_id }, &mut world),
        Err(OpsError::InvalidState { .. })
    ));

    // Unknown ids surface as NotFound.
    assert!(matches!(
        engine.handle_command(PlayerCommand::PausePosting { posting_id: 999 }, &mut world),
        Err(OpsError::NotFound { .. })
    ));
}

/// Accept, hire, and verify the single-use transition: the second hire
/// attempt fails because the applicant is already HIRED.
#[test]
fn hire_roundtrip_charges_the_fee_once() {
    let mut engine = OpsEngine::new(OpsConfig::default(), start(), 9);
    let mut world = world();
    let posting_id = open_magnet_posting(&mut engine, &mut world);
    engine.run_days(&mut world, 5).unwrap();

    let applicant_id = engine.postings.board().get(posting_id).unwrap().applicants[0].id;
    engine
        .handle_command(
            PlayerCommand::PlayerInterview { posting_id, applicant_id, accept: true },
            &mut world,
        )
        .unwrap();

    let funds_before = world.funds;
    let events = engine
        .handle_command(PlayerCommand::HireApplicant { posting_id, applicant_id }, &mut world)
        .unwrap();
    let (employee_id, fee) = match &events[..] {
        [OpsEvent::ApplicantHired { employee_id, fee, .. }] => (*employee_id, *fee),
        other => panic!("unexpected events: {other:?}"),
    };
    assert!(fee > 0);
    assert_eq!(world.funds, funds_before - fee);
    assert!(world.employee(employee_id).is_some());
    assert_eq!(
        engine
            .postings
            .board()
            .get(posting_id)
            .unwrap()
            .applicant(applicant_id)
            .unwrap()
            .status,
        ApplicantStatus::Hired
    );

    let again = engine.handle_command(
        PlayerCommand::HireApplicant { posting_id, applicant_id },
        &mut world,
    );
    assert!(matches!(again, Err(OpsError::InvalidState { .. })));
}

/// A rejected applicant can never be hired.
#[test]
fn rejected_applicants_cannot_be_hired() {
    let mut engine = OpsEngine::new(OpsConfig::default(), start(), 10);
    let mut world = world();
    let posting_id = open_magnet_posting(&mut engine, &mut world);
    engine.run_days(&mut world, 5).unwrap();

    let applicant_id = engine.postings.board().get(posting_id).unwrap().applicants[0].id;
    engine
        .handle_command(
            PlayerCommand::PlayerInterview { posting_id, applicant_id, accept: false },
            &mut world,
        )
        .unwrap();
    assert!(matches!(
        engine.handle_command(
            PlayerCommand::HireApplicant { posting_id, applicant_id },
            &mut world,
        ),
        Err(OpsError::InvalidState { .. })
    ));
}
