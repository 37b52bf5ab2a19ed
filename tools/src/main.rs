//! ops-runner: headless workforce-operations runner.
//!
//! Usage:
//!   ops-runner --seed 12345 --days 180
//!   ops-runner --seed 12345 --days 90 --data-dir ./data

use anyhow::Result;
use studio_ops_core::{
    command::PlayerCommand,
    complaint_ops::ComplaintStatus,
    config::OpsConfig,
    engine::OpsEngine,
    event::OpsEvent,
    types::{
        BusinessModel, Employee, GameDate, Position, ReleasedGame, SkillKind, SkillSet,
        StudioWorld,
    },
};
use std::env;

#[derive(serde::Serialize)]
struct RunSummary {
    days: u64,
    final_date: GameDate,
    funds: i64,
    fans: i64,
    roster_size: usize,
    hires: usize,
    postings: usize,
    applicants: usize,
    complaints_open: usize,
    complaints_completed: usize,
    sla_penalty_days: usize,
    events: usize,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let days = parse_arg(&args, "--days", 180u64);
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str());

    println!("Studio Ops — headless workforce runner");
    println!("  seed:     {seed}");
    println!("  days:     {days}");
    println!("  data_dir: {}", data_dir.unwrap_or("(built-in defaults)"));
    println!();

    let config = match data_dir {
        Some(dir) => OpsConfig::load(dir)?,
        None => OpsConfig::default(),
    };

    let start = GameDate::from_ymd_opt(2024, 1, 1).expect("valid start date");
    let mut engine = OpsEngine::new(config, start, seed);
    let mut world = demo_world();

    // Standing posting for support staff; complaints need hands.
    engine.handle_command(
        PlayerCommand::OpenPosting {
            position: Position::SupportAgent,
            min_skill_level: 2,
            salary_min: 4_000,
            salary_max: 8_000,
        },
        &mut world,
    )?;

    let mut events: Vec<OpsEvent> = Vec::new();
    let mut hires = 0usize;
    for day in 1..=days {
        engine.clock.resume();
        events.extend(engine.tick_day(&mut world)?);
        engine.clock.pause();

        // Weekly operations sweep: route the backlog, then clear any
        // accepted support applicants through the pipeline.
        if day % 7 == 0 {
            events.extend(engine.handle_command(PlayerCommand::AutoAssignComplaints, &mut world)?);
            hires += hire_ready_applicants(&mut engine, &mut world, &mut events)?;
        }
    }

    print_summary(&engine, &world, &events, days, hires)?;
    Ok(())
}

/// HR-screen every pending applicant on every active posting, then hire
/// whoever was accepted while funds and capacity allow.
fn hire_ready_applicants(
    engine: &mut OpsEngine,
    world: &mut StudioWorld,
    events: &mut Vec<OpsEvent>,
) -> Result<usize> {
    let mut pending: Vec<(u32, u32)> = Vec::new();
    for posting in engine.postings.board().postings() {
        for a in &posting.applicants {
            if a.status == studio_ops_core::posting_pipeline::ApplicantStatus::Pending {
                pending.push((posting.id, a.id));
            }
        }
    }

    let mut hired = 0usize;
    for (posting_id, applicant_id) in pending {
        let outcome = engine.handle_command(
            PlayerCommand::HrInterview { posting_id, applicant_id },
            world,
        )?;
        let passed = matches!(
            outcome.first(),
            Some(OpsEvent::InterviewHeld { passed: true, .. })
        );
        events.extend(outcome);
        if !passed {
            continue;
        }
        match engine.handle_command(
            PlayerCommand::HireApplicant { posting_id, applicant_id },
            world,
        ) {
            Ok(hire_events) => {
                events.extend(hire_events);
                hired += 1;
            }
            Err(e) => {
                // Out of funds or seats: stop hiring this sweep.
                log::warn!("hire skipped: {e}");
                break;
            }
        }
    }
    Ok(hired)
}

fn demo_world() -> StudioWorld {
    let agent = |id: u32, service: u8, name: &str| Employee {
        id,
        name: name.to_string(),
        position: Position::SupportAgent,
        skills: SkillSet::exclusive(SkillKind::Service, service),
        salary: 5_000,
    };
    StudioWorld {
        roster: vec![
            agent(1, 3, "Rosa Mercer"),
            agent(2, 2, "Silas Granger"),
        ],
        products: vec![
            ReleasedGame {
                id: 1,
                name: "Harbor Lights".into(),
                business_model: BusinessModel::Online,
                live: true,
            },
            ReleasedGame {
                id: 2,
                name: "Starlit Depths".into(),
                business_model: BusinessModel::SinglePlayer,
                live: true,
            },
        ],
        funds: 150_000,
        fans: 10_000,
    }
}

fn print_summary(
    engine: &OpsEngine,
    world: &StudioWorld,
    events: &[OpsEvent],
    days: u64,
    hires: usize,
) -> Result<()> {
    let applicants: usize = engine
        .postings
        .board()
        .postings()
        .iter()
        .map(|p| p.applicants.len())
        .sum();
    let complaints_open = engine
        .service
        .complaints()
        .iter()
        .filter(|c| c.status != ComplaintStatus::Completed)
        .count();
    let complaints_completed = engine
        .service
        .complaints()
        .iter()
        .filter(|c| c.status == ComplaintStatus::Completed)
        .count();
    let sla_penalty_days = events
        .iter()
        .filter(|e| matches!(e, OpsEvent::SlaPenaltyAccrued { .. }))
        .count();

    let summary = RunSummary {
        days,
        final_date: engine.clock.today,
        funds: world.funds,
        fans: world.fans,
        roster_size: world.roster.len(),
        hires,
        postings: engine.postings.board().postings().len(),
        applicants,
        complaints_open,
        complaints_completed,
        sla_penalty_days,
        events: events.len(),
    };

    println!("=== RUN SUMMARY ===");
    println!("  days run:      {}", summary.days);
    println!("  final date:    {}", summary.final_date);
    println!("  funds:         {}", summary.funds);
    println!("  fans:          {}", summary.fans);
    println!("  roster:        {}", summary.roster_size);
    println!("  hires:         {}", summary.hires);
    println!("  applicants:    {}", summary.applicants);
    println!("  open tickets:  {}", summary.complaints_open);
    println!("  done tickets:  {}", summary.complaints_completed);
    println!("  penalty days:  {}", summary.sla_penalty_days);
    println!();
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
