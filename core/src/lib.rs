//! studio-ops-core — the workforce-operations engine of a studio
//! management sim: synthetic job candidates, posting and interview
//! pipelines, priced hires, and support-complaint operations against
//! released games.
//!
//! Everything is synchronous and single-threaded, driven one in-game
//! day at a time by [`engine::OpsEngine::tick_day`]. All randomness is
//! deterministic per master seed; all world state is caller-owned.

pub mod candidate_generator;
pub mod clock;
pub mod command;
pub mod complaint_ops;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod name_generator;
pub mod posting_pipeline;
pub mod recruitment;
pub mod rng;
pub mod subsystem;
pub mod types;
