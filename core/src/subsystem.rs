//! Subsystem trait and registry.
//!
//! RULE: Every time-driven component implements OpsSubsystem.
//! The engine calls update() on each registered subsystem
//! in registration order, every day.
//! Execution order is fixed and documented in engine.rs.

use crate::{
    error::OpsResult,
    event::OpsEvent,
    rng::SubsystemRng,
    types::{GameDate, StudioWorld},
};
use std::any::Any;

/// The contract every time-driven subsystem must fulfill.
pub trait OpsSubsystem: Send {
    /// Unique stable name for this subsystem.
    fn name(&self) -> &'static str;

    /// Called once per day by the engine.
    ///
    /// - `date`:      the in-game date being simulated
    /// - `world`:     the caller-owned roster/products/funds/fans state
    /// - `events_in`: events emitted by earlier subsystems this day
    /// - `rng`:       this subsystem's deterministic RNG for this day
    ///
    /// Returns a vec of new events to add to the day's event log.
    fn update(
        &mut self,
        date: GameDate,
        world: &mut StudioWorld,
        events_in: &[OpsEvent],
        rng: &mut SubsystemRng,
    ) -> OpsResult<Vec<OpsEvent>>;

    /// For downcasting in tests and tooling only.
    /// Production code never uses this.
    fn as_any(&self) -> &dyn Any;
}
