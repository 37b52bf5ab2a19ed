//! Simulation clock — owns the in-game calendar, speed control, and pause.

use crate::types::GameDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpsClock {
    pub start: GameDate,
    pub today: GameDate,
    /// Days elapsed since the run started. Seeds per-day RNG streams.
    pub day_index: u64,
    pub speed: SimSpeed,
    pub paused: bool,
}

impl OpsClock {
    pub fn new(start: GameDate) -> Self {
        Self {
            start,
            today: start,
            day_index: 0,
            speed: SimSpeed::Normal,
            paused: true,
        }
    }

    /// Advance one day. Returns the new date.
    /// Panics if called while paused — callers must check.
    pub fn advance(&mut self) -> GameDate {
        assert!(!self.paused, "advance() called on paused clock");
        self.day_index += 1;
        self.today = self.today.succ_opt().expect("calendar overflow");
        self.today
    }

    /// True on the first day of a month — the monthly cadences key off this.
    pub fn month_start(&self) -> bool {
        use chrono::Datelike;
        self.today.day() == 1
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }
    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn set_speed(&mut self, speed: SimSpeed) {
        self.speed = speed;
    }

    pub fn days_per_real_second(&self) -> u32 {
        match self.speed {
            SimSpeed::Normal => 1,
            SimSpeed::Accelerated => 7,
            SimSpeed::FastForward => 30,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SimSpeed {
    Normal,      // 1 day/step
    Accelerated, // 7 days/step
    FastForward, // 30 days/step
}
