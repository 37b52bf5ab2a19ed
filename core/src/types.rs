//! Shared primitive types used across the entire workforce core.

use serde::{Deserialize, Serialize};

/// In-game calendar date. One engine tick = one day.
pub type GameDate = chrono::NaiveDate;

pub type EmployeeId = u32;
pub type CandidateId = u32;
pub type PostingId = u32;
pub type ApplicantId = u32;
pub type ComplaintId = u32;
pub type GameId = u32;

/// The five competencies tracked per person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    Development,
    Design,
    Art,
    Music,
    Service,
}

impl SkillKind {
    pub const ALL: [SkillKind; 5] = [
        SkillKind::Development,
        SkillKind::Design,
        SkillKind::Art,
        SkillKind::Music,
        SkillKind::Service,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Design => "design",
            Self::Art => "art",
            Self::Music => "music",
            Self::Service => "service",
        }
    }
}

/// The closed profession set. Each position carries exactly one
/// associated skill slot — no free-text matching anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Programmer,
    Designer,
    Artist,
    Composer,
    SupportAgent,
}

impl Position {
    pub const ALL: [Position; 5] = [
        Position::Programmer,
        Position::Designer,
        Position::Artist,
        Position::Composer,
        Position::SupportAgent,
    ];

    /// The skill slot this profession exercises.
    pub fn skill(&self) -> SkillKind {
        match self {
            Self::Programmer => SkillKind::Development,
            Self::Designer => SkillKind::Design,
            Self::Artist => SkillKind::Art,
            Self::Composer => SkillKind::Music,
            Self::SupportAgent => SkillKind::Service,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Programmer => "programmer",
            Self::Designer => "designer",
            Self::Artist => "artist",
            Self::Composer => "composer",
            Self::SupportAgent => "support_agent",
        }
    }
}

/// Skill levels, 0–5 each. Generated people have exactly one non-zero
/// slot; manually created employees may violate that, so consumers must
/// never assume exclusivity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSet {
    pub development: u8,
    pub design: u8,
    pub art: u8,
    pub music: u8,
    pub service: u8,
}

impl SkillSet {
    /// A skill set with a single non-zero slot, clamped to [0, 5].
    pub fn exclusive(kind: SkillKind, level: u8) -> Self {
        let mut skills = Self::default();
        skills.set(kind, level);
        skills
    }

    pub fn get(&self, kind: SkillKind) -> u8 {
        match kind {
            SkillKind::Development => self.development,
            SkillKind::Design => self.design,
            SkillKind::Art => self.art,
            SkillKind::Music => self.music,
            SkillKind::Service => self.service,
        }
    }

    pub fn set(&mut self, kind: SkillKind, level: u8) {
        let level = level.min(5);
        match kind {
            SkillKind::Development => self.development = level,
            SkillKind::Design => self.design = level,
            SkillKind::Art => self.art = level,
            SkillKind::Music => self.music = level,
            SkillKind::Service => self.service = level,
        }
    }

    /// The highest level across all five slots.
    pub fn max_level(&self) -> u8 {
        SkillKind::ALL
            .iter()
            .map(|k| self.get(*k))
            .max()
            .unwrap_or(0)
    }
}

/// A hired staff member on the studio roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub position: Position,
    pub skills: SkillSet,
    pub salary: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessModel {
    SinglePlayer,
    Online,
}

/// A shipped product that can attract support complaints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleasedGame {
    pub id: GameId,
    pub name: String,
    pub business_model: BusinessModel,
    /// Delisted games stop generating complaints.
    pub live: bool,
}

/// The caller-owned world state. The engine and every component mutate
/// this through explicit parameters — nothing in the core holds a copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudioWorld {
    pub roster: Vec<Employee>,
    pub products: Vec<ReleasedGame>,
    pub funds: i64,
    pub fans: i64,
}

impl StudioWorld {
    /// Next roster id: max(existing) + 1, or 1 for an empty roster.
    pub fn next_employee_id(&self) -> EmployeeId {
        self.roster.iter().map(|e| e.id).max().map_or(1, |id| id + 1)
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.roster.iter().find(|e| e.id == id)
    }

    pub fn remove_employee(&mut self, id: EmployeeId) -> Option<Employee> {
        let idx = self.roster.iter().position(|e| e.id == id)?;
        Some(self.roster.remove(idx))
    }

    /// Staff holding the support role, the only people auto-assignment
    /// may route complaints to.
    pub fn support_agents(&self) -> Vec<&Employee> {
        self.roster
            .iter()
            .filter(|e| e.position == Position::SupportAgent)
            .collect()
    }

    /// Names already taken on the roster; candidate generation must not
    /// collide with these.
    pub fn roster_names(&self) -> std::collections::HashSet<String> {
        self.roster.iter().map(|e| e.name.clone()).collect()
    }
}
