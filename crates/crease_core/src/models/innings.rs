//! Innings snapshot and the figures it carries
//!
//! Every value here is rebuilt from scratch on each recalculation. Nothing is
//! mutated after the engine hands the snapshot back.

use serde::{Deserialize, Serialize};

use super::ball::{DismissalKind, Extras, PlayerId};

// ============================================================================
// Partnerships
// ============================================================================

/// The partnership currently at the crease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partnership {
    pub runs: u32,
    pub balls: u32,
    pub overs: String,
}

impl Default for Partnership {
    fn default() -> Self {
        Self { runs: 0, balls: 0, overs: "0.0".to_string() }
    }
}

/// One batter's contribution to a partnership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnershipShare {
    pub batter_id: PlayerId,
    pub runs: u32,
    pub balls: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnershipRecord {
    /// 1 for the opening stand, 2 for the second wicket stand, ...
    pub for_wicket: u32,
    pub runs: u32,
    pub balls: u32,
    pub overs: String,
    pub batters: Vec<PartnershipShare>,
    /// Team wicket number that broke the stand; `None` while unbroken.
    pub ended_by_wicket: Option<u32>,
}

// ============================================================================
// Player figures
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallOfWicket {
    pub wicket: u32,
    pub runs: u32,
    pub overs: String,
    pub batter_id: PlayerId,
    pub batter_name: String,
    pub dismissal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattingFigures {
    pub batter_id: PlayerId,
    pub name: String,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub strike_rate: Option<f64>,
    pub not_out: bool,
    /// Scorecard phrase, e.g. "c Smith b Jones".
    pub dismissal: Option<String>,
    pub dismissal_kind: Option<DismissalKind>,
}

impl BattingFigures {
    pub fn new(batter_id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            batter_id: batter_id.into(),
            name: name.into(),
            runs: 0,
            balls: 0,
            fours: 0,
            sixes: 0,
            strike_rate: None,
            not_out: true,
            dismissal: None,
            dismissal_kind: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlingFigures {
    pub bowler_id: PlayerId,
    pub name: String,
    pub balls_bowled: u32,
    pub overs: String,
    pub runs_conceded: u32,
    pub wickets: u32,
    pub maidens: u32,
    pub wides: u32,
    pub no_balls: u32,
    pub economy: Option<f64>,
    pub average: Option<f64>,
    pub strike_rate: Option<f64>,
    pub can_bowl_more: bool,
}

impl BowlingFigures {
    pub fn new(bowler_id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            bowler_id: bowler_id.into(),
            name: name.into(),
            balls_bowled: 0,
            overs: "0.0".to_string(),
            runs_conceded: 0,
            wickets: 0,
            maidens: 0,
            wides: 0,
            no_balls: 0,
            economy: None,
            average: None,
            strike_rate: None,
            can_bowl_more: true,
        }
    }
}

// ============================================================================
// Over-by-over records
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryKind {
    Dot,
    Run,
    Four,
    Six,
    Wide,
    NoBall,
    Bye,
    LegBye,
    Wicket,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub sequence: u64,
    /// Short display token: "W", "4", "Wd2", "1lb", ...
    pub badge: String,
    pub kind: DeliveryKind,
    pub runs_off_bat: u32,
    pub total_runs: u32,
    pub is_legal: bool,
    pub free_hit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverRecord {
    /// 1-based.
    pub over_number: u32,
    /// Bowler of the over's first delivery.
    pub bowler_id: PlayerId,
    pub deliveries: Vec<DeliveryRecord>,
    pub legal_balls: u32,
    pub runs: u32,
    pub bowler_runs: u32,
    pub wickets: u32,
    pub is_complete: bool,
    pub is_maiden: bool,
}

// ============================================================================
// Progress and status
// ============================================================================

/// Score after a given delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressPoint {
    pub sequence: u64,
    pub legal_balls: u32,
    pub overs: String,
    pub runs: u32,
    pub wickets: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastBallSummary {
    pub sequence: u64,
    pub runs: u32,
    pub is_wicket: bool,
    pub is_boundary: bool,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InningsStatus {
    InProgress,
    AllOut,
    OversComplete,
    TargetReached,
}

impl InningsStatus {
    pub fn is_finished(self) -> bool {
        !matches!(self, InningsStatus::InProgress)
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Complete derived state of one innings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InningsSnapshot {
    pub total_runs: u32,
    pub total_wickets: u32,
    pub legal_balls: u32,
    pub overs: String,
    pub balls_in_current_over: u32,
    /// 0-based number of the over in progress (equals completed overs).
    pub current_over_number: u32,
    pub current_run_rate: f64,

    pub target: Option<u32>,
    pub runs_needed: Option<i64>,
    pub remaining_balls: u32,
    pub required_run_rate: Option<f64>,
    pub projected_total: Option<u32>,

    pub partnership: Partnership,
    pub partnerships: Vec<PartnershipRecord>,
    pub extras: Extras,
    pub fall_of_wickets: Vec<FallOfWicket>,
    /// First-appearance order.
    pub batting: Vec<BattingFigures>,
    /// First-appearance order.
    pub bowling: Vec<BowlingFigures>,
    pub overs_log: Vec<OverRecord>,
    pub current_over: Vec<DeliveryRecord>,
    pub progression: Vec<ProgressPoint>,
    pub last_ball: Option<LastBallSummary>,

    pub striker_id: Option<PlayerId>,
    pub non_striker_id: Option<PlayerId>,
    pub bowler_id: Option<PlayerId>,
    pub bowler_change_due: bool,
    pub free_hit_next: bool,
    pub status: InningsStatus,
}

impl InningsSnapshot {
    pub fn batter(&self, batter_id: &str) -> Option<&BattingFigures> {
        self.batting.iter().find(|b| b.batter_id == batter_id)
    }

    pub fn bowler(&self, bowler_id: &str) -> Option<&BowlingFigures> {
        self.bowling.iter().find(|b| b.bowler_id == bowler_id)
    }

    pub fn is_chase(&self) -> bool {
        self.target.is_some()
    }
}
