//! Over-by-over delivery records
//!
//! Deliveries are filed under the over label captured before any counter moves,
//! so the sixth legal ball lands in the over it completes and a wide bowled after
//! it opens the next one.

use crate::models::{BallEvent, DeliveryKind, DeliveryRecord, OverRecord, PlayerId};

/// Badge and kind for one delivery.
pub fn delivery_record(ball: &BallEvent, legal: bool, free_hit: bool) -> DeliveryRecord {
    let (kind, badge) = classify(ball);
    DeliveryRecord {
        sequence: ball.sequence,
        badge,
        kind,
        runs_off_bat: ball.runs_off_bat,
        total_runs: ball.total_runs,
        is_legal: legal,
        free_hit,
    }
}

fn classify(ball: &BallEvent) -> (DeliveryKind, String) {
    if ball.is_wicket() {
        return (DeliveryKind::Wicket, "W".to_string());
    }
    if ball.is_wide() {
        return (DeliveryKind::Wide, extra_badge("Wd", ball.total_runs));
    }
    if ball.is_no_ball() {
        return (DeliveryKind::NoBall, extra_badge("Nb", ball.total_runs));
    }
    match ball.runs_off_bat {
        6 => return (DeliveryKind::Six, "6".to_string()),
        4 => return (DeliveryKind::Four, "4".to_string()),
        _ => {}
    }
    if ball.extras.leg_byes > 0 {
        return (DeliveryKind::LegBye, format!("{}lb", ball.extras.leg_byes));
    }
    if ball.extras.byes > 0 {
        return (DeliveryKind::Bye, format!("{}b", ball.extras.byes));
    }

    let kind = if ball.total_runs == 0 { DeliveryKind::Dot } else { DeliveryKind::Run };
    (kind, ball.runs_off_bat.to_string())
}

fn extra_badge(prefix: &str, total: u32) -> String {
    if total <= 1 {
        prefix.to_string()
    } else {
        format!("{prefix}{total}")
    }
}

#[derive(Debug, Clone)]
struct OpenOver {
    record: OverRecord,
    single_bowler: bool,
}

/// Result of closing an over: who bowled it and whether it was a maiden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedOver {
    pub bowler_id: PlayerId,
    pub is_maiden: bool,
}

#[derive(Debug, Clone, Default)]
pub struct OverLog {
    overs: Vec<OpenOver>,
}

impl OverLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a delivery under the 0-based over it was bowled in.
    pub fn record(
        &mut self,
        over_index: u32,
        ball: &BallEvent,
        delivery: DeliveryRecord,
        bowler_runs: u32,
    ) {
        let over_number = over_index + 1;
        let needs_new = self
            .overs
            .last()
            .map_or(true, |open| open.record.over_number != over_number);
        if needs_new {
            self.overs.push(OpenOver {
                record: OverRecord {
                    over_number,
                    bowler_id: ball.bowler_id.clone(),
                    deliveries: Vec::new(),
                    legal_balls: 0,
                    runs: 0,
                    bowler_runs: 0,
                    wickets: 0,
                    is_complete: false,
                    is_maiden: false,
                },
                single_bowler: true,
            });
        }

        let Some(open) = self.overs.last_mut() else {
            return;
        };
        if open.record.bowler_id != ball.bowler_id {
            open.single_bowler = false;
        }
        let over = &mut open.record;
        if delivery.is_legal {
            over.legal_balls += 1;
        }
        over.runs = over.runs.saturating_add(ball.total_runs);
        over.bowler_runs = over.bowler_runs.saturating_add(bowler_runs);
        if ball.is_wicket() {
            over.wickets += 1;
        }
        over.deliveries.push(delivery);
    }

    /// Mark the over in progress as complete.
    pub fn complete_current(&mut self) -> Option<CompletedOver> {
        let open = self.overs.last_mut()?;
        let over = &mut open.record;
        over.is_complete = true;
        over.is_maiden = open.single_bowler && over.bowler_runs == 0;
        Some(CompletedOver { bowler_id: over.bowler_id.clone(), is_maiden: over.is_maiden })
    }

    /// Deliveries of the over still in progress; empty right after an over ends.
    pub fn current_over(&self) -> Vec<DeliveryRecord> {
        match self.overs.last() {
            Some(open) if !open.record.is_complete => open.record.deliveries.clone(),
            _ => Vec::new(),
        }
    }

    pub fn into_records(self) -> Vec<OverRecord> {
        self.overs.into_iter().map(|open| open.record).collect()
    }
}
