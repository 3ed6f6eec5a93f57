//! Running partnership and partnership history
//!
//! The running stand resets the moment a wicket falls. The history keeps every
//! stand, and the runs of the dismissal ball stay with the stand it ended, so the
//! history always sums to the team total.

use crate::models::{BallEvent, Partnership, PartnershipRecord, PartnershipShare};
use crate::rules::format_overs;

#[derive(Debug, Clone, Default)]
pub struct PartnershipTracker {
    runs: u32,
    balls: u32,
    shares: Vec<PartnershipShare>,
    history: Vec<PartnershipRecord>,
}

impl PartnershipTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one delivery to the current stand.
    ///
    /// `batter_runs` and `faced` are the striker's credited runs and whether the
    /// delivery counts as a ball faced.
    pub fn add_delivery(
        &mut self,
        ball: &BallEvent,
        striker_id: &str,
        non_striker_id: &str,
        legal: bool,
        batter_runs: u32,
        faced: bool,
    ) {
        self.runs = self.runs.saturating_add(ball.total_runs);
        if legal {
            self.balls += 1;
        }

        self.share_mut(non_striker_id);
        if let Some(share) = self.share_mut(striker_id) {
            share.runs = share.runs.saturating_add(batter_runs);
            if faced {
                share.balls += 1;
            }
        }
    }

    /// Close the current stand, broken by team wicket number `wicket`.
    pub fn break_stand(&mut self, wicket: u32) {
        let record = self.current_record(Some(wicket));
        self.history.push(record);
        self.runs = 0;
        self.balls = 0;
        self.shares.clear();
    }

    pub fn current(&self) -> Partnership {
        Partnership { runs: self.runs, balls: self.balls, overs: format_overs(self.balls) }
    }

    /// History including the unbroken stand, if anything happened in it.
    pub fn into_history(mut self) -> Vec<PartnershipRecord> {
        if self.runs > 0 || self.balls > 0 || !self.shares.is_empty() {
            let open = self.current_record(None);
            self.history.push(open);
        }
        self.history
    }

    fn current_record(&self, ended_by_wicket: Option<u32>) -> PartnershipRecord {
        PartnershipRecord {
            for_wicket: self.history.len() as u32 + 1,
            runs: self.runs,
            balls: self.balls,
            overs: format_overs(self.balls),
            batters: self.shares.clone(),
            ended_by_wicket,
        }
    }

    fn share_mut(&mut self, batter_id: &str) -> Option<&mut PartnershipShare> {
        if batter_id.is_empty() {
            return None;
        }
        let slot = match self.shares.iter().position(|s| s.batter_id == batter_id) {
            Some(slot) => slot,
            None => {
                self.shares.push(PartnershipShare {
                    batter_id: batter_id.to_string(),
                    runs: 0,
                    balls: 0,
                });
                self.shares.len() - 1
            }
        };
        self.shares.get_mut(slot)
    }
}
