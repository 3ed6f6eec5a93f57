//! Match configuration
//!
//! Static inputs to a recalculation: the overs limit, the chase target, optional
//! pointer hints from the scoring surface, and the roster used for display names.
//!
//! The engine accepts any config as-is. [`MatchConfig::validate`] exists for
//! callers at the boundary (JSON API, CLI) that want to reject nonsense early.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CreaseError, Result};
use crate::models::PlayerId;

pub const DEFAULT_OVERS_LIMIT: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    #[serde(alias = "oversLimit")]
    pub overs_limit: u32,
    pub target: Option<u32>,
    #[serde(alias = "currentStrikerId")]
    pub current_striker_id: Option<PlayerId>,
    #[serde(alias = "currentNonStrikerId")]
    pub current_non_striker_id: Option<PlayerId>,
    #[serde(alias = "currentBowlerId")]
    pub current_bowler_id: Option<PlayerId>,
    /// Player id -> display name.
    pub roster: BTreeMap<PlayerId, String>,
    #[serde(alias = "maxOversPerBowler")]
    pub max_overs_per_bowler: Option<u32>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            overs_limit: DEFAULT_OVERS_LIMIT,
            target: None,
            current_striker_id: None,
            current_non_striker_id: None,
            current_bowler_id: None,
            roster: BTreeMap::new(),
            max_overs_per_bowler: None,
        }
    }
}

impl MatchConfig {
    pub fn new(overs_limit: u32) -> Self {
        Self { overs_limit, ..Default::default() }
    }

    pub fn with_target(mut self, target: u32) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_pointers(
        mut self,
        striker_id: impl Into<PlayerId>,
        non_striker_id: impl Into<PlayerId>,
    ) -> Self {
        self.current_striker_id = Some(striker_id.into());
        self.current_non_striker_id = Some(non_striker_id.into());
        self
    }

    pub fn with_bowler(mut self, bowler_id: impl Into<PlayerId>) -> Self {
        self.current_bowler_id = Some(bowler_id.into());
        self
    }

    pub fn with_player(mut self, id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        self.roster.insert(id.into(), name.into());
        self
    }

    pub fn with_max_overs_per_bowler(mut self, max_overs: u32) -> Self {
        self.max_overs_per_bowler = Some(max_overs);
        self
    }

    /// Display name for a player, empty when the roster does not know them.
    pub fn player_name(&self, id: &str) -> &str {
        self.roster.get(id).map(String::as_str).unwrap_or("")
    }

    /// Parse and validate a config document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.overs_limit == 0 {
            return Err(CreaseError::InvalidConfig(
                "overs_limit must be at least 1".to_string(),
            ));
        }
        if self.target == Some(0) {
            return Err(CreaseError::InvalidConfig("target must be at least 1".to_string()));
        }
        if let Some(max) = self.max_overs_per_bowler {
            if max == 0 || max > self.overs_limit {
                return Err(CreaseError::InvalidConfig(format!(
                    "max_overs_per_bowler must be 1-{}, got {}",
                    self.overs_limit, max
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_twenty_overs() {
        let config: MatchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.overs_limit, 20);
        assert_eq!(config.target, None);
        assert!(config.roster.is_empty());
    }

    #[test]
    fn from_json_accepts_camel_case() {
        let json = r#"{
            "oversLimit": 10,
            "target": 91,
            "currentStrikerId": "p1",
            "roster": { "p1": "Asha Rao" },
            "maxOversPerBowler": 2
        }"#;
        let config = MatchConfig::from_json(json).unwrap();
        assert_eq!(config.overs_limit, 10);
        assert_eq!(config.target, Some(91));
        assert_eq!(config.current_striker_id.as_deref(), Some("p1"));
        assert_eq!(config.player_name("p1"), "Asha Rao");
        assert_eq!(config.player_name("nobody"), "");
    }

    #[test]
    fn validate_rejects_bad_bounds() {
        assert!(MatchConfig::new(0).validate().is_err());
        assert!(MatchConfig::new(20).with_target(0).validate().is_err());
        assert!(MatchConfig::new(20).with_max_overs_per_bowler(21).validate().is_err());
        assert!(MatchConfig::new(20).with_max_overs_per_bowler(0).validate().is_err());
        assert!(MatchConfig::new(20).with_target(150).with_max_overs_per_bowler(4).validate().is_ok());
    }

    #[test]
    fn from_json_reports_validation_errors() {
        let err = MatchConfig::from_json(r#"{ "overs_limit": 0 }"#).unwrap_err();
        assert!(matches!(err, CreaseError::InvalidConfig(_)));

        let err = MatchConfig::from_json(r#"{ "overs_limit": "x" }"#).unwrap_err();
        assert!(matches!(err, CreaseError::Json(_)));

        let err = MatchConfig::from_json("\"twenty\"").unwrap_err();
        assert!(matches!(err, CreaseError::Json(_)));
    }
}
