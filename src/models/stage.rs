use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidStageError;

/// A pipeline stage. Declaration order is board order.
///
/// - `Planning`: work is being scoped
/// - `Development`: work is being built
/// - `Qa`: work is under quality assurance
/// - `Deployment`: work is being shipped
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Planning,
    Development,
    Qa,
    Deployment,
}

impl Stage {
    /// All stages in board order.
    pub const ALL: [Stage; 4] = [
        Stage::Planning,
        Stage::Development,
        Stage::Qa,
        Stage::Deployment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Development => "development",
            Self::Qa => "qa",
            Self::Deployment => "deployment",
        }
    }

    /// Human-facing heading used by renderers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::Development => "Development",
            Self::Qa => "QA",
            Self::Deployment => "Deployment",
        }
    }

    /// Position of the stage in board order.
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

/// Parse an untrusted stage name. Only the canonical lowercase names match.
pub fn parse_stage(raw: &str) -> Result<Stage, InvalidStageError> {
    match raw {
        "planning" => Ok(Stage::Planning),
        "development" => Ok(Stage::Development),
        "qa" => Ok(Stage::Qa),
        "deployment" => Ok(Stage::Deployment),
        _ => Err(InvalidStageError(raw.to_string())),
    }
}

impl FromStr for Stage {
    type Err = InvalidStageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_stage(s)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_stage() {
        for stage in Stage::ALL {
            assert_eq!(parse_stage(stage.as_str()), Ok(stage));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        assert_eq!(
            parse_stage("sqa"),
            Err(InvalidStageError("sqa".to_string()))
        );
        assert!(parse_stage("Planning").is_err());
        assert!(parse_stage("").is_err());
    }

    #[test]
    fn test_stages_are_ordered_by_declaration() {
        assert!(Stage::Planning < Stage::Development);
        assert!(Stage::Development < Stage::Qa);
        assert!(Stage::Qa < Stage::Deployment);
        assert_eq!(Stage::Deployment.index(), 3);
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        let json = serde_json::to_string(&Stage::Qa).unwrap();
        assert_eq!(json, "\"qa\"");
        let stage: Stage = serde_json::from_str("\"deployment\"").unwrap();
        assert_eq!(stage, Stage::Deployment);
    }
}
