//! PDCA phases
//!
//! Plan, Do, Check, Act. The declaration order is the canonical order used
//! everywhere a plan is assembled or displayed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ToolshedError;

/// One of the four PDCA phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    Plan,
    Do,
    Check,
    Act,
}

impl Phase {
    /// All phases in canonical order
    pub const ALL: [Phase; 4] = [Phase::Plan, Phase::Do, Phase::Check, Phase::Act];

    /// Display name ("Plan", "Do", ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plan => "Plan",
            Self::Do => "Do",
            Self::Check => "Check",
            Self::Act => "Act",
        }
    }

    /// Position in canonical order
    pub fn index(&self) -> usize {
        match self {
            Self::Plan => 0,
            Self::Do => 1,
            Self::Check => 2,
            Self::Act => 3,
        }
    }

    /// Parse a catalog cell. Blank or unrecognized values are unclassified.
    pub fn from_cell(cell: &str) -> Option<Self> {
        cell.parse().ok()
    }

    /// Toolbox color as RGB components
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Plan => (0xFF, 0xD7, 0x00),
            Self::Do => (0x32, 0xCD, 0x32),
            Self::Check => (0x1E, 0x90, 0xFF),
            Self::Act => (0xFF, 0x45, 0x00),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = ToolshedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plan" => Ok(Self::Plan),
            "do" => Ok(Self::Do),
            "check" => Ok(Self::Check),
            "act" => Ok(Self::Act),
            _ => Err(ToolshedError::InvalidPhase(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let names: Vec<&str> = Phase::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["Plan", "Do", "Check", "Act"]);
        for (i, phase) in Phase::ALL.iter().enumerate() {
            assert_eq!(phase.index(), i);
        }
    }

    #[test]
    fn test_ord_follows_canonical_order() {
        let mut phases = vec![Phase::Act, Phase::Plan, Phase::Check, Phase::Do];
        phases.sort();
        assert_eq!(phases, Phase::ALL.to_vec());
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("plan".parse::<Phase>().unwrap(), Phase::Plan);
        assert_eq!("DO".parse::<Phase>().unwrap(), Phase::Do);
        assert_eq!("  Check ".parse::<Phase>().unwrap(), Phase::Check);
        assert_eq!("Act".parse::<Phase>().unwrap(), Phase::Act);
    }

    #[test]
    fn test_parse_invalid() {
        let err = "Study".parse::<Phase>().unwrap_err();
        assert!(matches!(err, ToolshedError::InvalidPhase(s) if s == "Study"));
    }

    #[test]
    fn test_from_cell_blank_is_unclassified() {
        assert_eq!(Phase::from_cell(""), None);
        assert_eq!(Phase::from_cell("   "), None);
        assert_eq!(Phase::from_cell("Plan"), Some(Phase::Plan));
    }

    #[test]
    fn test_colors() {
        assert_eq!(Phase::Plan.rgb(), (255, 215, 0));
        assert_eq!(Phase::Act.rgb(), (255, 69, 0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Phase::Check.to_string(), "Check");
    }
}
