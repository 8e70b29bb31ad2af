use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BreakType {
    Lunch,
    Rest,
    Meeting,
}

impl BreakType {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            BreakType::Lunch => "lunch",
            BreakType::Rest => "rest",
            BreakType::Meeting => "meeting",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "lunch" => Some(BreakType::Lunch),
            "rest" => Some(BreakType::Rest),
            "meeting" => Some(BreakType::Meeting),
            _ => None,
        }
    }

    /// Case-insensitive parse of user/config input.
    pub fn from_input(s: &str) -> Option<Self> {
        Self::from_db_str(&s.trim().to_lowercase())
    }
}

impl fmt::Display for BreakType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
