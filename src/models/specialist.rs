use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::city::Coordinates;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SpecialistCategory {
    GeneralPractitioner,
    Psychiatrist,
    Cardiologist,
}

impl SpecialistCategory {
    pub const ALL: [SpecialistCategory; 3] = [
        SpecialistCategory::GeneralPractitioner,
        SpecialistCategory::Psychiatrist,
        SpecialistCategory::Cardiologist,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SpecialistCategory::GeneralPractitioner => "general_practitioner",
            SpecialistCategory::Psychiatrist => "psychiatrist",
            SpecialistCategory::Cardiologist => "cardiologist",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SpecialistCategory::GeneralPractitioner => "General Practitioner",
            SpecialistCategory::Psychiatrist => "Psychiatrist",
            SpecialistCategory::Cardiologist => "Cardiologist",
        }
    }
}

impl fmt::Display for SpecialistCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Accepts either the display name or the snake_case key, ignoring case.
impl FromStr for SpecialistCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SpecialistCategory::ALL
            .into_iter()
            .find(|c| {
                c.display_name().eq_ignore_ascii_case(wanted) || c.key().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("unknown specialist category '{}'", wanted))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SpecialistMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub category: SpecialistCategory,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub user_id: String,
    pub city: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub user_id: String,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub user_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchResponse {
    pub state: String,
    pub city: Option<String>,
    pub center: Option<Coordinates>,
    pub category: Option<SpecialistCategory>,
    pub markers: Vec<SpecialistMarker>,
}
