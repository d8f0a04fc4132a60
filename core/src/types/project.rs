use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IndexError;

/// The six qualitative dimensions every project is rated on.
///
/// A full vector always carries all six values; partial updates come in as
/// [`RatingPatch`] and are merged key by key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RatingVector {
    pub insight_compression: f64,
    pub substrate_efficiency: f64,
    pub broad_utility: f64,
    pub awareness: f64,
    pub agent_friction: f64,
    pub human_coefficient: f64,
}

impl RatingVector {
    /// Vector with every dimension set to the same value.
    pub fn uniform(value: f64) -> Self {
        Self {
            insight_compression: value,
            substrate_efficiency: value,
            broad_utility: value,
            awareness: value,
            agent_friction: value,
            human_coefficient: value,
        }
    }

    /// Overwrites only the dimensions present in the patch.
    pub fn apply(&mut self, patch: &RatingPatch) {
        if let Some(v) = patch.insight_compression {
            self.insight_compression = v;
        }
        if let Some(v) = patch.substrate_efficiency {
            self.substrate_efficiency = v;
        }
        if let Some(v) = patch.broad_utility {
            self.broad_utility = v;
        }
        if let Some(v) = patch.awareness {
            self.awareness = v;
        }
        if let Some(v) = patch.agent_friction {
            self.agent_friction = v;
        }
        if let Some(v) = patch.human_coefficient {
            self.human_coefficient = v;
        }
    }
}

/// Partial rating vector as submitted by a voter. Absent dimensions are left
/// untouched on merge and contribute zero when scored on their own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RatingPatch {
    pub insight_compression: Option<f64>,
    pub substrate_efficiency: Option<f64>,
    pub broad_utility: Option<f64>,
    pub awareness: Option<f64>,
    pub agent_friction: Option<f64>,
    pub human_coefficient: Option<f64>,
}

impl RatingPatch {
    /// Dense view of the patch with absent dimensions as 0.0.
    pub fn to_vector(self) -> RatingVector {
        RatingVector {
            insight_compression: self.insight_compression.unwrap_or(0.0),
            substrate_efficiency: self.substrate_efficiency.unwrap_or(0.0),
            broad_utility: self.broad_utility.unwrap_or(0.0),
            awareness: self.awareness.unwrap_or(0.0),
            agent_friction: self.agent_friction.unwrap_or(0.0),
            human_coefficient: self.human_coefficient.unwrap_or(0.0),
        }
    }
}

impl From<RatingVector> for RatingPatch {
    fn from(v: RatingVector) -> Self {
        Self {
            insight_compression: Some(v.insight_compression),
            substrate_efficiency: Some(v.substrate_efficiency),
            broad_utility: Some(v.broad_utility),
            awareness: Some(v.awareness),
            agent_friction: Some(v.agent_friction),
            human_coefficient: Some(v.human_coefficient),
        }
    }
}

/// Letter grade derived from the survival score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    S,
    A,
    B,
    C,
    D,
    F,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::S => "S",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
            Tier::F => "F",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectType {
    #[serde(rename = "open-source")]
    OpenSource,
    #[serde(rename = "saas")]
    Saas,
}

impl FromStr for ProjectType {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open-source" => Ok(ProjectType::OpenSource),
            "saas" => Ok(ProjectType::Saas),
            other => Err(IndexError::InvalidInput(format!(
                "Unknown project type: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub github_url: String,
    pub logo: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub year_created: i32,
    pub ratings: RatingVector,
    pub survival_score: f64,
    pub total_votes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_rating: Option<AiRating>,
}

impl Project {
    /// Case-insensitive substring match against name, description and tags.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self
                .tags
                .iter()
                .any(|t| t.to_lowercase().contains(&needle))
    }
}

/// Fields accepted when listing a new project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProjectDTO {
    pub name: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub year_created: Option<i32>,
}

/// Full oracle verdict for a project. Replaces any prior verdict when stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRating {
    pub ratings: RatingVector,
    pub survival_score: f64,
    pub tier: Tier,
    pub reasoning: AiReasoning,
    pub suggestions: AiSuggestions,
    pub confidence: f64,
    pub analyzed_at: DateTime<Utc>,
}

/// Per-dimension explanations plus an overall narrative.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AiReasoning {
    pub insight_compression: String,
    pub substrate_efficiency: String,
    pub broad_utility: String,
    pub awareness: String,
    pub agent_friction: String,
    pub human_coefficient: String,
    pub overall: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AiSuggestions {
    pub top_priorities: Vec<String>,
    pub quick_wins: Vec<String>,
    pub long_term: Vec<String>,
}

/// Filters for project listing. All criteria are ANDed together.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub project_type: Option<ProjectType>,
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Score,
    Votes,
    Name,
}

/// Aggregate figures for the whole index.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub total_projects: usize,
    pub total_votes: u64,
    pub s_tier_projects: usize,
    pub open_source_count: usize,
    pub saas_count: usize,
    pub average_score: f64,
}
