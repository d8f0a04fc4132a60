use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::IndexError;
use crate::types::project::{NewProjectDTO, ProjectType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

impl FromStr for SubmissionStatus {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SubmissionStatus::Pending),
            "approved" => Ok(SubmissionStatus::Approved),
            "rejected" => Ok(SubmissionStatus::Rejected),
            other => Err(IndexError::InvalidInput(format!(
                "Unknown submission status: {other}"
            ))),
        }
    }
}

/// A user-proposed project waiting for admin moderation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<String>,
    #[serde(default)]
    pub self_hostable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitter_email: Option<String>,
    pub status: SubmissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Submission> for NewProjectDTO {
    /// Project fields carried over when an approved submission is listed.
    fn from(submission: &Submission) -> Self {
        NewProjectDTO {
            name: submission.name.clone(),
            project_type: submission.project_type,
            category: submission.category.clone(),
            description: submission.description.clone(),
            url: Some(submission.url.clone()),
            github_url: Some(submission.github_url.clone()),
            logo: None,
            tags: None,
            year_created: None,
        }
    }
}

/// Fields accepted from the public submission form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmissionDTO {
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
    pub license: Option<String>,
    #[serde(default)]
    pub tech_stack: Option<String>,
    #[serde(default)]
    pub self_hostable: bool,
    #[serde(default)]
    pub submitted_by: Option<String>,
    #[serde(default)]
    pub submitter_email: Option<String>,
}
