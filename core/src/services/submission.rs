use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::IndexError;
use crate::types::submission::{NewSubmissionDTO, Submission, SubmissionStatus};
use crate::IndexResult;

/// Moderation queue for user-submitted projects.
///
/// Submissions start `pending` and move to the terminal `approved` or
/// `rejected` states through admin review; a pending submission may also be
/// deleted outright.
pub trait SubmissionService: Send + Sync {
    fn submit(&self, new: NewSubmissionDTO) -> IndexResult<Submission>;
    fn list(&self, status: Option<SubmissionStatus>) -> Vec<Submission>;
    fn get_by_id(&self, id: &str) -> IndexResult<Submission>;
    fn pending_count(&self) -> usize;
    fn approve(&self, id: &str, review_notes: Option<String>) -> IndexResult<Submission>;
    fn reject(
        &self,
        id: &str,
        rejection_reason: &str,
        review_notes: Option<String>,
    ) -> IndexResult<Submission>;
    fn delete(&self, id: &str) -> IndexResult<()>;
}

#[derive(Default)]
pub struct InMemorySubmissionService {
    submissions: DashMap<String, Submission>,
}

impl InMemorySubmissionService {
    pub fn new() -> Self {
        Self::default()
    }
}

fn required(field: &str, value: &str) -> IndexResult<()> {
    if value.trim().is_empty() {
        return Err(IndexError::InvalidInput(format!(
            "Missing required field: {field}"
        )));
    }
    Ok(())
}

fn status_label(status: SubmissionStatus) -> &'static str {
    match status {
        SubmissionStatus::Pending => "pending",
        SubmissionStatus::Approved => "approved",
        SubmissionStatus::Rejected => "rejected",
    }
}

impl SubmissionService for InMemorySubmissionService {
    fn submit(&self, new: NewSubmissionDTO) -> IndexResult<Submission> {
        required("name", &new.name)?;
        required("category", &new.category)?;
        required("description", &new.description)?;

        let submission = Submission {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            project_type: new.project_type,
            category: new.category.trim().to_string(),
            description: new.description.trim().to_string(),
            url: new.url.unwrap_or_default(),
            github_url: new.github_url.unwrap_or_default(),
            license: new.license,
            tech_stack: new.tech_stack,
            self_hostable: new.self_hostable,
            submitted_by: new.submitted_by,
            submitter_email: new.submitter_email,
            status: SubmissionStatus::Pending,
            rejection_reason: None,
            review_notes: None,
            created_at: Utc::now(),
        };

        self.submissions
            .insert(submission.id.clone(), submission.clone());
        tracing::info!("New submission {} ({})", submission.name, submission.id);
        Ok(submission)
    }

    fn list(&self, status: Option<SubmissionStatus>) -> Vec<Submission> {
        let mut items: Vec<Submission> = self
            .submissions
            .iter()
            .filter(|entry| status.is_none_or(|s| entry.status == s))
            .map(|entry| entry.value().clone())
            .collect();
        // Newest first for the review queue.
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        items
    }

    fn get_by_id(&self, id: &str) -> IndexResult<Submission> {
        self.submissions
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| IndexError::NotFound(format!("Submission {id}")))
    }

    fn pending_count(&self) -> usize {
        self.submissions
            .iter()
            .filter(|entry| entry.status == SubmissionStatus::Pending)
            .count()
    }

    fn approve(&self, id: &str, review_notes: Option<String>) -> IndexResult<Submission> {
        let mut entry = self
            .submissions
            .get_mut(id)
            .ok_or_else(|| IndexError::NotFound(format!("Submission {id}")))?;

        if entry.status != SubmissionStatus::Pending {
            return Err(IndexError::InvalidState(format!(
                "Submission is already {}",
                status_label(entry.status)
            )));
        }

        entry.status = SubmissionStatus::Approved;
        entry.review_notes = review_notes.filter(|n| !n.trim().is_empty());
        tracing::info!("Approved submission {}", id);
        Ok(entry.value().clone())
    }

    fn reject(
        &self,
        id: &str,
        rejection_reason: &str,
        review_notes: Option<String>,
    ) -> IndexResult<Submission> {
        if rejection_reason.trim().is_empty() {
            return Err(IndexError::InvalidInput(
                "Rejection reason is required".to_string(),
            ));
        }

        let mut entry = self
            .submissions
            .get_mut(id)
            .ok_or_else(|| IndexError::NotFound(format!("Submission {id}")))?;

        if entry.status != SubmissionStatus::Pending {
            return Err(IndexError::InvalidState(format!(
                "Submission is already {}",
                status_label(entry.status)
            )));
        }

        entry.status = SubmissionStatus::Rejected;
        entry.rejection_reason = Some(rejection_reason.trim().to_string());
        entry.review_notes = review_notes.filter(|n| !n.trim().is_empty());
        tracing::info!("Rejected submission {}", id);
        Ok(entry.value().clone())
    }

    fn delete(&self, id: &str) -> IndexResult<()> {
        let entry = self
            .submissions
            .get(id)
            .ok_or_else(|| IndexError::NotFound(format!("Submission {id}")))?;

        if entry.status != SubmissionStatus::Pending {
            return Err(IndexError::InvalidState(format!(
                "Only pending submissions can be deleted, this one is {}",
                status_label(entry.status)
            )));
        }
        drop(entry);

        self.submissions.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::project::ProjectType;

    fn new_submission(name: &str) -> NewSubmissionDTO {
        NewSubmissionDTO {
            name: name.to_string(),
            project_type: ProjectType::OpenSource,
            category: "Database".to_string(),
            description: format!("{name} description"),
            url: None,
            github_url: None,
            license: Some("MIT".to_string()),
            tech_stack: None,
            self_hostable: true,
            submitted_by: Some("Alex".to_string()),
            submitter_email: Some("alex@example.com".to_string()),
        }
    }

    #[test]
    fn submit_starts_pending() {
        let service = InMemorySubmissionService::new();
        let submission = service.submit(new_submission("KeyDB")).unwrap();
        assert_eq!(submission.status, SubmissionStatus::Pending);
        assert_eq!(service.pending_count(), 1);
    }

    #[test]
    fn submit_rejects_blank_required_fields() {
        let service = InMemorySubmissionService::new();
        let mut dto = new_submission("KeyDB");
        dto.name = "  ".to_string();
        let err = service.submit(dto).unwrap_err();
        assert!(matches!(err, IndexError::InvalidInput(_)));
    }

    #[test]
    fn approve_moves_to_terminal_state() {
        let service = InMemorySubmissionService::new();
        let submission = service.submit(new_submission("KeyDB")).unwrap();

        let approved = service
            .approve(&submission.id, Some("Looks solid".to_string()))
            .unwrap();
        assert_eq!(approved.status, SubmissionStatus::Approved);
        assert_eq!(approved.review_notes.as_deref(), Some("Looks solid"));
        assert_eq!(service.pending_count(), 0);
    }

    #[test]
    fn approve_twice_is_invalid_state() {
        let service = InMemorySubmissionService::new();
        let submission = service.submit(new_submission("KeyDB")).unwrap();
        service.approve(&submission.id, None).unwrap();

        let err = service.approve(&submission.id, None).unwrap_err();
        assert!(matches!(err, IndexError::InvalidState(_)));
    }

    #[test]
    fn reject_requires_a_reason() {
        let service = InMemorySubmissionService::new();
        let submission = service.submit(new_submission("KeyDB")).unwrap();

        let err = service.reject(&submission.id, "   ", None).unwrap_err();
        assert!(matches!(err, IndexError::InvalidInput(_)));

        // The submission is untouched.
        let unchanged = service.get_by_id(&submission.id).unwrap();
        assert_eq!(unchanged.status, SubmissionStatus::Pending);
    }

    #[test]
    fn reject_records_the_reason() {
        let service = InMemorySubmissionService::new();
        let submission = service.submit(new_submission("KeyDB")).unwrap();

        let rejected = service
            .reject(&submission.id, "Duplicate of an existing listing", None)
            .unwrap();
        assert_eq!(rejected.status, SubmissionStatus::Rejected);
        assert_eq!(
            rejected.rejection_reason.as_deref(),
            Some("Duplicate of an existing listing")
        );
    }

    #[test]
    fn reject_after_approval_is_invalid_state() {
        let service = InMemorySubmissionService::new();
        let submission = service.submit(new_submission("KeyDB")).unwrap();
        service.approve(&submission.id, None).unwrap();

        let err = service
            .reject(&submission.id, "Changed my mind", None)
            .unwrap_err();
        assert!(matches!(err, IndexError::InvalidState(_)));
    }

    #[test]
    fn delete_only_from_pending() {
        let service = InMemorySubmissionService::new();
        let pending = service.submit(new_submission("KeyDB")).unwrap();
        let approved = service.submit(new_submission("Dragonfly")).unwrap();
        service.approve(&approved.id, None).unwrap();

        service.delete(&pending.id).unwrap();
        assert!(matches!(
            service.get_by_id(&pending.id).unwrap_err(),
            IndexError::NotFound(_)
        ));

        let err = service.delete(&approved.id).unwrap_err();
        assert!(matches!(err, IndexError::InvalidState(_)));
    }

    #[test]
    fn list_filters_by_status() {
        let service = InMemorySubmissionService::new();
        let first = service.submit(new_submission("KeyDB")).unwrap();
        service.submit(new_submission("Dragonfly")).unwrap();
        service.approve(&first.id, None).unwrap();

        assert_eq!(service.list(Some(SubmissionStatus::Pending)).len(), 1);
        assert_eq!(service.list(Some(SubmissionStatus::Approved)).len(), 1);
        assert_eq!(service.list(None).len(), 2);
    }

    #[test]
    fn missing_submission_is_not_found() {
        let service = InMemorySubmissionService::new();
        assert!(matches!(
            service.approve("missing", None).unwrap_err(),
            IndexError::NotFound(_)
        ));
        assert!(matches!(
            service.reject("missing", "reason", None).unwrap_err(),
            IndexError::NotFound(_)
        ));
        assert!(matches!(
            service.delete("missing").unwrap_err(),
            IndexError::NotFound(_)
        ));
    }
}
