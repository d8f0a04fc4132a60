use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{Datelike, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::IndexError;
use crate::scoring;
use crate::types::pagination::{paginate, Pagination};
use crate::types::project::{
    AiRating, IndexStats, NewProjectDTO, Project, ProjectFilter, ProjectType, RatingPatch,
    RatingVector, SortBy,
};
use crate::IndexResult;

pub const DEFAULT_LOGO: &str = "📦";

pub trait ProjectService: Send + Sync {
    fn list(
        &self,
        filter: &ProjectFilter,
        sort: SortBy,
        page: usize,
        limit: usize,
    ) -> IndexResult<(Vec<Project>, Pagination)>;
    fn get_by_id(&self, id: &str) -> IndexResult<Project>;
    fn create(&self, new: NewProjectDTO) -> IndexResult<Project>;
    fn apply_rating(&self, id: &str, ratings: &RatingPatch) -> IndexResult<Project>;
    fn apply_ai_rating(&self, id: &str, rating: AiRating) -> IndexResult<Project>;
    fn count(&self) -> usize;
    fn stats(&self) -> IndexStats;
    fn categories(&self) -> BTreeMap<String, Vec<Project>>;
    /// Inserts a fully formed project as-is. Seeding path; `create` is the
    /// API-facing constructor.
    fn insert(&self, project: Project);
}

#[derive(Default)]
pub struct InMemoryProjectService {
    projects: DashMap<String, Project>,
}

impl InMemoryProjectService {
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

fn by_name_then_id(a: &Project, b: &Project) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.id.cmp(&b.id))
}

impl ProjectService for InMemoryProjectService {
    fn list(
        &self,
        filter: &ProjectFilter,
        sort: SortBy,
        page: usize,
        limit: usize,
    ) -> IndexResult<(Vec<Project>, Pagination)> {
        let mut items: Vec<Project> = self
            .projects
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        if let Some(project_type) = filter.project_type {
            items.retain(|p| p.project_type == project_type);
        }
        if let Some(category) = &filter.category {
            items.retain(|p| p.category.eq_ignore_ascii_case(category));
        }
        if let Some(search) = &filter.search {
            items.retain(|p| p.matches_search(search));
        }

        // DashMap iteration order is unspecified, so ties fall back to name
        // then id to keep pages deterministic.
        match sort {
            SortBy::Score => items.sort_by(|a, b| {
                b.survival_score
                    .partial_cmp(&a.survival_score)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| by_name_then_id(a, b))
            }),
            SortBy::Votes => items.sort_by(|a, b| {
                b.total_votes
                    .cmp(&a.total_votes)
                    .then_with(|| by_name_then_id(a, b))
            }),
            SortBy::Name => items.sort_by(by_name_then_id),
        }

        Ok(paginate(items, page, limit))
    }

    fn get_by_id(&self, id: &str) -> IndexResult<Project> {
        self.projects
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| IndexError::NotFound(format!("Project {id}")))
    }

    fn create(&self, new: NewProjectDTO) -> IndexResult<Project> {
        required("name", &new.name)?;
        required("category", &new.category)?;
        required("description", &new.description)?;

        let ratings = RatingVector::uniform(5.0);
        let project = Project {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            project_type: new.project_type,
            category: new.category.trim().to_string(),
            description: new.description.trim().to_string(),
            url: new.url.unwrap_or_default(),
            github_url: new.github_url.unwrap_or_default(),
            logo: new
                .logo
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOGO.to_string()),
            tags: new.tags.unwrap_or_default(),
            year_created: new.year_created.unwrap_or_else(|| Utc::now().year()),
            survival_score: scoring::score(&ratings),
            ratings,
            total_votes: 0,
            ai_rating: None,
        };

        self.projects.insert(project.id.clone(), project.clone());
        tracing::info!("Created project {} ({})", project.name, project.id);
        Ok(project)
    }

    fn apply_rating(&self, id: &str, ratings: &RatingPatch) -> IndexResult<Project> {
        let mut entry = self
            .projects
            .get_mut(id)
            .ok_or_else(|| IndexError::NotFound(format!("Project {id}")))?;

        // Latest vote wins: the score reflects the submitted vector (absent
        // dimensions count as zero) and supplied keys overwrite the stored
        // ones. A per-voter ratings ledger would average instead.
        entry.survival_score = scoring::score(&ratings.to_vector());
        entry.ratings.apply(ratings);
        entry.total_votes += 1;

        Ok(entry.value().clone())
    }

    fn apply_ai_rating(&self, id: &str, rating: AiRating) -> IndexResult<Project> {
        let mut entry = self
            .projects
            .get_mut(id)
            .ok_or_else(|| IndexError::NotFound(format!("Project {id}")))?;

        entry.ratings = rating.ratings;
        entry.survival_score = rating.survival_score;
        entry.ai_rating = Some(rating);

        Ok(entry.value().clone())
    }

    fn count(&self) -> usize {
        self.projects.len()
    }

    fn stats(&self) -> IndexStats {
        let projects: Vec<Project> = self
            .projects
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        let total_projects = projects.len();
        let average_score = if total_projects == 0 {
            0.0
        } else {
            let sum: f64 = projects.iter().map(|p| p.survival_score).sum();
            (sum / total_projects as f64 * 10.0).round() / 10.0
        };

        IndexStats {
            total_projects,
            total_votes: projects.iter().map(|p| p.total_votes).sum(),
            s_tier_projects: projects.iter().filter(|p| p.survival_score >= 9.0).count(),
            open_source_count: projects
                .iter()
                .filter(|p| p.project_type == ProjectType::OpenSource)
                .count(),
            saas_count: projects
                .iter()
                .filter(|p| p.project_type == ProjectType::Saas)
                .count(),
            average_score,
        }
    }

    fn categories(&self) -> BTreeMap<String, Vec<Project>> {
        let mut grouped: BTreeMap<String, Vec<Project>> = BTreeMap::new();
        for entry in self.projects.iter() {
            grouped
                .entry(entry.category.clone())
                .or_default()
                .push(entry.value().clone());
        }
        for projects in grouped.values_mut() {
            projects.sort_by(by_name_then_id);
        }
        grouped
    }

    fn insert(&self, project: Project) {
        self.projects.insert(project.id.clone(), project);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_project(name: &str) -> NewProjectDTO {
        NewProjectDTO {
            name: name.to_string(),
            project_type: ProjectType::OpenSource,
            category: "Database".to_string(),
            description: format!("{name} description"),
            url: None,
            github_url: None,
            logo: None,
            tags: None,
            year_created: None,
        }
    }

    #[test]
    fn create_applies_defaults() {
        let service = InMemoryProjectService::new();
        let project = service.create(new_project("Test")).unwrap();

        assert_eq!(project.logo, DEFAULT_LOGO);
        assert_eq!(project.ratings, RatingVector::uniform(5.0));
        assert_eq!(project.survival_score, 5.0);
        assert_eq!(project.total_votes, 0);
        assert!(project.tags.is_empty());
        assert_eq!(project.year_created, Utc::now().year());
    }

    #[test]
    fn create_rejects_blank_required_fields() {
        let service = InMemoryProjectService::new();
        let mut dto = new_project("Test");
        dto.description = "   ".to_string();

        let err = service.create(dto).unwrap_err();
        assert!(matches!(err, IndexError::InvalidInput(_)));
        assert_eq!(service.count(), 0);
    }

    #[test]
    fn rating_round_trip_updates_score_and_votes() {
        let service = InMemoryProjectService::new();
        let project = service.create(new_project("Test")).unwrap();

        let vector = RatingVector {
            insight_compression: 9.0,
            substrate_efficiency: 8.0,
            broad_utility: 9.5,
            awareness: 7.0,
            agent_friction: 8.0,
            human_coefficient: 6.0,
        };
        service
            .apply_rating(&project.id, &RatingPatch::from(vector))
            .unwrap();

        let fetched = service.get_by_id(&project.id).unwrap();
        assert_eq!(fetched.survival_score, scoring::score(&vector));
        assert_eq!(fetched.total_votes, 1);
        assert_eq!(fetched.ratings, vector);
    }

    #[test]
    fn partial_rating_merges_only_supplied_keys() {
        let service = InMemoryProjectService::new();
        let project = service.create(new_project("Test")).unwrap();

        let patch = RatingPatch {
            broad_utility: Some(10.0),
            ..Default::default()
        };
        let updated = service.apply_rating(&project.id, &patch).unwrap();

        assert_eq!(updated.ratings.broad_utility, 10.0);
        assert_eq!(updated.ratings.awareness, 5.0);
        // Score is computed from the submitted vector alone.
        assert_eq!(updated.survival_score, 2.2);
    }

    #[test]
    fn rating_unknown_project_is_not_found() {
        let service = InMemoryProjectService::new();
        let err = service
            .apply_rating("missing", &RatingPatch::default())
            .unwrap_err();
        assert!(matches!(err, IndexError::NotFound(_)));
    }

    #[test]
    fn ai_rating_replaces_scores_and_is_stored() {
        let service = InMemoryProjectService::new();
        let project = service.create(new_project("Test")).unwrap();

        let verdict = AiRating {
            ratings: RatingVector::uniform(9.0),
            survival_score: 9.0,
            tier: crate::types::project::Tier::S,
            reasoning: Default::default(),
            suggestions: Default::default(),
            confidence: 0.85,
            analyzed_at: Utc::now(),
        };
        let updated = service.apply_ai_rating(&project.id, verdict).unwrap();

        assert_eq!(updated.survival_score, 9.0);
        assert_eq!(updated.ratings, RatingVector::uniform(9.0));
        assert!(updated.ai_rating.is_some());
    }

    #[test]
    fn search_matches_name_description_and_tags() {
        let service = InMemoryProjectService::new();
        let mut dto = new_project("Redis");
        dto.tags = Some(vec!["cache".to_string()]);
        service.create(dto).unwrap();

        let mut by_tag = new_project("KeyDB");
        by_tag.description = "Multithreaded fork".to_string();
        by_tag.tags = Some(vec!["redis-compatible".to_string()]);
        service.create(by_tag).unwrap();

        service.create(new_project("Postgres")).unwrap();

        let filter = ProjectFilter {
            search: Some("REDIS".to_string()),
            ..Default::default()
        };
        let (items, info) = service.list(&filter, SortBy::Name, 1, 12).unwrap();
        assert_eq!(info.total, 2);
        let names: Vec<&str> = items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["KeyDB", "Redis"]);
    }

    #[test]
    fn list_paginates_thirteen_projects_across_two_pages() {
        let service = InMemoryProjectService::new();
        for i in 0..13 {
            service.create(new_project(&format!("Project {i:02}"))).unwrap();
        }

        let filter = ProjectFilter::default();
        let (first, info) = service.list(&filter, SortBy::Score, 1, 12).unwrap();
        assert_eq!(first.len(), 12);
        assert!(info.has_next_page);

        let (second, info) = service.list(&filter, SortBy::Score, 2, 12).unwrap();
        assert_eq!(second.len(), 1);
        assert!(!info.has_next_page);
        assert!(info.has_prev_page);
    }

    #[test]
    fn default_sort_is_score_descending() {
        let service = InMemoryProjectService::new();
        let low = service.create(new_project("Low")).unwrap();
        let high = service.create(new_project("High")).unwrap();

        service
            .apply_rating(&high.id, &RatingPatch::from(RatingVector::uniform(9.0)))
            .unwrap();
        service
            .apply_rating(&low.id, &RatingPatch::from(RatingVector::uniform(2.0)))
            .unwrap();

        let (items, _) = service
            .list(&ProjectFilter::default(), SortBy::Score, 1, 12)
            .unwrap();
        assert_eq!(items[0].name, "High");
        assert_eq!(items[1].name, "Low");
    }

    #[test]
    fn filter_by_type_and_category() {
        let service = InMemoryProjectService::new();
        service.create(new_project("Postgres")).unwrap();

        let mut saas = new_project("Stripe");
        saas.project_type = ProjectType::Saas;
        saas.category = "Payments".to_string();
        service.create(saas).unwrap();

        let filter = ProjectFilter {
            project_type: Some(ProjectType::Saas),
            ..Default::default()
        };
        let (items, _) = service.list(&filter, SortBy::Score, 1, 12).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Stripe");

        let filter = ProjectFilter {
            category: Some("Database".to_string()),
            ..Default::default()
        };
        let (items, _) = service.list(&filter, SortBy::Score, 1, 12).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Postgres");
    }

    #[test]
    fn stats_aggregate_the_index() {
        let service = InMemoryProjectService::new();
        let a = service.create(new_project("A")).unwrap();
        let mut saas = new_project("B");
        saas.project_type = ProjectType::Saas;
        let b = service.create(saas).unwrap();

        service
            .apply_rating(&a.id, &RatingPatch::from(RatingVector::uniform(9.0)))
            .unwrap();
        service
            .apply_rating(&b.id, &RatingPatch::from(RatingVector::uniform(5.0)))
            .unwrap();

        let stats = service.stats();
        assert_eq!(stats.total_projects, 2);
        assert_eq!(stats.total_votes, 2);
        assert_eq!(stats.s_tier_projects, 1);
        assert_eq!(stats.open_source_count, 1);
        assert_eq!(stats.saas_count, 1);
        assert_eq!(stats.average_score, 7.0);
    }
}
