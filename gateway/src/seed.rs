use survivalindex_core::services::project::ProjectService;
use survivalindex_core::types::project::{Project, ProjectType, RatingVector};
use uuid::Uuid;

/// Seeds the store with the reference projects if it is empty.
pub fn seed_projects(projects: &dyn ProjectService) {
    if projects.count() > 0 {
        tracing::info!("Found {} existing projects, skipping seed", projects.count());
        return;
    }

    for project in reference_projects() {
        projects.insert(project);
    }
    tracing::info!("Seeded {} reference projects", projects.count());
}

#[allow(clippy::too_many_arguments)]
fn project(
    name: &str,
    project_type: ProjectType,
    category: &str,
    description: &str,
    url: &str,
    github_url: &str,
    logo: &str,
    ratings: RatingVector,
    survival_score: f64,
    total_votes: u64,
    tags: &[&str],
    year_created: i32,
) -> Project {
    Project {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        project_type,
        category: category.to_string(),
        description: description.to_string(),
        url: url.to_string(),
        github_url: github_url.to_string(),
        logo: logo.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        year_created,
        ratings,
        survival_score,
        total_votes,
        ai_rating: None,
    }
}

fn reference_projects() -> Vec<Project> {
    vec![
        project(
            "PostgreSQL",
            ProjectType::OpenSource,
            "Database",
            "Advanced open source relational database",
            "https://postgresql.org",
            "https://github.com/postgres/postgres",
            "🐘",
            RatingVector {
                insight_compression: 9.2,
                substrate_efficiency: 9.5,
                broad_utility: 9.8,
                awareness: 9.7,
                agent_friction: 7.8,
                human_coefficient: 8.5,
            },
            9.1,
            2847,
            &["sql", "acid", "enterprise"],
            1996,
        ),
        project(
            "Git",
            ProjectType::OpenSource,
            "Version Control",
            "Distributed version control system",
            "https://git-scm.com",
            "https://github.com/git/git",
            "📦",
            RatingVector {
                insight_compression: 10.0,
                substrate_efficiency: 9.8,
                broad_utility: 10.0,
                awareness: 10.0,
                agent_friction: 8.5,
                human_coefficient: 7.5,
            },
            9.6,
            5621,
            &["vcs", "distributed", "essential"],
            2005,
        ),
        project(
            "Redis",
            ProjectType::OpenSource,
            "Cache/Database",
            "In-memory data structure store",
            "https://redis.io",
            "https://github.com/redis/redis",
            "⚡",
            RatingVector {
                insight_compression: 8.9,
                substrate_efficiency: 9.7,
                broad_utility: 9.2,
                awareness: 9.4,
                agent_friction: 8.8,
                human_coefficient: 7.8,
            },
            9.0,
            3102,
            &["cache", "fast", "versatile"],
            2009,
        ),
        project(
            "Stripe",
            ProjectType::Saas,
            "Payments",
            "Payment processing platform",
            "https://stripe.com",
            "",
            "💳",
            RatingVector {
                insight_compression: 8.5,
                substrate_efficiency: 8.2,
                broad_utility: 8.8,
                awareness: 9.5,
                agent_friction: 9.2,
                human_coefficient: 8.8,
            },
            8.8,
            4215,
            &["payments", "api-first", "documentation"],
            2010,
        ),
        project(
            "Nginx",
            ProjectType::OpenSource,
            "Web Server",
            "High-performance HTTP server and reverse proxy",
            "https://nginx.org",
            "https://github.com/nginx/nginx",
            "🌐",
            RatingVector {
                insight_compression: 9.0,
                substrate_efficiency: 9.6,
                broad_utility: 9.4,
                awareness: 9.3,
                agent_friction: 7.5,
                human_coefficient: 7.2,
            },
            8.9,
            2956,
            &["web-server", "reverse-proxy", "stable"],
            2004,
        ),
        project(
            "SQLite",
            ProjectType::OpenSource,
            "Database",
            "Self-contained serverless SQL database",
            "https://sqlite.org",
            "",
            "🗄️",
            RatingVector {
                insight_compression: 9.5,
                substrate_efficiency: 9.9,
                broad_utility: 9.6,
                awareness: 9.0,
                agent_friction: 9.5,
                human_coefficient: 8.0,
            },
            9.4,
            3890,
            &["embedded", "zero-config", "reliable"],
            2000,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use survivalindex_core::services::project::InMemoryProjectService;
    use survivalindex_core::types::project::{ProjectFilter, SortBy};

    #[test]
    fn seed_populates_an_empty_store_once() {
        let service = InMemoryProjectService::new();
        seed_projects(&service);
        assert_eq!(service.count(), 6);

        // A second pass leaves the store alone.
        seed_projects(&service);
        assert_eq!(service.count(), 6);
    }

    #[test]
    fn seeded_projects_are_searchable() {
        let service = InMemoryProjectService::new();
        seed_projects(&service);

        let filter = ProjectFilter {
            search: Some("redis".to_string()),
            ..Default::default()
        };
        let (items, _) = service.list(&filter, SortBy::Score, 1, 12).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Redis");
    }
}
