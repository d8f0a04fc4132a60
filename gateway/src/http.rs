use crate::config::Config;
use crate::handlers::{self, ai_judge, auth, projects, submissions};
use actix_cors::Cors;
use actix_web::web::JsonConfig;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpServer,
};
use serde::{Deserialize, Serialize};
use survivalindex_core::oracle::SurvivalOracle;
use survivalindex_core::services::auth::AuthService;
use survivalindex_core::services::project::ProjectService;
use survivalindex_core::services::submission::SubmissionService;
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
pub enum CorsOptions {
    Permissive,
    Custom(Vec<String>, usize),
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Actix(#[from] std::io::Error),
}

/// Shared service handles, cloned into every worker.
#[derive(Clone)]
pub struct AppServices {
    pub projects: web::Data<Box<dyn ProjectService>>,
    pub submissions: web::Data<Box<dyn SubmissionService>>,
    pub auth: web::Data<Box<dyn AuthService>>,
    pub oracle: web::Data<Box<dyn SurvivalOracle>>,
}

#[derive(Clone, Debug)]
pub struct ApiServer {
    config: Config,
}

impl ApiServer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn print_useful_info(&self, project_count: usize) {
        println!("\n🌐 SurvivalIndex API starting up:");
        println!(
            "   🚀 HTTP server ready at: \x1b[36mhttp://{}:{}\x1b[0m",
            self.config.http.host, self.config.http.port
        );
        println!("   📊 Loaded {project_count} projects");

        println!("\n⚡ Quick Start ⚡");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
        println!(
            "\x1b[33mcurl \x1b[36mhttp://{}:{}/api/projects?sortBy=score\x1b[0m",
            self.config.http.host, self.config.http.port
        );
        println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!();
    }

    pub async fn start(self, services: AppServices) -> Result<(), ServerError> {
        let cors_options = self.cors_options();
        let server = HttpServer::new(move || {
            let cors = Self::get_cors(cors_options.clone());
            Self::create_app_entry(cors, services.clone())
        })
        .bind((self.config.http.host.as_str(), self.config.http.port))?
        .run();

        server.await.map_err(ServerError::Actix)
    }

    fn cors_options(&self) -> CorsOptions {
        let origins = &self.config.http.cors_allowed_origins;
        if origins.iter().any(|o| o == "*") {
            CorsOptions::Permissive
        } else {
            CorsOptions::Custom(origins.clone(), 3600)
        }
    }

    fn create_app_entry(
        cors: Cors,
        services: AppServices,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Response = ServiceResponse<impl MessageBody>,
            Config = (),
            InitError = (),
            Error = actix_web::Error,
        >,
    > {
        let json_config = JsonConfig::default().limit(1024 * 1024); // 1MB in bytes

        App::new()
            .app_data(json_config)
            .app_data(services.projects)
            .app_data(services.submissions)
            .app_data(services.auth)
            .app_data(services.oracle)
            .route("/health", web::get().to(handlers::health))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/projects")
                            .route("", web::get().to(projects::list_projects))
                            .route("", web::post().to(projects::create_project))
                            .route("/{id}", web::get().to(projects::get_project))
                            .route("/{id}/rate", web::post().to(projects::rate_project)),
                    )
                    .service(web::scope("/ai-judge").route(
                        "/evaluate/{id}",
                        web::post().to(ai_judge::evaluate_project),
                    ))
                    .service(
                        web::scope("/auth")
                            .route("/login", web::post().to(auth::login))
                            .route("/logout", web::post().to(auth::logout))
                            .route("/me", web::get().to(auth::me)),
                    )
                    .service(
                        web::scope("/submissions")
                            .route("", web::get().to(submissions::list_submissions))
                            .route("", web::post().to(submissions::create_submission))
                            .route(
                                "/pending/count",
                                web::get().to(submissions::pending_count),
                            )
                            .route("/{id}", web::get().to(submissions::get_submission))
                            .route(
                                "/{id}/approve",
                                web::post().to(submissions::approve_submission),
                            )
                            .route(
                                "/{id}/reject",
                                web::post().to(submissions::reject_submission),
                            )
                            .route("/{id}", web::delete().to(submissions::delete_submission)),
                    )
                    .route("/stats", web::get().to(handlers::stats))
                    .route("/categories", web::get().to(handlers::categories)),
            )
            .wrap(cors)
    }

    fn get_cors(cors: CorsOptions) -> Cors {
        match cors {
            CorsOptions::Permissive => Cors::permissive(),
            CorsOptions::Custom(origins, max_age) => origins
                .into_iter()
                .fold(Cors::default(), |cors, origin| cors.allowed_origin(&origin))
                .max_age(max_age),
        }
    }
}
