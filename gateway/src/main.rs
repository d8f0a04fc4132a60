use actix_web::web::Data;
use clap::Parser;
use survivalindex_core::oracle::{HttpOracleClient, OracleError, SurvivalOracle};
use survivalindex_core::services::auth::{Account, AuthService, InMemoryAuthService};
use survivalindex_core::services::project::{InMemoryProjectService, ProjectService};
use survivalindex_core::services::submission::{InMemorySubmissionService, SubmissionService};
use survivalindex_core::types::user::Role;
use thiserror::Error;

mod cli;
mod config;
mod handlers;
mod http;
mod middleware;
mod seed;
mod tracing;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    ConfigError(#[from] config::ConfigError),
    #[error(transparent)]
    ServerError(#[from] http::ServerError),
    #[error(transparent)]
    OracleError(#[from] OracleError),
}

pub const LOGO: &str = r#"
  ____                  _           _ ___           _
 / ___| _   _ _ ____   _(_)_   ____ _| |_ _|_ __   __| | _____  __
 \___ \| | | | '__\ \ / / \ \ / / _` | || || '_ \ / _` |/ _ \ \/ /
  ___) | |_| | |   \ V /| |\ V / (_| | || || | | | (_| |  __/>  <
 |____/ \__,_|_|    \_/ |_| \_/ \__,_|_|___|_| |_|\__,_|\___/_/\_\
"#;

#[actix_web::main]
async fn main() -> Result<(), CliError> {
    dotenv::dotenv().ok();

    let cli = cli::Cli::parse();

    tracing::init_tracing();

    let config = config::Config::load(&cli.config)?.apply_cli_overrides(cli.serve_args());

    println!("{LOGO}");

    let projects: Data<Box<dyn ProjectService>> =
        Data::new(Box::new(InMemoryProjectService::new()) as Box<dyn ProjectService>);
    let submissions: Data<Box<dyn SubmissionService>> =
        Data::new(Box::new(InMemorySubmissionService::new()) as Box<dyn SubmissionService>);
    let auth: Data<Box<dyn AuthService>> =
        Data::new(Box::new(InMemoryAuthService::new(vec![Account {
            email: config.auth.admin_email.clone(),
            password: config.auth.admin_password.clone(),
            role: Role::Admin,
        }])) as Box<dyn AuthService>);
    let oracle: Data<Box<dyn SurvivalOracle>> =
        Data::new(Box::new(HttpOracleClient::new(&config.oracle)?) as Box<dyn SurvivalOracle>);

    seed::seed_projects(projects.get_ref().as_ref());

    let server = http::ApiServer::new(config);
    server.print_useful_info(projects.count());
    server
        .start(http::AppServices {
            projects,
            submissions,
            auth,
            oracle,
        })
        .await?;

    Ok(())
}
