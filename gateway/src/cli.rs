use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "survivalindex",
    about = "Crowdsourced survival ratings for software projects"
)]
pub struct Cli {
    /// Path to the YAML config file.
    #[arg(short, long, default_value = "config.yaml")]
    pub config: String,

    #[command(flatten)]
    pub serve_args: ServeArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API server.
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Address to bind the HTTP server to.
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind the HTTP server to.
    #[arg(long)]
    pub port: Option<u16>,

    /// Comma-separated list of allowed CORS origins.
    #[arg(long)]
    pub cors_origins: Option<String>,
}

impl Cli {
    /// Serve arguments, whether given as a subcommand or flattened flags.
    pub fn serve_args(&self) -> &ServeArgs {
        match &self.command {
            Some(Commands::Serve(args)) => args,
            None => &self.serve_args,
        }
    }
}
