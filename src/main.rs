use std::path::Path;

use clap::Parser;

use cocktail_backend::cli::{self, Cli};
use cocktail_backend::config::{EnvironmentProvider, ServerSettings, SystemEnvironment, init_logging, load_dotenv, load_env_file};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ENV_FILE names an explicit file; otherwise look for .env
    let env_file = match SystemEnvironment.get_non_empty("ENV_FILE") {
        Some(path) => load_env_file(Path::new(&path))?,
        None => load_dotenv()?,
    };

    let cli = Cli::parse();

    init_logging()?;

    match &env_file {
        Some(path) => tracing::info!("Loaded environment from {}", path.display()),
        None => tracing::debug!("No env file found; using process environment only"),
    }

    let settings = ServerSettings::from_env()?;
    tracing::info!("Configuration loaded: {:?}", settings);

    cli::execute_command(cli, settings).await
}
