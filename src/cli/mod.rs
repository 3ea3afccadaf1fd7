// CLI module - process entry points
pub mod migrate;
pub mod seed;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::app_data::AppData;
use crate::config::{DatabaseConnections, SecretManager, ServerSettings};

/// Cocktail catalog backend
#[derive(Parser)]
#[command(name = "cocktail-backend")]
#[command(about = "Cocktail catalog REST backend", long_about = None)]
pub struct Cli {
    /// Defaults to `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Apply pending migrations, then run the HTTP server
    Serve,

    /// Apply pending migrations and exit
    Migrate,

    /// Replace all data with the fixture set
    Seed,
}

/// Execute CLI command
///
/// Routes the parsed CLI command to the appropriate handler function.
///
/// # Returns
/// * `Ok(())` - Command executed successfully
/// * `Err(...)` - Configuration, database or server failure
pub async fn execute_command(cli: Cli, settings: ServerSettings) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Migrate => {
            migrate::run_migrations(&settings).await?;
        }
        Commands::Seed => {
            let app_data = prepare_app_data(&settings).await?;
            let summary = seed::seed_database(&app_data).await?;
            tracing::info!(
                "Seeded {} users, {} cocktails, {} reviews",
                summary.users,
                summary.cocktails,
                summary.reviews
            );
        }
        Commands::Serve => {
            let app_data = prepare_app_data(&settings).await?;
            serve::run_server(&settings, app_data).await?;
        }
    }

    Ok(())
}

/// Load secrets, connect, migrate and build the shared application data
async fn prepare_app_data(settings: &ServerSettings) -> Result<AppData, Box<dyn std::error::Error>> {
    let secrets = SecretManager::init()?;
    tracing::debug!("Secrets loaded: {}", secrets);

    let connections = DatabaseConnections::init(settings).await?;
    connections.migrate().await?;

    Ok(AppData::init(connections, &secrets))
}
