use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use workspace_cloner::config::AppConfig;
use workspace_cloner::database::seed_data::create_template_workspace;
use workspace_cloner::database::{
    establish_connection, get_database_url, migrate_database, MigrateDirection,
};
use workspace_cloner::AppContext;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true, default_value = "workspace-cloner.yaml")]
    config: PathBuf,
    /// Overrides `database.path` from the config file
    #[clap(short, long, global = true)]
    database: Option<String>,
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Db {
        #[clap(subcommand)]
        command: DbCommands,
    },
    /// Create the sample template workspace and register it
    Seed,
    User {
        #[clap(subcommand)]
        command: UserCommands,
    },
    /// Clone the examples workspace for a user and print the outcome
    Clone {
        #[clap(short, long)]
        user: String,
    },
}

#[derive(Subcommand, Debug)]
enum DbCommands {
    Init,
    Migrate {
        #[clap(subcommand)]
        direction: MigrateDirection,
    },
}

#[derive(Subcommand, Debug)]
enum UserCommands {
    Create {
        #[clap(short, long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(args.log_level.as_deref())?;

    let config = AppConfig::load(&args.config)?;
    let database = args.database.unwrap_or_else(|| config.database.path.clone());
    let db = establish_connection(&get_database_url(Some(&database)))
        .await
        .with_context(|| format!("Failed to open database {}", database))?;

    match args.command {
        Commands::Db { command } => match command {
            DbCommands::Init => {
                info!("Initializing database: {}", database);
                migrate_database(&db, MigrateDirection::Up).await?;
            }
            DbCommands::Migrate { direction } => {
                info!("Running database migration: {:?}", direction);
                migrate_database(&db, direction).await?;
            }
        },
        Commands::Seed => {
            let context = AppContext::new(db, &config);
            let workspace_id = create_template_workspace(context.store(), context.codec()).await?;
            let configured = context.config_service().template_workspace_id().await?;
            info!("Template workspace: {:?}", configured);
            println!("{}", workspace_id);
        }
        Commands::User { command } => match command {
            UserCommands::Create { email } => {
                let context = AppContext::new(db, &config);
                let user = context.user_service().create_user(&email).await?;
                info!("Created user {}", email);
                println!("{}", user.id.unwrap_or_default());
            }
        },
        Commands::Clone { user } => {
            let context = AppContext::new(db, &config);
            info!("Cloning examples workspace for user {}", user);
            let outcome = context.cloner().clone_examples_workspace(&user).await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}

fn setup_logging(log_level: Option<&str>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(log_level)?)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Accepts a bare level or a full filter directive such as `info,workspace_cloner=debug`
fn log_filter(log_level: Option<&str>) -> Result<EnvFilter> {
    let directives = log_level.unwrap_or("info").to_lowercase();
    EnvFilter::try_new(format!("sqlx=warn,{}", directives))
        .with_context(|| format!("Invalid log level '{}'", directives))
}
