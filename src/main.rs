use clap::Parser;
use inlet::cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inlet=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve {
            host,
            port,
            db_path,
        }) => {
            inlet::cli::serve::run(&host, port, &db_path).await?;
        }
        Some(Commands::Migrate { db_path }) => {
            inlet::cli::migrate::run(&db_path)?;
        }
        Some(Commands::Purge { db_path, yes }) => {
            inlet::cli::purge::run(&db_path, yes)?;
        }
        None => {
            // No subcommand provided, print help
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
