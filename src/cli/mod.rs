pub mod migrate;
pub mod purge;
pub mod serve;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "inlet")]
#[command(version)]
#[command(about = "A small webhook capture inbox", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    Serve {
        #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(short, long, env = "PORT", default_value = "8080")]
        port: u16,
        #[arg(long, env = "DB_PATH", default_value = "./webhooks.db")]
        db_path: String,
    },
    Migrate {
        #[arg(long, env = "DB_PATH", default_value = "./webhooks.db")]
        db_path: String,
    },
    Purge {
        #[arg(long, env = "DB_PATH", default_value = "./webhooks.db")]
        db_path: String,
        #[arg(long)]
        yes: bool,
    },
}
