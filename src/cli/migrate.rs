use crate::Database;
use anyhow::Result;

pub fn run(db_path: &str) -> Result<()> {
    let db = Database::open(db_path)?;
    db.migrate()?;
    tracing::info!("Migrations complete");
    Ok(())
}
