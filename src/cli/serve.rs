use crate::{web, Config, Database};
use anyhow::Result;

pub async fn run(host: &str, port: u16, db_path: &str) -> Result<()> {
    let config = Config {
        host: host.to_string(),
        port,
        db_path: db_path.to_string(),
    };

    let db = Database::open(&config.db_path)?;
    db.migrate()?;

    let addr = config.addr();
    tracing::info!("Starting server at http://{}", addr);

    web::serve(config, db, &addr).await?;

    Ok(())
}
