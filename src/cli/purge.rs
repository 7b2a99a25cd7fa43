use crate::services::captures;
use crate::Database;
use anyhow::Result;

pub fn run(db_path: &str, yes: bool) -> Result<()> {
    let db = Database::open(db_path)?;
    db.migrate()?;

    if !yes {
        let count = captures::count_captures(&db)?;
        println!(
            "{} capture(s) stored. Re-run with --yes to delete them.",
            count
        );
        return Ok(());
    }

    let deleted = captures::delete_all(&db)?;
    println!("Deleted {} capture(s).", deleted);

    Ok(())
}
