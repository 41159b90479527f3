//! Database commands — `plantdesk init` and `plantdesk show`.

use std::sync::Arc;

use anyhow::{Context, Result};

use plantdesk::config::PlantdeskConfig;
use plantdesk::refdata::db::ReferenceDb;
use plantdesk::refdata::models::ReferenceKind;
use plantdesk::refdata::resolver::Resolver;
use plantdesk::refdata::server::{open_database, store_handle};

pub fn cmd_init(config: &PlantdeskConfig, seed: bool) -> Result<()> {
    let db_path = &config.server.db_path;
    let db = open_database(db_path)?;
    println!("Reference database initialized at {}", db_path.display());

    if seed {
        for (kind, inserted) in db.seed_all().context("Failed to seed reference data")? {
            if inserted > 0 {
                tracing::info!(%kind, inserted, "seeded built-in rows");
                println!("  {}: seeded {} rows", kind.table(), inserted);
            } else {
                println!("  {}: already populated, left unchanged", kind.table());
            }
        }
    }
    Ok(())
}

/// Resolve `kind` exactly as the HTTP API would and print the rows.
///
/// Read-only: a missing database is not created, it is treated as
/// unavailable storage.
pub async fn cmd_show(config: &PlantdeskConfig, kind: ReferenceKind) -> Result<()> {
    let db_path = &config.server.db_path;
    let store = store_handle(ReferenceDb::open_existing(db_path), db_path);
    let resolver = Resolver::new(Arc::new(store), &config.fallback);

    let resolved = resolver.resolve(kind).await?;
    eprintln!("{}: {} rows from {}", kind, resolved.rows.len(), resolved.source);
    println!(
        "{}",
        serde_json::to_string_pretty(&resolved.rows).context("Failed to serialize rows")?
    );
    Ok(())
}
