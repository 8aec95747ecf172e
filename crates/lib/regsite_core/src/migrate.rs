//! Database migration support.
//!
//! Runs the `.sql` files of a migrations directory in filename order. Each
//! file is expected to be idempotent on its own (`CREATE ... IF NOT EXISTS`),
//! so running the whole set again is harmless.

use std::path::{Path, PathBuf};

use sqlx::PgPool;
use thiserror::Error;
use tracing::{error, info};

/// Errors that can occur while applying migrations.
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("Cannot read migrations in {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Migration {file} failed: {source}")]
    Apply {
        file: String,
        #[source]
        source: sqlx::Error,
    },
}

/// One migration file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    /// File name, used for ordering and logging.
    pub name: String,
    pub path: PathBuf,
}

/// Returns the migrations directory shipped with this crate.
pub fn default_migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

/// List `.sql` files in `dir`, sorted lexicographically by file name.
pub async fn migration_files(dir: &Path) -> Result<Vec<MigrationFile>, MigrateError> {
    let read_err = |source| MigrateError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(read_err)?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(read_err)? {
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "sql") {
            continue;
        }
        if !entry.file_type().await.map_err(read_err)?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        files.push(MigrationFile { name, path });
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

/// Apply every migration in `dir` to `pool`, one file at a time.
///
/// Stops at the first failing file. Returns the number of files applied.
pub async fn migrate(pool: &PgPool, dir: &Path) -> Result<usize, MigrateError> {
    let files = migration_files(dir).await?;
    for file in &files {
        let sql = tokio::fs::read_to_string(&file.path)
            .await
            .map_err(|source| MigrateError::Read {
                path: file.path.clone(),
                source,
            })?;

        info!(migration = %file.name, "applying migration");
        if let Err(source) = sqlx::raw_sql(&sql).execute(pool).await {
            error!(migration = %file.name, error = %source, "migration failed");
            return Err(MigrateError::Apply {
                file: file.name.clone(),
                source,
            });
        }
    }
    info!(count = files.len(), "migrations applied");
    Ok(files.len())
}
