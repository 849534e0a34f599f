//! JSON file persistence. The whole state is read once before serving and
//! written once after shutdown.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{info, warn};

use crate::error::DbError;
use crate::models::Tables;
use crate::Database;

impl Database {
    /// Open the store from `path`. A missing or unreadable file yields empty
    /// tables; the failure is logged, never returned.
    pub fn load(path: &Path) -> Self {
        let tables = match read_tables(path) {
            Ok(tables) => {
                info!(
                    "Loaded {} users, {} messages, {} blocks from {}",
                    tables.users.len(),
                    tables.messages.len(),
                    tables.blocks.len(),
                    path.display()
                );
                tables
            }
            Err(DbError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No storage at {}, starting empty", path.display());
                Tables::default()
            }
            Err(e) => {
                warn!("Ignoring storage at {}: {}", path.display(), e);
                Tables::default()
            }
        };
        Self::new(tables)
    }

    pub fn save(&self, path: &Path) -> Result<(), DbError> {
        let tables = self.snapshot()?;
        write_tables(path, &tables)?;
        info!("Saved data to {}", path.display());
        Ok(())
    }
}

pub fn read_tables(path: &Path) -> Result<Tables, DbError> {
    let raw = fs::read(path)?;
    Ok(serde_json::from_slice(&raw)?)
}

/// Write `tables` pretty-printed with four-space indentation.
pub fn write_tables(path: &Path, tables: &Tables) -> Result<(), DbError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    tables.serialize(&mut ser)?;
    fs::write(path, buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn populated() -> Tables {
        let mut tables = Tables::default();
        tables.create_user("alice".into(), "a!a!a!a!a!a!a!a!".into());
        tables.create_user("bob".into(), "b#b#b#b#b#b#b#b#".into());
        tables.insert_message(0, "hi".into());
        tables.insert_message(1, "<i>raw</i>".into());
        tables.insert_block(1, 0);
        tables
    }

    #[test]
    fn save_then_load_is_lossless() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        let db = Database::new(populated());
        db.save(&path).unwrap();

        let reloaded = Database::load(&path);
        assert_eq!(reloaded.snapshot().unwrap(), populated());
    }

    #[test]
    fn on_disk_shape_uses_pairs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        write_tables(&path, &populated()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(value["users"][0], serde_json::json!(["alice", "a!a!a!a!a!a!a!a!"]));
        assert_eq!(value["messages"][1], serde_json::json!([1, "<i>raw</i>"]));
        assert_eq!(value["blocks"][0], serde_json::json!([1, 0]));
    }

    #[test]
    fn missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let db = Database::load(&dir.path().join("absent.json"));
        assert_eq!(db.snapshot().unwrap(), Tables::default());
    }

    #[test]
    fn garbage_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, b"{ not json").unwrap();

        let db = Database::load(&path);
        assert_eq!(db.snapshot().unwrap(), Tables::default());
    }

    #[test]
    fn missing_keys_default_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, br#"{"users": [["alice", "tok"]]}"#).unwrap();

        let tables = read_tables(&path).unwrap();
        assert_eq!(tables.users.len(), 1);
        assert!(tables.messages.is_empty());
        assert!(tables.blocks.is_empty());
    }
}
