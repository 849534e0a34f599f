pub mod error;
pub mod models;
pub mod queries;
pub mod storage;

use std::sync::Mutex;

pub use error::DbError;
pub use models::{BlockRow, MessageRow, Tables, UserRow};

/// Shared in-memory store for users, messages and blocks.
///
/// All three tables live behind one lock. Callers that check and then
/// mutate must do both inside a single `with_tables_mut` call.
pub struct Database {
    tables: Mutex<Tables>,
}

impl Database {
    pub fn new(tables: Tables) -> Self {
        Self {
            tables: Mutex::new(tables),
        }
    }

    /// Empty store that is never read from or written to disk.
    pub fn in_memory() -> Self {
        Self::new(Tables::default())
    }

    pub fn with_tables<F, T>(&self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&Tables) -> T,
    {
        let tables = self.tables.lock().map_err(|e| DbError::Poisoned(e.to_string()))?;
        Ok(f(&tables))
    }

    pub fn with_tables_mut<F, T>(&self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&mut Tables) -> T,
    {
        let mut tables = self.tables.lock().map_err(|e| DbError::Poisoned(e.to_string()))?;
        Ok(f(&mut tables))
    }

    /// Copy of the current tables, taken under the lock.
    pub fn snapshot(&self) -> Result<Tables, DbError> {
        self.with_tables(Tables::clone)
    }
}
