//! # Database State
//!
//! Wraps the `Database` connection for use in commands.
//!
//! ## Thread Safety
//! The `Database` from `orden-db` holds a `SqlitePool`, which is
//! thread-safe on its own. Write ordering comes from the form lock, not
//! from here: commands save while they still hold [`FormState`].
//!
//! [`FormState`]: super::FormState

use orden_db::Database;

/// Wrapper around `Database` for shell state.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
