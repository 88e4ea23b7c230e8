//! SQLite connection wrapper (lightweight for CLI usage).

use crate::utils::path::expand_tilde;
use rusqlite::{Connection, Result};

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(expand_tilde(path))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }
}
