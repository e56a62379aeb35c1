use crate::error::{Result, StoreError};
use log::{debug, info, warn};
use rusqlite::backup::Backup;
use rusqlite::{Connection, params};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;

// --- Schema Definition ---

const DROP_MAIN_TABLE: &str = "DROP TABLE IF EXISTS main;";

const CREATE_MAIN_TABLE: &str = "
CREATE TABLE main (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    word    VARCHAR NOT NULL,
    meaning VARCHAR NOT NULL
);";

const CREATE_WORD_INDEX: &str = "CREATE INDEX word ON main (word ASC);";

const DROP_SYN_TABLE: &str = "DROP TABLE IF EXISTS syn;";

// No foreign key on word_id: the StarDict synonym file may reference
// entries that never made it into the main table, and the converted
// database mirrors that tolerance.
const CREATE_SYN_TABLE: &str = "
CREATE TABLE syn (
    synonym VARCHAR NOT NULL,
    word_id INTEGER
);";

const CREATE_SYNONYM_INDEX: &str = "CREATE INDEX synonym ON syn (synonym ASC);";

// --- Insert Statements ---

const INSERT_WORD: &str = "INSERT INTO main (word, meaning) VALUES (?1, ?2)";
const INSERT_SYNONYM: &str = "INSERT INTO syn (synonym, word_id) VALUES (?1, ?2)";

/// A dictionary store under construction.
///
/// Owns a single in-memory SQLite database that an external StarDict reader
/// populates through [`insert_word`](DictStore::insert_word) and
/// [`insert_synonym`](DictStore::insert_synonym), and which
/// [`persist`](DictStore::persist) materializes to a `.db` file named after
/// the dictionary. All operations are synchronous and the store provides no
/// internal locking; callers using it from more than one thread must
/// serialize access themselves.
pub struct DictStore {
    conn: Connection,
    output_path: PathBuf,
}

impl DictStore {
    /// Opens a fresh in-memory database for the dictionary `name` and
    /// (re)creates the schema. The eventual output file lands in the current
    /// directory; see [`create_in`](DictStore::create_in) to choose another.
    pub fn create(name: &str) -> Result<Self> {
        Self::create_in(name, Path::new("."))
    }

    /// Like [`create`](DictStore::create), but places the output file under
    /// `dir` when the store is persisted.
    pub fn create_in(name: &str, dir: impl AsRef<Path>) -> Result<Self> {
        let output_path = dir.as_ref().join(output_file_name(name));
        info!(
            "Creating in-memory dictionary store (output target: {:?})",
            output_path
        );
        let conn = Connection::open_in_memory().map_err(StoreError::Setup)?;
        let mut store = DictStore { conn, output_path };
        store.recreate_schema()?;
        Ok(store)
    }

    /// Drops both tables if they exist and creates them anew, along with the
    /// ascending `word` and `synonym` indexes. Destructive: any rows inserted
    /// so far are discarded.
    pub fn recreate_schema(&mut self) -> Result<()> {
        info!("Initializing database schema (dropping any existing tables)...");
        let tx = self.conn.transaction().map_err(StoreError::Setup)?;

        tx.execute(DROP_MAIN_TABLE, []).map_err(StoreError::Setup)?;
        tx.execute(CREATE_MAIN_TABLE, []).map_err(StoreError::Setup)?;
        tx.execute(CREATE_WORD_INDEX, []).map_err(StoreError::Setup)?;

        tx.execute(DROP_SYN_TABLE, []).map_err(StoreError::Setup)?;
        tx.execute(CREATE_SYN_TABLE, []).map_err(StoreError::Setup)?;
        tx.execute(CREATE_SYNONYM_INDEX, [])
            .map_err(StoreError::Setup)?;

        tx.commit().map_err(StoreError::Setup)?;
        info!("Database schema initialization complete.");
        Ok(())
    }

    /// Inserts one word/definition pair into the `main` table and returns its
    /// auto-assigned identifier.
    ///
    /// Identifiers are assigned in strict call order starting at 1; the
    /// synonym table's `word_id` values rely on this.
    pub fn insert_word(&mut self, word: &str, meaning: &str) -> Result<i64> {
        self.conn
            .execute(INSERT_WORD, params![word, meaning])
            .map_err(|e| {
                warn!("Failed to insert word '{}': {}", word, e);
                StoreError::Write(e)
            })?;
        let id = self.conn.last_insert_rowid();
        debug!("Inserted word '{}' with id {}", word, id);
        Ok(id)
    }

    /// Inserts one synonym row referencing a word by its *external* zero-based
    /// index, as numbered by the StarDict synonym file.
    ///
    /// The stored `word_id` is `word_index + 1`: SQLite's AUTOINCREMENT starts
    /// at 1 while StarDict's synonym indexes start at 0, and this is the one
    /// place that translation happens. Callers pass the external index
    /// unmodified.
    pub fn insert_synonym(&mut self, synonym: &str, word_index: usize) -> Result<()> {
        let word_id = word_index as i64 + 1;
        self.conn
            .execute(INSERT_SYNONYM, params![synonym, word_id])
            .map_err(|e| {
                warn!("Failed to insert synonym '{}': {}", synonym, e);
                StoreError::Write(e)
            })?;
        debug!("Inserted synonym '{}' -> word_id {}", synonym, word_id);
        Ok(())
    }

    /// Writes the current in-memory database out to the target file, a full
    /// snapshot via SQLite's online backup API.
    ///
    /// Legal to call mid-load (the file then reflects only rows inserted so
    /// far) and repeatable; a later call overwrites the earlier snapshot. On
    /// failure any partially written file is left in place.
    pub fn persist(&self) -> Result<()> {
        info!("Persisting database to {:?}", self.output_path);
        let persist_err = |e: rusqlite::Error| StoreError::Persist {
            path: self.output_path.clone(),
            source: e,
        };

        let mut target = Connection::open(&self.output_path).map_err(persist_err)?;
        {
            let backup = Backup::new(&self.conn, &mut target).map_err(persist_err)?;
            backup
                .run_to_completion(64, Duration::from_millis(0), None)
                .map_err(persist_err)?;
        }
        // A target that cannot be closed cleanly is not a usable output.
        target
            .close()
            .map_err(|(_conn, e)| persist_err(e))?;
        info!("Persisted database to {:?}", self.output_path);
        Ok(())
    }

    /// The file the database will be (or was) persisted to: the dictionary
    /// name with every space character removed, suffixed with `.db`.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Releases the database handle. Best-effort: a close failure is logged
    /// and swallowed, since durability was already `persist`'s job.
    pub fn close(self) {
        if let Err((_conn, e)) = self.conn.close() {
            warn!("Failed to close dictionary store cleanly: {}", e);
        }
    }
}

/// Derives the output filename from the dictionary name: every space
/// character removed (not replaced), then a `.db` suffix.
fn output_file_name(name: &str) -> String {
    let stripped: String = name.chars().filter(|c| *c != ' ').collect();
    format!("{stripped}.db")
}

/// Escapes a string for inclusion in a single-quoted SQL literal by doubling
/// every `'` (SQL standard escaping).
///
/// Borrows the input unchanged when it contains no single quote, so the
/// common case allocates nothing. The insertion paths bind their values
/// through placeholders and never need this; it exists for any code path
/// that composes SQL by string concatenation.
pub fn escape_literal(input: &str) -> Cow<'_, str> {
    if !input.contains('\'') {
        return Cow::Borrowed(input);
    }
    Cow::Owned(input.replace('\'', "''"))
}
