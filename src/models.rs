use serde::{Deserialize, Serialize};

/// One headword-and-definition record in the primary (`main`) table.
///
/// `id` is assigned by the store on insertion, starting at 1 and increasing
/// by one per inserted word, never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    pub id: i64,
    pub word: String,
    pub meaning: String,
}

/// One alternate-spelling/cross-reference record in the `syn` table,
/// pointing at a [`WordEntry`] by identifier.
///
/// `word_id` is not enforced by a foreign key; the store tolerates dangling
/// references, mirroring the StarDict synonym file's own indexing scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub synonym: String,
    pub word_id: i64,
}
