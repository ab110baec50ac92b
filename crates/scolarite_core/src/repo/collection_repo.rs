//! Collection store contract and SQLite document implementation.
//!
//! # Responsibility
//! - Expose the four-verb document API the console consumes: insert,
//!   list with optional equality filter, partial update by id, delete by id.
//! - Keep SQL and JSON body handling inside the persistence boundary.
//!
//! # Invariants
//! - Ids are assigned by the store (UUID v4) and never reused.
//! - Document bodies never contain the id; it lives in its own column.
//! - Listing order is unspecified; callers sort.
//! - Update/delete of an unknown id fails with `NotFound`.

use crate::db::DbError;
use crate::model::id::DocumentId;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static FIELD_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("valid field name regex"));

/// Document fields, keyed by field name.
pub type Fields = Map<String, Value>;

pub type RepoResult<T> = Result<T, RepoError>;

/// Store failure surfaced to the console as a per-operation message.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound {
        collection: Collection,
        id: DocumentId,
    },
    /// Filter field name is not a plain identifier.
    InvalidField(String),
    /// Stored body or insert payload does not match the expected shape.
    InvalidDocument {
        collection: Collection,
        message: String,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { collection, id } => {
                write!(f, "document not found: {}/{id}", collection.as_str())
            }
            Self::InvalidField(field) => write!(f, "invalid filter field `{field}`"),
            Self::InvalidDocument {
                collection,
                message,
            } => write!(
                f,
                "invalid document in `{}`: {message}",
                collection.as_str()
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Logical collections known to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Programs,
    Classes,
    TeachingUnits,
    Subjects,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Programs => "programs",
            Self::Classes => "classes",
            Self::TeachingUnits => "teaching_units",
            Self::Subjects => "subjects",
        }
    }
}

/// One stored document: its id plus the body fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Fields,
}

/// `field == value` restriction for `list`.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualityFilter {
    pub field: String,
    pub value: Value,
}

impl EqualityFilter {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Shorthand for the id-reference filters the console uses.
    pub fn by_id(field: &str, id: &DocumentId) -> Self {
        Self::new(field, id.as_str())
    }
}

/// Document store consumed by the console views.
pub trait CollectionRepository {
    fn insert(&self, collection: Collection, fields: Fields) -> RepoResult<DocumentId>;
    fn list(
        &self,
        collection: Collection,
        filter: Option<&EqualityFilter>,
    ) -> RepoResult<Vec<Document>>;
    /// Merges `fields` into the stored body; unspecified fields are kept.
    fn update(&self, collection: Collection, id: &DocumentId, fields: Fields) -> RepoResult<()>;
    fn delete(&self, collection: Collection, id: &DocumentId) -> RepoResult<()>;
}

impl<R: CollectionRepository + ?Sized> CollectionRepository for &R {
    fn insert(&self, collection: Collection, fields: Fields) -> RepoResult<DocumentId> {
        (**self).insert(collection, fields)
    }

    fn list(
        &self,
        collection: Collection,
        filter: Option<&EqualityFilter>,
    ) -> RepoResult<Vec<Document>> {
        (**self).list(collection, filter)
    }

    fn update(&self, collection: Collection, id: &DocumentId, fields: Fields) -> RepoResult<()> {
        (**self).update(collection, id, fields)
    }

    fn delete(&self, collection: Collection, id: &DocumentId) -> RepoResult<()> {
        (**self).delete(collection, id)
    }
}

/// SQLite-backed document store over the migrated `documents` table.
pub struct SqliteCollectionRepository {
    conn: Connection,
}

impl SqliteCollectionRepository {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        ensure_documents_table(&conn)?;
        Ok(Self { conn })
    }

    /// Underlying connection, for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl CollectionRepository for SqliteCollectionRepository {
    fn insert(&self, collection: Collection, mut fields: Fields) -> RepoResult<DocumentId> {
        fields.remove("id");
        let id = DocumentId::new(Uuid::new_v4().to_string());
        let body = encode_body(collection, &fields)?;

        self.conn.execute(
            "INSERT INTO documents (collection, doc_id, body) VALUES (?1, ?2, ?3);",
            params![collection.as_str(), id.as_str(), body],
        )?;

        debug!(
            "event=doc_insert module=repo status=ok collection={} id={}",
            collection.as_str(),
            id
        );
        Ok(id)
    }

    fn list(
        &self,
        collection: Collection,
        filter: Option<&EqualityFilter>,
    ) -> RepoResult<Vec<Document>> {
        let mut sql =
            String::from("SELECT doc_id, body FROM documents WHERE collection = ?");
        let mut bind_values = vec![SqlValue::Text(collection.as_str().to_string())];

        if let Some(filter) = filter {
            if !FIELD_NAME_RE.is_match(&filter.field) {
                return Err(RepoError::InvalidField(filter.field.clone()));
            }
            // Literal path so the expression indexes from migration 2 apply.
            let path = format!("json_extract(body, '$.{}')", filter.field);
            match json_to_sql(&filter.value) {
                Some(value) => {
                    sql.push_str(&format!(" AND {path} = ?"));
                    bind_values.push(value);
                }
                None => sql.push_str(&format!(" AND {path} IS NULL")),
            }
        }

        sql.push_str(" ORDER BY created_at ASC, doc_id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(rusqlite::params_from_iter(bind_values))?;
        let mut documents = Vec::new();
        while let Some(row) = rows.next()? {
            let id: String = row.get(0)?;
            let body: String = row.get(1)?;
            documents.push(Document {
                id: DocumentId::new(id),
                fields: decode_body(collection, &body)?,
            });
        }

        Ok(documents)
    }

    fn update(&self, collection: Collection, id: &DocumentId, fields: Fields) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let stored: Option<String> = tx
            .query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND doc_id = ?2;",
                params![collection.as_str(), id.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        let Some(stored) = stored else {
            return Err(RepoError::NotFound {
                collection,
                id: id.clone(),
            });
        };

        let mut merged = decode_body(collection, &stored)?;
        for (key, value) in fields {
            if key != "id" {
                merged.insert(key, value);
            }
        }

        tx.execute(
            "UPDATE documents
             SET body = ?1, updated_at = (strftime('%s', 'now') * 1000)
             WHERE collection = ?2 AND doc_id = ?3;",
            params![encode_body(collection, &merged)?, collection.as_str(), id.as_str()],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn delete(&self, collection: Collection, id: &DocumentId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND doc_id = ?2;",
            params![collection.as_str(), id.as_str()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                collection,
                id: id.clone(),
            });
        }
        Ok(())
    }
}

fn ensure_documents_table(conn: &Connection) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'documents'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(RepoError::InvalidDocument {
            collection: Collection::Programs,
            message: "connection is not migrated: missing `documents` table".to_string(),
        });
    }
    Ok(())
}

fn encode_body(collection: Collection, fields: &Fields) -> RepoResult<String> {
    serde_json::to_string(fields).map_err(|err| RepoError::InvalidDocument {
        collection,
        message: err.to_string(),
    })
}

fn decode_body(collection: Collection, body: &str) -> RepoResult<Fields> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(RepoError::InvalidDocument {
            collection,
            message: "body is not a JSON object".to_string(),
        }),
        Err(err) => Err(RepoError::InvalidDocument {
            collection,
            message: err.to_string(),
        }),
    }
}

/// Maps a JSON filter value to the SQL value `json_extract` yields for it.
/// `None` means the filter is an `IS NULL` check.
fn json_to_sql(value: &Value) -> Option<SqlValue> {
    match value {
        Value::Null => None,
        Value::Bool(flag) => Some(SqlValue::Integer(i64::from(*flag))),
        Value::Number(number) => Some(match number.as_i64() {
            Some(int) => SqlValue::Integer(int),
            None => SqlValue::Real(number.as_f64().unwrap_or_default()),
        }),
        Value::String(text) => Some(SqlValue::Text(text.clone())),
        other => Some(SqlValue::Text(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{json_to_sql, FIELD_NAME_RE};
    use rusqlite::types::Value as SqlValue;
    use serde_json::json;

    #[test]
    fn field_names_must_be_plain_identifiers() {
        assert!(FIELD_NAME_RE.is_match("program_id"));
        assert!(!FIELD_NAME_RE.is_match("x') OR 1=1 --"));
        assert!(!FIELD_NAME_RE.is_match(""));
    }

    #[test]
    fn json_filter_values_map_to_sql_values() {
        assert_eq!(json_to_sql(&json!(null)), None);
        assert_eq!(json_to_sql(&json!(true)), Some(SqlValue::Integer(1)));
        assert_eq!(json_to_sql(&json!("c-1")), Some(SqlValue::Text("c-1".into())));
    }
}
