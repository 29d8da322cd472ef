//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read/update/delete over the `users` relation.
//! - Keep SQL details inside the persistence boundary.
//! - Translate SQLite failures into typed, user-safe error categories.
//!
//! # Invariants
//! - One scoped transaction per call; no partial writes are ever visible.
//! - Update/delete on a missing id report `StatusMessage::Absent` and leave
//!   storage unchanged.
//! - Read paths report failures as an absent container, never as a panic.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::status::{StatusMessage, DATA_ABSENT_MSG};
use crate::model::user::{User, UserDraft, UserId};
use crate::repo::transaction::{with_read_transaction, with_transaction};
use log::warn;
use rusqlite::{named_params, Connection, Row};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const USER_SELECT_SQL: &str = "SELECT id, name, email FROM users";
const USERS_TABLE: &str = "users";
const REQUIRED_USER_COLUMNS: &[&str] = &["id", "name", "email"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for user persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A table constraint rejected the write; carries the raw SQLite text.
    Conflict(String),
    NotFound(UserId),
    /// A write was attempted with a draft that lacks this field.
    MissingField(&'static str),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

/// Coarse error category exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Conflict,
    NotFound,
    InvalidInput,
    StorageUnavailable,
    Corrupted,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Conflict => "conflict",
            Self::NotFound => "not_found",
            Self::InvalidInput => "invalid_input",
            Self::StorageUnavailable => "storage_unavailable",
            Self::Corrupted => "corrupted",
        }
    }
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::MissingField(_) => ErrorKind::InvalidInput,
            Self::InvalidData(_) => ErrorKind::Corrupted,
            Self::Db(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => ErrorKind::StorageUnavailable,
        }
    }

    /// Message safe to show to end users. Storage internals stay in logs.
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Conflict => "The user conflicts with existing data.",
            ErrorKind::NotFound => DATA_ABSENT_MSG,
            ErrorKind::InvalidInput => "The user data is incomplete.",
            ErrorKind::StorageUnavailable => "User storage is currently unavailable.",
            ErrorKind::Corrupted => "Stored user data is invalid.",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Conflict(message) => write!(f, "constraint violation: {message}"),
            Self::NotFound(id) => write!(f, "user not found: {id}"),
            Self::MissingField(field) => write!(f, "user field `{field}` was not provided"),
            Self::InvalidData(message) => write!(f, "invalid persisted user data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
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
        if value.is_constraint_violation() {
            Self::Conflict(value.to_string())
        } else {
            Self::Db(value)
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        DbError::Sqlite(value).into()
    }
}

/// Repository interface for user CRUD operations.
pub trait UserRepository {
    /// Inserts a new row; the id is assigned by storage.
    fn create(&self, user: &UserDraft) -> RepoResult<StatusMessage>;
    /// `Some(vec![])` for an empty store, `None` when the read failed.
    fn read_all(&self) -> Option<Vec<User>>;
    /// `None` both for a missing row and for a failed read.
    fn read_by_id(&self, id: UserId) -> Option<User>;
    /// Full replace of name/email for an existing id.
    fn update(&self, user: &UserDraft) -> StatusMessage;
    fn delete(&self, id: UserId) -> StatusMessage;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Wraps a connection returned by `db::open_db`/`db::open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema
    ///   does not carry the `users` shape this repository queries.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_user_schema(conn)?;
        Ok(Self { conn })
    }

    /// Loads every row in insertion order, surfacing failures.
    pub fn fetch_all(&self) -> RepoResult<Vec<User>> {
        with_read_transaction(self.conn, "read_all", |tx| {
            let mut stmt = tx.prepare(&format!("{USER_SELECT_SQL} ORDER BY id ASC;"))?;
            let mut rows = stmt.query([])?;
            let mut users = Vec::new();
            while let Some(row) = rows.next()? {
                users.push(parse_user_row(row)?);
            }
            Ok(users)
        })
    }

    /// Loads one row by id, surfacing failures.
    pub fn fetch_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        with_read_transaction(self.conn, "read_by_id", |tx| {
            let mut stmt = tx.prepare(&format!("{USER_SELECT_SQL} WHERE id = :id;"))?;
            let mut rows = stmt.query(named_params! { ":id": id })?;
            let user = match rows.next()? {
                Some(row) => Some(parse_user_row(row)?),
                None => None,
            };
            Ok(user)
        })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create(&self, user: &UserDraft) -> RepoResult<StatusMessage> {
        let (name, email) = required_fields(user)?;

        let id = with_transaction(self.conn, "create", |tx| {
            tx.execute(
                "INSERT INTO users (name, email) VALUES (:name, :email);",
                named_params! { ":name": name, ":email": email },
            )?;
            Ok(tx.last_insert_rowid())
        })?;

        Ok(StatusMessage::Inserted(id))
    }

    fn read_all(&self) -> Option<Vec<User>> {
        self.fetch_all().map_err(|err| log_read_failure("read_all", &err)).ok()
    }

    fn read_by_id(&self, id: UserId) -> Option<User> {
        self.fetch_by_id(id)
            .map_err(|err| log_read_failure("read_by_id", &err))
            .ok()
            .flatten()
    }

    fn update(&self, user: &UserDraft) -> StatusMessage {
        let Some(id) = user.id else {
            return RepoError::MissingField("id").into();
        };
        let (name, email) = match required_fields(user) {
            Ok(fields) => fields,
            Err(err) => return err.into(),
        };
        if self.read_by_id(id).is_none() {
            return StatusMessage::Absent;
        }

        let result = with_transaction(self.conn, "update", |tx| {
            let changed = tx.execute(
                "UPDATE users SET name = :name, email = :email WHERE id = :id;",
                named_params! { ":name": name, ":email": email, ":id": id },
            )?;
            ensure_changed(changed, id)
        });

        match result {
            Ok(()) => StatusMessage::Updated,
            Err(RepoError::NotFound(_)) => StatusMessage::Absent,
            Err(err) => err.into(),
        }
    }

    fn delete(&self, id: UserId) -> StatusMessage {
        if self.read_by_id(id).is_none() {
            return StatusMessage::Absent;
        }

        let result = with_transaction(self.conn, "delete", |tx| {
            let changed = tx.execute(
                "DELETE FROM users WHERE id = :id;",
                named_params! { ":id": id },
            )?;
            ensure_changed(changed, id)
        });

        match result {
            Ok(()) => StatusMessage::Deleted,
            Err(RepoError::NotFound(_)) => StatusMessage::Absent,
            Err(err) => err.into(),
        }
    }
}

fn required_fields(user: &UserDraft) -> RepoResult<(&str, &str)> {
    let name = user.name.as_deref().ok_or(RepoError::MissingField("name"))?;
    let email = user
        .email
        .as_deref()
        .ok_or(RepoError::MissingField("email"))?;
    Ok((name, email))
}

// A row deleted between the existence check and the mutation still counts
// as absent.
fn ensure_changed(changed: usize, id: UserId) -> RepoResult<()> {
    if changed == 0 {
        return Err(RepoError::NotFound(id));
    }
    Ok(())
}

fn log_read_failure(op: &'static str, err: &RepoError) {
    warn!(
        "event=user_read module=repo status=absent op={op} error_kind={}",
        err.kind().as_str()
    );
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let id: UserId = row.get("id")?;
    if id <= 0 {
        return Err(RepoError::InvalidData(format!(
            "invalid id value `{id}` in users.id"
        )));
    }

    Ok(User {
        id,
        name: row.get("name")?,
        email: row.get("email")?,
    })
}

fn ensure_user_schema(conn: &Connection) -> RepoResult<()> {
    let actual_version = current_user_version(conn)?;
    let expected_version = latest_version();
    if actual_version > expected_version {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: actual_version,
            latest_supported: expected_version,
        }
        .into());
    }
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let columns = table_columns(conn, USERS_TABLE)?;
    if columns.is_empty() {
        return Err(RepoError::MissingRequiredTable(USERS_TABLE));
    }
    if let Some(column) = REQUIRED_USER_COLUMNS
        .iter()
        .copied()
        .find(|column| !columns.contains(*column))
    {
        return Err(RepoError::MissingRequiredColumn {
            table: USERS_TABLE,
            column,
        });
    }

    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> RepoResult<BTreeSet<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = BTreeSet::new();
    while let Some(row) = rows.next()? {
        columns.insert(row.get::<_, String>("name")?);
    }
    Ok(columns)
}
