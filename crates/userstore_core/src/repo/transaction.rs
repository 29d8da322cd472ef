//! Scoped transaction guard for repository calls.
//!
//! # Invariants
//! - `work` observes a transaction that is open for its whole duration.
//! - `Ok` commits; `Err` or unwinding drops the guard, which rolls back.

use crate::repo::user_repo::RepoResult;
use log::{debug, warn};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::time::Instant;

/// Runs `work` inside an `IMMEDIATE` transaction.
///
/// Used for mutations so the write lock is taken up front instead of being
/// upgraded halfway through the statement sequence.
pub fn with_transaction<T, F>(conn: &Connection, op: &'static str, work: F) -> RepoResult<T>
where
    F: FnOnce(&Transaction<'_>) -> RepoResult<T>,
{
    scoped(conn, (TransactionBehavior::Immediate, "immediate"), op, work)
}

/// Runs `work` inside a `DEFERRED` transaction for consistent reads.
pub fn with_read_transaction<T, F>(conn: &Connection, op: &'static str, work: F) -> RepoResult<T>
where
    F: FnOnce(&Transaction<'_>) -> RepoResult<T>,
{
    scoped(conn, (TransactionBehavior::Deferred, "deferred"), op, work)
}

fn scoped<T, F>(
    conn: &Connection,
    (behavior, mode): (TransactionBehavior, &'static str),
    op: &'static str,
    work: F,
) -> RepoResult<T>
where
    F: FnOnce(&Transaction<'_>) -> RepoResult<T>,
{
    let started_at = Instant::now();
    debug!("event=user_tx module=repo status=begin op={op} mode={mode}");
    let result = run(conn, behavior, work);

    match &result {
        Ok(_) => debug!(
            "event=user_tx module=repo status=commit op={op} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => warn!(
            "event=user_tx module=repo status=rollback op={op} duration_ms={} error_kind={} error={err}",
            started_at.elapsed().as_millis(),
            err.kind().as_str()
        ),
    }

    result
}

fn run<T, F>(conn: &Connection, behavior: TransactionBehavior, work: F) -> RepoResult<T>
where
    F: FnOnce(&Transaction<'_>) -> RepoResult<T>,
{
    // `new_unchecked` borrows the connection immutably; repositories only
    // hold `&Connection`.
    let tx = Transaction::new_unchecked(conn, behavior)?;
    let value = work(&tx)?;
    tx.commit()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{with_read_transaction, with_transaction};
    use crate::db::open_db_in_memory;
    use crate::repo::user_repo::RepoError;
    use rusqlite::Connection;

    fn user_count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn ok_result_commits() {
        let conn = open_db_in_memory().unwrap();

        with_transaction(&conn, "test_commit", |tx| {
            tx.execute(
                "INSERT INTO users (name, email) VALUES ('Ann', 'ann@x.io');",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        assert_eq!(user_count(&conn), 1);
        assert!(conn.is_autocommit());
    }

    #[test]
    fn err_result_rolls_back_earlier_statements() {
        let conn = open_db_in_memory().unwrap();

        let result: Result<(), RepoError> = with_transaction(&conn, "test_rollback", |tx| {
            tx.execute(
                "INSERT INTO users (name, email) VALUES ('Ann', 'ann@x.io');",
                [],
            )?;
            Err(RepoError::MissingField("email"))
        });

        assert!(matches!(result, Err(RepoError::MissingField("email"))));
        assert_eq!(user_count(&conn), 0);
        assert!(conn.is_autocommit());
    }

    #[test]
    fn failing_statement_releases_transaction() {
        let conn = open_db_in_memory().unwrap();

        let result = with_read_transaction(&conn, "test_bad_sql", |tx| {
            tx.execute("SELECT * FROM no_such_table;", [])?;
            Ok(())
        });

        assert!(matches!(result, Err(RepoError::Db(_))));
        assert!(conn.is_autocommit());
    }
}
