//! Operations that talk to a live connection
//!
//! These are the only calls in the crate that perform I/O, always through a
//! caller-supplied [`ConnectionGateway`]. Gateway failures are wrapped in
//! [`DialectError::DatabaseAccess`] with the qualified table name attached.

use crate::dialect::{DialectProfile, INDEX_COLUMN_ALIAS, MAX_VALUE_ALIAS};
use crate::error::{DialectError, Result};
use crate::gateway::{ConnectionGateway, GatewayError, Value};

const READ_MAX_VALUE: &str = "read max value";

/// Whether an index on `table` covers every one of `fields`.
///
/// Field names are compared case-insensitively and their order does not
/// matter. A catalog query that returns no rows means the index (or the
/// table) does not exist, which yields `false` rather than an error.
pub fn index_exists<P, G>(
    profile: &P,
    gateway: &mut G,
    schema: Option<&str>,
    table: &str,
    fields: &[&str],
) -> Result<bool>
where
    P: DialectProfile + ?Sized,
    G: ConnectionGateway + ?Sized,
{
    let qualified = profile.quoted_schema_table(schema, table);
    let sql = profile
        .index_columns_sql(schema, table)
        .ok_or(DialectError::Unsupported {
            vendor: profile.name(),
            capability: "index introspection",
        })?;
    tracing::debug!(table = %qualified, %sql, "checking index columns");

    let mut found = vec![false; fields.len()];
    let mut saw_rows = false;
    let mut cursor = gateway
        .execute(&sql)
        .map_err(|e| DialectError::access("check index", &qualified, e))?;
    while let Some(row) = cursor
        .next_row()
        .map_err(|e| DialectError::access("check index", &qualified, e))?
    {
        saw_rows = true;
        let Some(column) = row.get_str(INDEX_COLUMN_ALIAS) else {
            continue;
        };
        for (field, hit) in fields.iter().zip(found.iter_mut()) {
            if field.eq_ignore_ascii_case(column.trim()) {
                *hit = true;
            }
        }
    }

    Ok(saw_rows && found.iter().all(|hit| *hit))
}

/// Next batch id for `table`, read as `MAX(field) + 1` under an exclusive lock.
///
/// The lock is released on every path once it was acquired. An empty table
/// yields 1. If reading fails and releasing the lock fails too, both errors
/// are reported through [`DialectError::CleanupFailed`].
pub fn next_batch_id_with_lock<P, G>(
    profile: &P,
    gateway: &mut G,
    schema: Option<&str>,
    table: &str,
    field: &str,
) -> Result<i64>
where
    P: DialectProfile + ?Sized,
    G: ConnectionGateway + ?Sized,
{
    let qualified = profile.quoted_schema_table(schema, table);
    let locked = vec![qualified.clone()];

    gateway
        .lock_tables(&locked)
        .map_err(|e| DialectError::access("lock", &qualified, e))?;
    tracing::debug!(table = %qualified, "acquired table lock");

    let result = read_next_value(profile, gateway, &qualified, field);

    match (result, gateway.unlock_tables(&locked)) {
        (Ok(id), Ok(())) => Ok(id),
        (Ok(id), Err(cleanup)) => {
            tracing::warn!(table = %qualified, error = %cleanup, "failed to release table lock");
            Ok(id)
        }
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(cleanup)) => Err(DialectError::CleanupFailed {
            action: READ_MAX_VALUE,
            table: qualified,
            source: Box::new(err),
            cleanup,
        }),
    }
}

fn read_next_value<P, G>(profile: &P, gateway: &mut G, qualified: &str, field: &str) -> Result<i64>
where
    P: DialectProfile + ?Sized,
    G: ConnectionGateway + ?Sized,
{
    let sql = profile.max_value_sql(qualified, &profile.quote_field(field));
    tracing::debug!(table = %qualified, %sql, "reading current maximum");

    let wrap = |e: GatewayError| DialectError::access(READ_MAX_VALUE, qualified, e);
    let mut cursor = gateway.execute(&sql).map_err(wrap)?;
    let current = match cursor.next_row().map_err(wrap)? {
        None => 0,
        Some(row) => match row.get(MAX_VALUE_ALIAS) {
            None | Some(Value::Null) => 0,
            Some(_) => row
                .get_i64(MAX_VALUE_ALIAS)
                .ok_or_else(|| DialectError::UnexpectedRow {
                    table: qualified.to_string(),
                    detail: format!("{} is not an integer", MAX_VALUE_ALIAS),
                })?,
        },
    };

    current
        .checked_add(1)
        .ok_or_else(|| DialectError::UnexpectedRow {
            table: qualified.to_string(),
            detail: "batch id overflow".to_string(),
        })
}
