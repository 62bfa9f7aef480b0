//! Builds `UPDATE` statements that only touch the columns present in a request.

use rusqlite::{Connection, OptionalExtension, Row, params_from_iter, types::Value};
use serde::{Deserialize, Deserializer};

use crate::Error;

/// A parameterized `UPDATE` over a subset of a table's columns.
///
/// Column and table names must be string literals chosen by the caller, never
/// request data. Every value is bound as a positional parameter.
#[derive(Debug)]
pub struct PartialUpdate {
    table: &'static str,
    assignments: Vec<(&'static str, Value)>,
}

impl PartialUpdate {
    /// Start an update of rows in `table`.
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            assignments: Vec::new(),
        }
    }

    /// Set `column` to `value`.
    pub fn set(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.assignments.push((column, value.into()));
        self
    }

    /// Set `column` to `value` if the value was supplied, otherwise leave the
    /// column untouched.
    pub fn set_if_present<T: Into<Value>>(self, column: &'static str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.set(column, value),
            None => self,
        }
    }

    /// Whether no columns have been set.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// The SQL text for the update, filtering on the `id` column and returning
    /// the columns listed in `returning`.
    ///
    /// The ID is bound as the last parameter.
    pub fn to_sql(&self, returning: &str) -> String {
        let set_clause = self
            .assignments
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{column} = ?{}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "UPDATE {} SET {set_clause} WHERE id = ?{} RETURNING {returning}",
            self.table,
            self.assignments.len() + 1
        )
    }

    /// Run the update against the row with `id` and map the updated row.
    ///
    /// Returns `Ok(None)` if no row has the given `id`.
    ///
    /// # Errors
    /// Returns [Error::NothingToUpdate] if no columns were set, or an
    /// [Error::SqlError] if the statement fails.
    pub fn execute<T, F>(
        self,
        id: i64,
        returning: &str,
        connection: &Connection,
        map_row: F,
    ) -> Result<Option<T>, Error>
    where
        F: FnOnce(&Row) -> Result<T, rusqlite::Error>,
    {
        if self.is_empty() {
            return Err(Error::NothingToUpdate);
        }

        let query = self.to_sql(returning);
        let parameters = self
            .assignments
            .into_iter()
            .map(|(_, value)| value)
            .chain(std::iter::once(Value::Integer(id)));

        connection
            .prepare(&query)?
            .query_row(params_from_iter(parameters), map_row)
            .optional()
            .map_err(Error::from)
    }
}

/// Deserialize a field so that an explicit `null` can be told apart from an
/// absent field.
///
/// Use on an `Option<Option<T>>` together with `#[serde(default)]`: an absent
/// field is `None`, `null` is `Some(None)` and a value is `Some(Some(value))`.
pub fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
