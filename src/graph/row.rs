//! Row and streaming types for query results.

use std::collections::HashMap;
use std::pin::Pin;

use futures::Stream;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::AppError;

/// Query parameters, by name without the `$` prefix.
pub type Params = HashMap<String, JsonValue>;

/// A stream of rows from a query result.
pub type RowStream<'a> = Pin<Box<dyn Stream<Item = Result<Row, AppError>> + Send + 'a>>;

/// A single result row, column values held as JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    data: HashMap<String, JsonValue>,
}

impl Row {
    pub fn new(data: HashMap<String, JsonValue>) -> Self {
        Self { data }
    }

    /// Typed value of a column.
    ///
    /// ```ignore
    /// let coverage: i64 = row.get("mediaCoverage")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, AppError> {
        let value = self
            .data
            .get(key)
            .ok_or_else(|| AppError::Internal(format!("column not found: {}", key)))?;
        decode(key, value)
    }

    /// Typed value of a column, `None` when the column is absent or null.
    pub fn get_opt<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        match self.data.get(key) {
            None | Some(JsonValue::Null) => Ok(None),
            Some(v) => decode(key, v).map(Some),
        }
    }

}

fn decode<T: DeserializeOwned>(key: &str, value: &JsonValue) -> Result<T, AppError> {
    serde_json::from_value(value.clone())
        .map_err(|e| AppError::Internal(format!("failed to deserialize '{}': {}", key, e)))
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, JsonValue)]) -> Row {
        Row::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_get_typed_columns() {
        let r = row(&[("Topic", json!("lockdown")), ("mediaCoverage", json!(3))]);
        assert_eq!(r.get::<String>("Topic").unwrap(), "lockdown");
        assert_eq!(r.get::<i64>("mediaCoverage").unwrap(), 3);
    }

    #[test]
    fn test_get_missing_column() {
        let result: Result<String, _> = Row::default().get("Topic");
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[test]
    fn test_get_wrong_type() {
        let r = row(&[("mediaCoverage", json!("many"))]);
        assert!(r.get::<i64>("mediaCoverage").is_err());
    }

    #[test]
    fn test_get_opt_present_missing_and_null() {
        let r = row(&[("Date", json!("2020-03-01")), ("MediaSource", JsonValue::Null)]);
        assert_eq!(r.get_opt::<String>("Date").unwrap().as_deref(), Some("2020-03-01"));
        assert_eq!(r.get_opt::<String>("MediaSource").unwrap(), None);
        assert_eq!(r.get_opt::<String>("Statement").unwrap(), None);
    }
}
