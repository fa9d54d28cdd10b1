//! In-memory [`Store`] for tests.
//!
//! Enabled in other crates with the `test-utils` feature:
//!
//! ```toml
//! [dev-dependencies]
//! sen-core = { path = "../core", features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::store::{Store, StoreError};

/// How the mock answers writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MockBehavior {
    /// Echo the written row back as a one-element array.
    #[default]
    Echo,
    /// Accept the call but return an empty representation.
    Empty,
    /// Answer with a 500 status.
    Fail,
}

/// One call recorded by [`MockStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    pub table: String,
    pub row: Value,
    /// `Some(column)` for upserts.
    pub on_conflict: Option<String>,
}

#[derive(Clone, Default)]
pub struct MockStore {
    behavior: MockBehavior,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behavior(behavior: MockBehavior) -> Self {
        Self { behavior, ..Self::default() }
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, table: &str, row: &Value, on_conflict: Option<&str>) -> Result<Value, StoreError> {
        self.calls.lock().unwrap().push(MockCall {
            table: table.to_string(),
            row: row.clone(),
            on_conflict: on_conflict.map(str::to_string),
        });

        match self.behavior {
            MockBehavior::Echo => Ok(json!([row])),
            MockBehavior::Empty => Ok(json!([])),
            MockBehavior::Fail => Err(StoreError::Status {
                status: 500,
                body: r#"{"message":"mock store failure"}"#.to_string(),
            }),
        }
    }
}

#[async_trait]
impl Store for MockStore {
    async fn insert_row(&self, table: &str, row: &Value) -> Result<Value, StoreError> {
        self.record(table, row, None)
    }

    async fn upsert_row(&self, table: &str, row: &Value, on_conflict: &str) -> Result<Value, StoreError> {
        self.record(table, row, Some(on_conflict))
    }
}
