//! In-memory measurement store
//!
//! Holds completed measurement sessions keyed by session ID.

use std::collections::HashMap;
use std::sync::Arc;

use application::error::ApplicationError;
use application::flow_context::FlowContext;
use application::ports::MeasurementProvider;
use async_trait::async_trait;
use domain::MeasurementResult;
use parking_lot::RwLock;
use tracing::debug;

/// In-memory implementation of [`MeasurementProvider`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryMeasurementStore {
    sessions: Arc<RwLock<HashMap<String, MeasurementResult>>>,
}

impl InMemoryMeasurementStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a completed session, replacing any previous result for it
    pub fn insert(&self, result: MeasurementResult) {
        self.sessions
            .write()
            .insert(result.session_id.clone(), result);
    }

    /// Number of stored sessions
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

#[async_trait]
impl MeasurementProvider for InMemoryMeasurementStore {
    async fn get_session_results(
        &self,
        _ctx: &FlowContext,
        session_id: &str,
    ) -> Result<MeasurementResult, ApplicationError> {
        let result = self
            .sessions
            .read()
            .get(session_id)
            .cloned()
            .ok_or_else(|| ApplicationError::NotFound(format!("measurement session {session_id}")))?;

        debug!(
            session_id,
            biomarkers = result.biomarkers.len(),
            "Loaded measurement session"
        );
        Ok(result)
    }
}
