use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use echo_chat::model::TextModel;
use echo_storage::store::DocumentStore;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub models: Arc<Vec<Box<dyn TextModel>>>,
    pub in_flight: InFlight,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, models: Vec<Box<dyn TextModel>>) -> Self {
        Self {
            store,
            models: Arc::new(models),
            in_flight: InFlight::default(),
        }
    }
}

/// Report IDs whose submission is currently being saved.
#[derive(Clone, Default)]
pub struct InFlight(Arc<Mutex<HashSet<String>>>);

impl InFlight {
    /// Claim `report_id`; `None` when another submission holds it. The
    /// claim is released when the guard drops.
    pub fn try_acquire(&self, report_id: &str) -> Option<InFlightGuard> {
        let mut ids = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        ids.insert(report_id.to_string()).then(|| InFlightGuard {
            ids: self.0.clone(),
            report_id: report_id.to_string(),
        })
    }

    pub fn contains(&self, report_id: &str) -> bool {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(report_id)
    }
}

pub struct InFlightGuard {
    ids: Arc<Mutex<HashSet<String>>>,
    report_id: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.report_id);
    }
}
