use echo_core::ids::{IdKind, fallback_id, sequential_id};
use tracing::warn;

use crate::store::DocumentStore;

/// Mint the next human-readable ID of `kind` (e.g. `RA000042`).
///
/// When the counter cannot be incremented the ID falls back to
/// `{prefix}-{epoch-millis}`, so minting never fails.
pub async fn next_id(store: &dyn DocumentStore, kind: IdKind) -> String {
    match store.increment_counter(kind.counter()).await {
        Ok(n) => sequential_id(kind, n),
        Err(e) => {
            warn!(error = %e, counter = kind.counter(), "counter transaction failed, using timestamp id");
            fallback_id(kind, jiff::Timestamp::now().as_millisecond())
        }
    }
}
