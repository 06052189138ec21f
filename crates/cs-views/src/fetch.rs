//! One asynchronous fetch per mounted view

use std::sync::Arc;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::{info, error};
use cs_core::{FetchState, QueryDocument};
use cs_data::StatsTransport;

use crate::ViewerContext;

/// Shared slot the fetch task writes its outcome into
#[derive(Clone, Default)]
pub struct FetchHandle {
    state: Arc<RwLock<FetchState<Arc<Value>>>>,
}

impl FetchHandle {
    /// A handle that stays pending until resolved
    pub fn pending() -> Self {
        Self::default()
    }

    /// Start fetching `query` on the viewer's runtime, repainting when done
    pub fn spawn(ctx: &ViewerContext, query: QueryDocument, repaint: egui::Context) -> Self {
        Self::spawn_with(
            ctx.transport.clone(),
            &ctx.runtime_handle,
            query,
            move || repaint.request_repaint(),
        )
    }

    /// Start fetching `query`, calling `notify` once the state is final
    pub fn spawn_with(
        transport: Arc<dyn StatsTransport>,
        runtime: &tokio::runtime::Handle,
        query: QueryDocument,
        notify: impl FnOnce() + Send + 'static,
    ) -> Self {
        let handle = Self::pending();
        let slot = handle.clone();

        runtime.spawn(async move {
            info!("Fetching {} from {}", query.operation(), transport.source_name());
            let result = transport.execute(&query).await;
            match &result {
                Ok(_) => info!("Fetched {}", query.operation()),
                Err(e) => error!("Failed to fetch {}: {}", query.operation(), e),
            }
            slot.resolve(result.map(Arc::new).into());
            notify();
        });

        handle
    }

    /// Overwrite the state
    pub fn resolve(&self, state: FetchState<Arc<Value>>) {
        *self.state.write() = state;
    }

    /// Snapshot of the current state (payload is shared, not copied)
    pub fn state(&self) -> FetchState<Arc<Value>> {
        self.state.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use cs_core::{detail_query, DetailKind};
    use cs_data::FixtureTransport;

    async fn run(transport: Arc<dyn StatsTransport>, query: QueryDocument) -> FetchState<Arc<Value>> {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let handle = FetchHandle::spawn_with(
            transport,
            &tokio::runtime::Handle::current(),
            query,
            move || {
                let _ = tx.send(());
            },
        );
        rx.await.unwrap();
        handle.state()
    }

    fn transport() -> Arc<dyn StatsTransport> {
        Arc::new(FixtureTransport::from_value("memory", json!({
            "countries": [{ "name": "Peru", "mostRecent": { "confirmed": 3, "recovered": 2, "deaths": 1 } }]
        })))
    }

    #[test]
    fn test_new_handle_is_pending() {
        assert!(FetchHandle::pending().state().is_loading());
    }

    #[tokio::test]
    async fn test_fetch_succeeds() {
        let state = run(transport(), detail_query(DetailKind::Country, "Peru")).await;
        let data = state.data().unwrap();
        assert_eq!(data["country"]["name"], "Peru");
    }

    #[tokio::test]
    async fn test_fetch_failure_is_reported() {
        let state = run(transport(), detail_query(DetailKind::Country, "Chile")).await;
        assert!(state.is_error());
    }
}
