use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use listino_core::{Catalog, ListinoError, NaiveDate, PriceMap, PriceProvider};

/// Instruction for how the next `today_prices` call should behave.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(ListinoError),
    /// Hang indefinitely (simulate a stalled download).
    Hang,
}

#[derive(Default)]
struct InternalState {
    behavior: Option<MockBehavior<PriceMap>>,
    calls: Vec<(usize, NaiveDate)>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for subsequent `today_prices` calls.
    pub async fn set_behavior(&self, behavior: MockBehavior<PriceMap>) {
        let mut guard = self.state.lock().await;
        guard.behavior = Some(behavior);
    }

    /// Every call so far as `(catalog record count, date)`.
    pub async fn calls(&self) -> Vec<(usize, NaiveDate)> {
        self.state.lock().await.calls.clone()
    }

    /// Clear the configured behavior and the call log.
    pub async fn clear(&self) {
        let mut guard = self.state.lock().await;
        guard.behavior = None;
        guard.calls.clear();
    }
}

/// A provider that defers all behavior to an external controller.
pub struct DynamicMockProvider {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockProvider {
    /// Create a new dynamic mock provider and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn PriceProvider>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn PriceProvider>, controller)
    }
}

#[async_trait]
impl PriceProvider for DynamicMockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    async fn today_prices(
        &self,
        catalog: &Catalog,
        date: NaiveDate,
    ) -> Result<PriceMap, ListinoError> {
        // Snapshot the behavior without holding the lock across the await below.
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.push((catalog.len(), date));
            guard.behavior.clone()
        };

        match behavior {
            Some(MockBehavior::Return(prices)) => Ok(prices),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            None => Err(ListinoError::provider(self.name, "no behavior configured")),
        }
    }
}
