mod helpers;
mod location_api;
mod proximity_api;
mod route_api;

pub use helpers::{
    estimate_eta_minutes, haversine_km, synthetic_path, EARTH_RADIUS_KM, SYNTHETIC_PATH_POINTS,
};

use async_channel::{Receiver, Sender};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::{
    api::API,
    config::TrackerConfig,
    entities::{ProximityKind, Route, TrackingEvent},
    external::DirectionsProvider,
};

#[derive(Default)]
struct TrackingState {
    route: Option<Route>,
    distance_km: Option<f64>,
    eta_minutes: Option<i64>,
    alerted: HashMap<ProximityKind, bool>,
    debounce: Option<JoinHandle<()>>,
    closed: bool,
}

/// Tracks one delivery: a moving partner, a target, a cached route and the
/// proximity suggestions for the approach. Construct one per order-tracking
/// session and call [`Engine::shutdown`] when the session ends.
#[derive(Clone)]
pub struct Engine {
    config: TrackerConfig,
    provider: Arc<dyn DirectionsProvider>,
    state: Arc<Mutex<TrackingState>>,
    events: Sender<TrackingEvent>,
    event_source: Receiver<TrackingEvent>,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(provider: Arc<dyn DirectionsProvider>, config: TrackerConfig) -> Self {
        let (events, event_source) = async_channel::unbounded();

        Self {
            config,
            provider,
            state: Arc::new(Mutex::new(TrackingState::default())),
            events,
            event_source,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Event stream for push-style consumers.
    pub fn subscribe(&self) -> Receiver<TrackingEvent> {
        self.event_source.clone()
    }

    /// Ends the session: cancels any armed recalculation and closes the
    /// event stream. Subsequent location updates are rejected.
    #[tracing::instrument(skip(self))]
    pub async fn shutdown(&self) {
        let mut state = self.state.lock().await;

        state.closed = true;

        if let Some(armed) = state.debounce.take() {
            armed.abort();
        }

        self.events.close();
    }

    fn publish(&self, event: TrackingEvent) {
        // consumers may be gone; tracking carries on regardless
        let _ = self.events.try_send(event);
    }
}

impl API for Engine {}
