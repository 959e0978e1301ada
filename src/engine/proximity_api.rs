use super::helpers::haversine_km;
use super::Engine;

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    api::ProximityAPI,
    entities::{Coordinates, ProximityEvent, ProximityKind, TrackingEvent},
};

#[async_trait]
impl ProximityAPI for Engine {
    /// One-shot arrival suggestion: fires when `origin` first enters the
    /// threshold radius of `target`, and re-arms once it leaves again.
    #[tracing::instrument(skip(self))]
    async fn check_proximity(
        &self,
        origin: Coordinates,
        target: Coordinates,
        threshold_km: f64,
        kind: ProximityKind,
    ) -> Option<ProximityEvent> {
        if !origin.is_valid() || !target.is_valid() {
            return None;
        }

        let distance = haversine_km(origin, target);

        let mut state = self.state.lock().await;

        if state.closed {
            return None;
        }

        let alerted = state.alerted.entry(kind).or_insert(false);

        if distance > threshold_km {
            *alerted = false;

            return None;
        }

        if *alerted {
            return None;
        }

        *alerted = true;

        drop(state);

        tracing::info!(kind = %kind.name(), distance_km = distance, "proximity threshold crossed");

        let event = ProximityEvent {
            kind,
            distance_km: distance,
            at: Utc::now(),
        };

        self.publish(TrackingEvent::Proximity(event));

        Some(event)
    }
}
