use super::helpers::{estimate_eta_minutes, haversine_km};
use super::Engine;

use async_trait::async_trait;

use crate::{
    api::{LocationAPI, RouteAPI},
    entities::{RecalculationDecision, Route, RouteRequest, TrackingEvent},
    error::{invalid_invocation_error, Error},
};

#[async_trait]
impl LocationAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn record_location(
        &self,
        request: RouteRequest,
    ) -> Result<RecalculationDecision, Error> {
        let mut state = self.state.lock().await;

        if state.closed {
            return Err(invalid_invocation_error());
        }

        if !request.origin.is_valid() || !request.destination.is_valid() {
            tracing::warn!("unusable coordinates, clearing tracked route");

            state.route = None;
            state.distance_km = None;
            state.eta_minutes = None;

            if let Some(armed) = state.debounce.take() {
                armed.abort();
            }

            drop(state);
            self.publish(TrackingEvent::RouteCleared);

            return Ok(RecalculationDecision::Cleared);
        }

        let cached_destination = match state.route.as_ref() {
            Some(route) if !self.needs_recalculation(Some(route), &request) => {
                Some(route.destination)
            }
            _ => None,
        };

        // geometry still holds: keep the displayed numbers live and move on
        if let Some(destination) = cached_destination {
            let distance = haversine_km(request.origin, destination);

            state.distance_km = Some(distance);
            state.eta_minutes = Some(estimate_eta_minutes(distance, self.config.average_speed_kmh));

            return Ok(RecalculationDecision::Reused);
        }

        // collapse bursts of updates into a single provider call
        if let Some(armed) = state.debounce.take() {
            armed.abort();
        }

        tracing::info!("route is stale, arming recalculation");

        let engine = self.clone();
        let debounce = self.config.debounce;

        state.debounce = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            let path = engine.compute_route(&request).await;
            engine.apply_route(request, path).await;
        }));

        Ok(RecalculationDecision::Scheduled)
    }
}

impl Engine {
    /// Staleness policy for the cached route, evaluated against a candidate
    /// request.
    #[tracing::instrument(skip(self))]
    pub async fn should_recalculate(&self, request: &RouteRequest) -> bool {
        let state = self.state.lock().await;

        self.needs_recalculation(state.route.as_ref(), request)
    }

    /// Ordered conditions; first hit wins.
    fn needs_recalculation(&self, cached: Option<&Route>, request: &RouteRequest) -> bool {
        let route = match cached {
            Some(route) => route,
            None => return true,
        };

        if route.kind != request.kind {
            return true;
        }

        if haversine_km(route.destination, request.destination)
            > self.config.destination_threshold_km
        {
            return true;
        }

        if haversine_km(route.origin, request.origin) > self.config.origin_threshold_km {
            return true;
        }

        route.age() > self.config.max_route_age
    }
}
