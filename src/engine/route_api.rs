use super::helpers::{estimate_eta_minutes, haversine_km, path_unchanged, synthetic_path};
use super::Engine;

use async_trait::async_trait;

use crate::{
    api::RouteAPI,
    entities::{Coordinates, Route, RouteRequest, TrackingEvent, TrackingSnapshot},
};

#[async_trait]
impl RouteAPI for Engine {
    /// Fetches a drivable path from the directions provider. Provider
    /// failures are absorbed: valid endpoints always yield a renderable
    /// path, synthesized locally if need be.
    #[tracing::instrument(skip(self))]
    async fn compute_route(&self, request: &RouteRequest) -> Vec<Coordinates> {
        match self.provider.fetch_directions(request).await {
            Ok(path) if path.len() >= 2 => path,
            Ok(path) => {
                tracing::warn!(points = path.len(), "degenerate provider path, synthesizing");

                synthetic_path(request.origin, request.destination)
            }
            Err(err) => {
                tracing::warn!(code = err.code, "directions provider unavailable, synthesizing");

                synthetic_path(request.origin, request.destination)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> TrackingSnapshot {
        let state = self.state.lock().await;

        TrackingSnapshot {
            path: state
                .route
                .as_ref()
                .map(|route| route.path.clone())
                .unwrap_or_default(),
            distance_km: state.distance_km,
            eta_minutes: state.eta_minutes,
        }
    }
}

impl Engine {
    /// Installs a freshly computed path, keeping the previous geometry when
    /// the new one is indistinguishable from it. `RouteReady` is emitted
    /// after the transition delay so consumers can animate the swap.
    #[tracing::instrument(skip(self, path))]
    pub(crate) async fn apply_route(&self, request: RouteRequest, path: Vec<Coordinates>) {
        let staged = {
            let mut state = self.state.lock().await;

            if state.closed {
                return;
            }

            let distance = haversine_km(request.origin, request.destination);

            state.distance_km = Some(distance);
            state.eta_minutes = Some(estimate_eta_minutes(distance, self.config.average_speed_kmh));

            let unchanged = state
                .route
                .as_ref()
                .map(|route| path_unchanged(&route.path, &path))
                .unwrap_or(false);

            let path = match (unchanged, state.route.as_ref()) {
                // same geometry: refresh the cache entry, skip the re-render
                (true, Some(route)) => route.path.clone(),
                _ => path,
            };

            let route = Route::new(&request, path);
            let staged = (!unchanged).then(|| route.clone());

            state.route = Some(route);

            staged
        };

        if let Some(route) = staged {
            tracing::info!(
                route_id = %route.id,
                kind = %route.kind.name(),
                points = route.path.len(),
                "route updated"
            );

            tokio::time::sleep(self.config.transition_delay).await;
            self.publish(TrackingEvent::RouteReady(route));
        }
    }
}
