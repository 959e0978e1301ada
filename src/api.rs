use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{
    Coordinates, ProximityEvent, ProximityKind, RecalculationDecision, RouteRequest,
    TrackingSnapshot,
};
use crate::error::Error;

#[async_trait]
pub trait LocationAPI {
    async fn record_location(
        &self,
        request: RouteRequest,
    ) -> Result<RecalculationDecision, Error>;
}

#[async_trait]
pub trait RouteAPI {
    async fn compute_route(&self, request: &RouteRequest) -> Vec<Coordinates>;

    async fn snapshot(&self) -> TrackingSnapshot;
}

#[async_trait]
pub trait ProximityAPI {
    async fn check_proximity(
        &self,
        origin: Coordinates,
        target: Coordinates,
        threshold_km: f64,
        kind: ProximityKind,
    ) -> Option<ProximityEvent>;
}

pub trait API: LocationAPI + RouteAPI + ProximityAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
