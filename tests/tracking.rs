use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;

use cursus::api::{DynAPI, LocationAPI, ProximityAPI, RouteAPI};
use cursus::config::TrackerConfig;
use cursus::engine::{estimate_eta_minutes, haversine_km, Engine, SYNTHETIC_PATH_POINTS};
use cursus::entities::{
    Coordinates, ProximityKind, RecalculationDecision, RouteKind, RouteRequest, TrackingEvent,
};
use cursus::error::{upstream_error, Error};
use cursus::external::DirectionsProvider;

const BRANCH: Coordinates = Coordinates {
    latitude: 12.9716,
    longitude: 77.5946,
};
const CUSTOMER: Coordinates = Coordinates {
    latitude: 12.9352,
    longitude: 77.6245,
};

enum Directions {
    Direct,
    Unavailable,
    Fixed(Vec<Coordinates>),
}

struct StubProvider {
    calls: AtomicUsize,
    directions: Directions,
}

impl StubProvider {
    fn new(directions: Directions) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            directions,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DirectionsProvider for StubProvider {
    async fn fetch_directions(&self, request: &RouteRequest) -> Result<Vec<Coordinates>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.directions {
            Directions::Direct => Ok(vec![request.origin, request.destination]),
            Directions::Unavailable => Err(upstream_error()),
            Directions::Fixed(path) => Ok(path.clone()),
        }
    }
}

fn fast_config() -> TrackerConfig {
    TrackerConfig {
        debounce: Duration::from_millis(50),
        transition_delay: Duration::ZERO,
        ..TrackerConfig::default()
    }
}

fn request(origin: Coordinates) -> RouteRequest {
    RouteRequest {
        origin,
        destination: CUSTOMER,
        kind: RouteKind::PartnerToCustomer,
    }
}

/// Shift a point north by roughly `km`.
fn north_of(point: Coordinates, km: f64) -> Coordinates {
    Coordinates::new(point.latitude + km / 111.19, point.longitude)
}

/// Long enough for a fast-config debounce to fire and apply.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(200)).await;
}

#[tokio::test]
async fn debounce_collapses_update_bursts() {
    let provider = StubProvider::new(Directions::Direct);
    let engine = Engine::new(provider.clone(), fast_config());

    for _ in 0..5 {
        let decision = engine.record_location(request(BRANCH)).await.unwrap();
        assert_eq!(decision, RecalculationDecision::Scheduled);

        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    settle().await;

    assert_eq!(provider.calls(), 1);
    assert_eq!(engine.snapshot().await.path.len(), 2);
}

#[tokio::test]
async fn reuse_keeps_distance_and_eta_live() {
    let provider = StubProvider::new(Directions::Direct);
    let engine = Engine::new(provider.clone(), fast_config());

    engine.record_location(request(BRANCH)).await.unwrap();
    settle().await;

    let origin = north_of(BRANCH, 0.03);
    let decision = engine.record_location(request(origin)).await.unwrap();
    assert_eq!(decision, RecalculationDecision::Reused);

    let snapshot = engine.snapshot().await;
    let expected = haversine_km(origin, CUSTOMER);

    assert!((snapshot.distance_km.unwrap() - expected).abs() < 1e-9);
    assert_eq!(
        snapshot.eta_minutes.unwrap(),
        estimate_eta_minutes(expected, 30.0)
    );
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn proximity_alert_rearms_after_retreat() {
    let engine = Engine::new(StubProvider::new(Directions::Direct), fast_config());

    let far = north_of(CUSTOMER, 0.06);
    let near = north_of(CUSTOMER, 0.04);
    let kind = ProximityKind::CustomerArrival;

    assert!(engine
        .check_proximity(far, CUSTOMER, 0.05, kind)
        .await
        .is_none());

    let first = engine.check_proximity(near, CUSTOMER, 0.05, kind).await;
    assert_eq!(first.unwrap().kind, kind);

    // still inside: no repeat prompt
    assert!(engine
        .check_proximity(near, CUSTOMER, 0.05, kind)
        .await
        .is_none());

    // retreat re-arms the alert
    assert!(engine
        .check_proximity(far, CUSTOMER, 0.05, kind)
        .await
        .is_none());
    assert!(engine
        .check_proximity(near, CUSTOMER, 0.05, kind)
        .await
        .is_some());
}

#[tokio::test]
async fn invalid_coordinates_clear_the_route() {
    let engine = Engine::new(StubProvider::new(Directions::Direct), fast_config());
    let events = engine.subscribe();

    engine.record_location(request(BRANCH)).await.unwrap();
    settle().await;
    assert_eq!(engine.snapshot().await.path.len(), 2);

    let no_fix = Coordinates::new(0.0, 77.5946);
    let decision = engine.record_location(request(no_fix)).await.unwrap();
    assert_eq!(decision, RecalculationDecision::Cleared);

    let snapshot = engine.snapshot().await;
    assert!(snapshot.path.is_empty());
    assert!(snapshot.distance_km.is_none());
    assert!(snapshot.eta_minutes.is_none());

    let ready = timeout(Duration::from_millis(500), events.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(ready, TrackingEvent::RouteReady(_)));

    let cleared = timeout(Duration::from_millis(500), events.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(cleared, TrackingEvent::RouteCleared));
}

#[tokio::test]
async fn provider_failure_falls_back_to_synthetic_path() {
    let provider = StubProvider::new(Directions::Unavailable);
    let engine = Engine::new(provider.clone(), fast_config());

    engine.record_location(request(BRANCH)).await.unwrap();
    settle().await;

    let snapshot = engine.snapshot().await;

    assert_eq!(snapshot.path.len(), SYNTHETIC_PATH_POINTS);
    assert!(haversine_km(snapshot.path[0], BRANCH) < 1e-6);
    assert!(haversine_km(snapshot.path[SYNTHETIC_PATH_POINTS - 1], CUSTOMER) < 1e-6);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn unchanged_geometry_is_not_reemitted() {
    let provider = StubProvider::new(Directions::Fixed(vec![BRANCH, CUSTOMER]));
    let engine = Engine::new(provider.clone(), fast_config());
    let events = engine.subscribe();

    engine.record_location(request(BRANCH)).await.unwrap();
    settle().await;

    let ready = timeout(Duration::from_millis(500), events.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(ready, TrackingEvent::RouteReady(_)));

    // origin moved enough to recompute, but the provider path is identical
    engine
        .record_location(request(north_of(BRANCH, 0.06)))
        .await
        .unwrap();
    settle().await;

    assert_eq!(provider.calls(), 2);
    assert!(timeout(Duration::from_millis(200), events.recv())
        .await
        .is_err());
}

#[tokio::test]
async fn engine_drives_behind_dyn_api() {
    let engine = Engine::new(StubProvider::new(Directions::Direct), fast_config());
    let api: DynAPI = Arc::new(engine);

    let decision = api.record_location(request(BRANCH)).await.unwrap();
    assert_eq!(decision, RecalculationDecision::Scheduled);

    settle().await;

    let path = api.compute_route(&request(BRANCH)).await;
    assert_eq!(path.len(), 2);
    assert_eq!(api.snapshot().await.path.len(), 2);
}

#[tokio::test]
async fn shutdown_cancels_armed_recalculation() {
    let provider = StubProvider::new(Directions::Direct);
    let engine = Engine::new(provider.clone(), fast_config());

    let decision = engine.record_location(request(BRANCH)).await.unwrap();
    assert_eq!(decision, RecalculationDecision::Scheduled);

    engine.shutdown().await;
    settle().await;

    assert_eq!(provider.calls(), 0);
    assert!(engine.record_location(request(BRANCH)).await.is_err());
}
