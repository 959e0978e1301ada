use async_channel::Receiver;
use rand_distr::{Distribution, Normal};
use std::sync::Arc;
use std::time::Duration;

use crate::api::{LocationAPI, ProximityAPI, RouteAPI};
use crate::engine::Engine;
use crate::entities::{Coordinates, ProximityKind, RouteKind, RouteRequest, TrackingEvent};

const PARTNER_START: Coordinates = Coordinates {
    latitude: 12.9610,
    longitude: 77.5775,
};
const BRANCH: Coordinates = Coordinates {
    latitude: 12.9716,
    longitude: 77.5946,
};
const CUSTOMER: Coordinates = Coordinates {
    latitude: 12.9352,
    longitude: 77.6245,
};

const SAMPLE_STEPS: usize = 40;
const SAMPLE_INTERVAL: Duration = Duration::from_millis(250);

/// Drives a simulated delivery run against an [`Engine`]: a partner heads
/// to the branch, picks the order up, then approaches the customer, all
/// under GPS noise, while emitted tracking events are logged as they
/// arrive.
pub struct Executor {
    engine: Arc<Engine>,
}

impl Executor {
    #[tracing::instrument(name = "Executor::new", skip_all)]
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn run(&self) {
        let events = self.engine.subscribe();
        let listener = tokio::spawn(async move { drain_events(events).await });

        let engine = self.engine.clone();
        let partner = tokio::spawn(async move { drive(engine).await });

        futures::future::join_all(vec![listener, partner]).await;
    }
}

async fn drain_events(events: Receiver<TrackingEvent>) {
    while let Ok(event) = events.recv().await {
        match event {
            TrackingEvent::RouteReady(route) => {
                tracing::info!(route_id = %route.id, points = route.path.len(), "route ready to show");
            }
            TrackingEvent::RouteCleared => {
                tracing::info!("route cleared");
            }
            TrackingEvent::Proximity(event) => {
                tracing::info!(
                    action = %event.kind.suggested_action(),
                    distance_km = event.distance_km,
                    "proximity suggestion"
                );
            }
        }
    }
}

#[tracing::instrument(skip(engine))]
async fn drive(engine: Arc<Engine>) {
    leg(
        &engine,
        PARTNER_START,
        BRANCH,
        RouteKind::PartnerToBranch,
        ProximityKind::BranchPickup,
    )
    .await;

    leg(
        &engine,
        BRANCH,
        CUSTOMER,
        RouteKind::PartnerToCustomer,
        ProximityKind::CustomerArrival,
    )
    .await;

    let snapshot = engine.snapshot().await;

    tracing::info!(
        points = snapshot.path.len(),
        distance_km = ?snapshot.distance_km,
        eta_minutes = ?snapshot.eta_minutes,
        "final tracking state"
    );

    engine.shutdown().await;
}

async fn leg(
    engine: &Arc<Engine>,
    from: Coordinates,
    to: Coordinates,
    kind: RouteKind,
    target: ProximityKind,
) {
    tracing::info!(kind = %kind.name(), "starting leg");

    // jitter comparable to consumer GPS noise, roughly 10 m
    let noise = Normal::new(0.0, 0.0001).unwrap();

    for i in 0..=SAMPLE_STEPS {
        let ratio = i as f64 / SAMPLE_STEPS as f64;

        let partner = Coordinates::new(
            from.latitude + (to.latitude - from.latitude) * ratio
                + noise.sample(&mut rand::thread_rng()),
            from.longitude
                + (to.longitude - from.longitude) * ratio
                + noise.sample(&mut rand::thread_rng()),
        );

        let request = RouteRequest {
            origin: partner,
            destination: to,
            kind,
        };

        match engine.record_location(request).await {
            Ok(decision) => tracing::debug!(?decision, "location recorded"),
            Err(_) => return,
        }

        let arrival = engine
            .check_proximity(
                partner,
                to,
                engine.config().proximity_threshold_km,
                target,
            )
            .await;

        if let Some(event) = arrival {
            tracing::info!(action = %event.kind.suggested_action(), "leg complete");
            return;
        }

        tokio::time::sleep(SAMPLE_INTERVAL).await;
    }
}
