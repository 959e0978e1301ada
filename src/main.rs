use cursus::config::TrackerConfig;
use cursus::engine::Engine;
use cursus::external::OsrmDirections;
use cursus::simulation::Executor;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let provider = OsrmDirections::from_env().unwrap_or_default();
    let engine = Engine::new(Arc::new(provider), TrackerConfig::default());

    Executor::new(engine).run().await;
}
