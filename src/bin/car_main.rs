use env_logger::Env;
use tokio_util::sync::CancellationToken;

use traffic_light_sim::communication::client::TrafficLightClient;
use traffic_light_sim::config::CarConfig;
use traffic_light_sim::simulation_engine::simulation::{run_car, CarTiming};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = CarConfig::from_env();
    log::info!("Driving towards the traffic light at {}", config.server_url);

    let token = CancellationToken::new();
    let shutdown = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => shutdown.cancel(),
            Err(e) => log::warn!("Ctrl-C handler unavailable: {}", e),
        }
    });

    // one HTTP client shared by every restart
    let http = reqwest::Client::new();
    run_car(
        || TrafficLightClient::with_client(config.server_url.clone(), http.clone()),
        CarTiming::default(),
        token,
    )
    .await;
}
