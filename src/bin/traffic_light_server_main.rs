use env_logger::Env;
use tokio_util::sync::CancellationToken;

use traffic_light_sim::communication::server::start_server;
use traffic_light_sim::config::ServerConfig;
use traffic_light_sim::control_system::light_timer::LightTimer;
use traffic_light_sim::control_system::traffic_light_controller::TrafficLightController;
use traffic_light_sim::monitoring::traffic_journal::TrafficJournal;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    log::info!("Server is about to start");

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let mut controller = TrafficLightController::new();
    if let Some(path) = &config.journal_path {
        log::info!("Recording pass attempts to {}", path.display());
        controller = controller.with_journal(TrafficJournal::new(path));
    }

    let token = CancellationToken::new();
    let timer = LightTimer::new(config.light_min_interval, config.light_max_interval);
    let timer_handle = controller.run(timer, token.clone());

    let shutdown = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Shutting down...");
        }
        shutdown.cancel();
    });

    let result = start_server(config.bind_addr, controller, token.clone()).await;
    if let Err(e) = &result {
        log::error!("Server error: {}", e);
        token.cancel();
    }
    let _ = timer_handle.await;
    if result.is_err() {
        std::process::exit(1);
    }
}
