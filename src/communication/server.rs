use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::communication::routes::build_router;
use crate::control_system::traffic_light_controller::TrafficLightController;
use crate::error::ServerError;

/// Bind the listener. Split from [`serve`] so callers can learn the port
/// when binding to port 0.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr).await.map_err(|source| ServerError::Bind {
        addr: addr.to_string(),
        source,
    })
}

/// Serve the traffic light API until `token` is cancelled.
pub async fn serve(
    listener: TcpListener,
    controller: TrafficLightController,
    token: CancellationToken,
) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        log::info!("Traffic light listening on http://{}", addr);
    }
    axum::serve(listener, build_router(controller))
        .with_graceful_shutdown(async move { token.cancelled().await })
        .await
        .map_err(ServerError::Serve)?;
    log::info!("Traffic light server stopped.");
    Ok(())
}

/// Bind to `addr` and serve until `token` is cancelled.
pub async fn start_server(
    addr: SocketAddr,
    controller: TrafficLightController,
    token: CancellationToken,
) -> Result<(), ServerError> {
    let listener = bind(addr).await?;
    serve(listener, controller, token).await
}
