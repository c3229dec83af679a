//! HTTP routes exposing the traffic light to cars.
//!
//! | Method | Path | Body / query | Response |
//! |--------|------|--------------|----------|
//! | `GET` | `/getUniqueId` | | integer |
//! | `GET` | `/getLightState` | | `"Red"` or `"Green"` |
//! | `POST` | `/queue` | `CarDesc` | bool |
//! | `GET` | `/isFirstInLine` | `?carId=` | bool |
//! | `POST` | `/pass` | `CarDesc` | `PassAttemptResult` |
//!
//! Malformed requests are rejected by the extractors and never reach the
//! controller.

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::communication::messages::FirstInLineQuery;
use crate::control_system::traffic_light_controller::TrafficLightController;
use crate::global_variables::{
    ROUTE_FIRST_IN_LINE, ROUTE_LIGHT_STATE, ROUTE_PASS, ROUTE_QUEUE, ROUTE_UNIQUE_ID,
};
use crate::models::intersection::{LightState, PassAttemptResult};
use crate::models::vehicle::{CarDesc, CarId};

pub fn build_router(controller: TrafficLightController) -> Router {
    // allow everything from everywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(ROUTE_UNIQUE_ID, get(get_unique_id))
        .route(ROUTE_LIGHT_STATE, get(get_light_state))
        .route(ROUTE_QUEUE, post(queue))
        .route(ROUTE_FIRST_IN_LINE, get(is_first_in_line))
        .route(ROUTE_PASS, post(pass))
        .layer(cors)
        .with_state(controller)
}

async fn get_unique_id(State(controller): State<TrafficLightController>) -> Json<CarId> {
    Json(controller.get_unique_id())
}

async fn get_light_state(State(controller): State<TrafficLightController>) -> Json<LightState> {
    Json(controller.get_light_state())
}

async fn queue(
    State(controller): State<TrafficLightController>,
    Json(car): Json<CarDesc>,
) -> Json<bool> {
    Json(controller.queue(&car))
}

async fn is_first_in_line(
    State(controller): State<TrafficLightController>,
    Query(query): Query<FirstInLineQuery>,
) -> Json<bool> {
    Json(controller.is_first_in_line(query.car_id))
}

async fn pass(
    State(controller): State<TrafficLightController>,
    Json(car): Json<CarDesc>,
) -> Json<PassAttemptResult> {
    Json(controller.pass(&car))
}
