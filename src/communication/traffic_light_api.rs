use std::convert::Infallible;
use std::future::Future;

use crate::control_system::traffic_light_controller::TrafficLightController;
use crate::models::intersection::{LightState, PassAttemptResult};
use crate::models::vehicle::{CarDesc, CarId};

/// The operations a car can ask of the traffic light.
///
/// Implemented over HTTP by `TrafficLightClient` and in-process by
/// `TrafficLightController`.
pub trait TrafficLightApi {
    type Error: std::error::Error;

    fn get_unique_id(&self) -> impl Future<Output = Result<CarId, Self::Error>>;

    fn get_light_state(&self) -> impl Future<Output = Result<LightState, Self::Error>>;

    fn queue(&self, car: &CarDesc) -> impl Future<Output = Result<bool, Self::Error>>;

    fn is_first_in_line(&self, car_id: CarId) -> impl Future<Output = Result<bool, Self::Error>>;

    fn pass(&self, car: &CarDesc) -> impl Future<Output = Result<PassAttemptResult, Self::Error>>;
}

impl TrafficLightApi for TrafficLightController {
    type Error = Infallible;

    async fn get_unique_id(&self) -> Result<CarId, Infallible> {
        Ok(TrafficLightController::get_unique_id(self))
    }

    async fn get_light_state(&self) -> Result<LightState, Infallible> {
        Ok(TrafficLightController::get_light_state(self))
    }

    async fn queue(&self, car: &CarDesc) -> Result<bool, Infallible> {
        Ok(TrafficLightController::queue(self, car))
    }

    async fn is_first_in_line(&self, car_id: CarId) -> Result<bool, Infallible> {
        Ok(TrafficLightController::is_first_in_line(self, car_id))
    }

    async fn pass(&self, car: &CarDesc) -> Result<PassAttemptResult, Infallible> {
        Ok(TrafficLightController::pass(self, car))
    }
}
