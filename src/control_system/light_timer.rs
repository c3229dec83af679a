use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::control_system::traffic_light_controller::TrafficLightController;
use crate::global_variables::{DEFAULT_LIGHT_MAX_INTERVAL_MS, DEFAULT_LIGHT_MIN_INTERVAL_MS};

/// Background task that switches the light after random pauses.
#[derive(Debug)]
pub struct LightTimer {
    min_interval: Duration,
    max_interval: Duration,
    rng: SmallRng,
}

impl Default for LightTimer {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_LIGHT_MIN_INTERVAL_MS),
            Duration::from_millis(DEFAULT_LIGHT_MAX_INTERVAL_MS),
        )
    }
}

impl LightTimer {
    pub fn new(min_interval: Duration, max_interval: Duration) -> Self {
        Self::with_rng(min_interval, max_interval, SmallRng::from_os_rng())
    }

    pub fn with_rng(min_interval: Duration, max_interval: Duration, rng: SmallRng) -> Self {
        Self {
            min_interval,
            max_interval,
            rng,
        }
    }

    /// Pause before the next switch, uniform in `[min, max)`.
    /// An empty range yields `min`.
    pub fn next_interval(&mut self) -> Duration {
        if self.min_interval >= self.max_interval {
            return self.min_interval;
        }
        self.rng.random_range(self.min_interval..self.max_interval)
    }

    /// Switch the light forever, until `token` is cancelled.
    /// The sleep happens outside the controller's lock.
    pub async fn run(mut self, controller: TrafficLightController, token: CancellationToken) {
        loop {
            let pause = self.next_interval();
            tokio::select! {
                _ = token.cancelled() => {
                    log::info!("Light timer stopped.");
                    return;
                }
                _ = sleep(pause) => {
                    controller.flip_light();
                }
            }
        }
    }
}
