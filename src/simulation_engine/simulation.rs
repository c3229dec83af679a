//! A car that drives to the traffic light over and over.
//!
//! Each journey: drive along the road, look at the light, then either pass
//! straight away on green or queue on red and wait to be first in line on
//! green. A crash is followed by a pause before the next journey.

use std::ops::Range;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::communication::traffic_light_api::TrafficLightApi;
use crate::global_variables::CLIENT_RESTART_DELAY_MS;
use crate::models::intersection::{CrashReason, LightState, PassAttemptResult};
use crate::models::vehicle::CarDesc;
use crate::simulation_engine::vehicles::{random_car_number, random_driver_name};

/// Pause ranges in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarTiming {
    /// Time on the road before reaching the light.
    pub drive_ms: Range<u64>,
    /// Pause between looking at the light and acting on it.
    pub reaction_ms: Range<u64>,
    /// Pause between checks while waiting in the queue.
    pub wait_ms: Range<u64>,
    /// Pause after a crash.
    pub recovery_ms: Range<u64>,
}

impl Default for CarTiming {
    fn default() -> Self {
        Self {
            drive_ms: 500..2000,
            reaction_ms: 0..500,
            wait_ms: 500..2000,
            recovery_ms: 500..2000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneyOutcome {
    Passed,
    Crashed(CrashReason),
}

impl From<PassAttemptResult> for JourneyOutcome {
    fn from(result: PassAttemptResult) -> Self {
        if result.is_success {
            JourneyOutcome::Passed
        } else {
            JourneyOutcome::Crashed(result.crash_reason.unwrap_or(CrashReason::RanRedLight))
        }
    }
}

pub struct Car<A> {
    api: A,
    desc: CarDesc,
    timing: CarTiming,
    rng: SmallRng,
}

impl<A: TrafficLightApi> Car<A> {
    /// Make up a plate and a driver, and fetch a unique id from the light.
    pub async fn register(api: A, timing: CarTiming) -> Result<Self, A::Error> {
        Self::register_with_rng(api, timing, SmallRng::from_os_rng()).await
    }

    pub async fn register_with_rng(
        api: A,
        timing: CarTiming,
        mut rng: SmallRng,
    ) -> Result<Self, A::Error> {
        let car_number = random_car_number(&mut rng);
        let driver = random_driver_name(&mut rng);
        let car_id = api.get_unique_id().await?;
        let desc = CarDesc::new(car_id, car_number, driver);
        log::info!(
            "I am car {}, RegNr. {}, Driver {}.",
            desc.car_id,
            desc.car_number,
            desc.driver_name_surname
        );

        Ok(Self {
            api,
            desc,
            timing,
            rng,
        })
    }

    pub fn desc(&self) -> &CarDesc {
        &self.desc
    }

    async fn pause(&mut self, range: Range<u64>) {
        let ms = if range.is_empty() {
            range.start
        } else {
            self.rng.random_range(range)
        };
        sleep(Duration::from_millis(ms)).await;
    }

    /// Drive up to the light and get through it, or crash trying.
    pub async fn drive_once(&mut self) -> Result<JourneyOutcome, A::Error> {
        log::info!("I am driving on the road.");
        self.pause(self.timing.drive_ms.clone()).await;
        log::info!("I see a traffic light.");

        let outcome = loop {
            let light = self.api.get_light_state().await?;
            // give the light some time to possibly switch before acting
            self.pause(self.timing.reaction_ms.clone()).await;

            if light == LightState::Green {
                log::info!("Light is green, trying to pass.");
                break self.try_pass().await?;
            }

            log::info!("Light is red, trying to queue.");
            if self.api.queue(&self.desc).await? {
                log::info!("I'm in queue now. Waiting for light.");
                break self.wait_in_queue().await?;
            }
            log::info!("Queuing failed. Will check the light again.");
        };

        if let JourneyOutcome::Crashed(_) = outcome {
            log::info!("Meditating on my mistakes...");
            self.pause(self.timing.recovery_ms.clone()).await;
            log::info!("It is a new day and a new car.");
        }
        Ok(outcome)
    }

    async fn wait_in_queue(&mut self) -> Result<JourneyOutcome, A::Error> {
        loop {
            let light = self.api.get_light_state().await?;
            let first_in_line = self.api.is_first_in_line(self.desc.car_id).await?;
            self.pause(self.timing.reaction_ms.clone()).await;

            if light == LightState::Green && first_in_line {
                log::info!("Light is green and I am ready, trying to pass.");
                return self.try_pass().await;
            }
            log::info!("Waiting some more.");
            self.pause(self.timing.wait_ms.clone()).await;
        }
    }

    async fn try_pass(&mut self) -> Result<JourneyOutcome, A::Error> {
        let outcome = JourneyOutcome::from(self.api.pass(&self.desc).await?);
        match outcome {
            JourneyOutcome::Passed => log::info!("Passed, life is good."),
            JourneyOutcome::Crashed(reason) => log::info!("Crashed because '{}'.", reason),
        }
        Ok(outcome)
    }
}

/// Drive journeys until `token` is cancelled.
///
/// Any error from the traffic light drops the current car; after a short
/// pause a new car is registered with `connect()`.
pub async fn run_car<A, F>(connect: F, timing: CarTiming, token: CancellationToken)
where
    A: TrafficLightApi,
    F: Fn() -> A,
{
    while !token.is_cancelled() {
        let result = tokio::select! {
            _ = token.cancelled() => break,
            result = drive_forever(connect(), timing.clone()) => result,
        };
        if let Err(e) = result {
            log::warn!("Unhandled error caught: {}. Will restart main loop.", e);
            tokio::select! {
                _ = token.cancelled() => break,
                _ = sleep(Duration::from_millis(CLIENT_RESTART_DELAY_MS)) => {}
            }
        }
    }
    log::info!("Car stopped.");
}

async fn drive_forever<A: TrafficLightApi>(api: A, timing: CarTiming) -> Result<(), A::Error> {
    let mut car = Car::register(api, timing).await?;
    loop {
        car.drive_once().await?;
    }
}
