use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::control_system::intersection_state::IntersectionState;
use crate::control_system::light_timer::LightTimer;
use crate::control_system::pass_arbiter::adjudicate_pass;
use crate::control_system::queue_manager::{try_queue, QueueAdmission};
use crate::models::intersection::{LightState, PassAttemptResult};
use crate::models::vehicle::{CarDesc, CarId};
use crate::monitoring::traffic_journal::TrafficJournal;

/// Traffic light logic shared by all request handlers and the light timer.
///
/// Cloning is cheap; every clone talks to the same intersection. All reads and
/// writes of the state go through one mutex.
#[derive(Debug, Clone)]
pub struct TrafficLightController {
    state: Arc<Mutex<IntersectionState>>,
    light_tx: Arc<watch::Sender<LightState>>,
    journal: Option<Arc<TrafficJournal>>,
}

impl Default for TrafficLightController {
    fn default() -> Self {
        Self::new()
    }
}

impl TrafficLightController {
    pub fn new() -> Self {
        let (light_tx, _) = watch::channel(LightState::default());
        Self {
            state: Arc::new(Mutex::new(IntersectionState::new())),
            light_tx: Arc::new(light_tx),
            journal: None,
        }
    }

    /// Record every pass attempt to the given journal.
    pub fn with_journal(mut self, journal: TrafficJournal) -> Self {
        self.journal = Some(Arc::new(journal));
        self
    }

    // Critical sections never panic half way, so a poisoned state is still whole.
    fn lock(&self) -> MutexGuard<'_, IntersectionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Spawn the light timer on the current tokio runtime.
    pub fn run(&self, timer: LightTimer, token: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(timer.run(self.clone(), token))
    }

    /// Get next unique ID. Used by cars to acquire their identity.
    pub fn get_unique_id(&self) -> CarId {
        self.lock().next_unique_id()
    }

    pub fn get_light_state(&self) -> LightState {
        self.lock().light_state()
    }

    /// Watch light changes as they are applied.
    pub fn subscribe_light(&self) -> watch::Receiver<LightState> {
        self.light_tx.subscribe()
    }

    /// Switch the light and return the new state.
    pub fn flip_light(&self) -> LightState {
        let mut state = self.lock();
        let new_state = state.flip_light();
        self.light_tx.send_replace(new_state);
        log::info!("New light state is '{}'.", new_state);
        new_state
    }

    /// Queue the car at the light. Only succeeds while the light is red.
    pub fn queue(&self, car: &CarDesc) -> bool {
        let mut state = self.lock();
        log::info!("{} is trying to queue.", car);

        match try_queue(&mut state, car.car_id) {
            QueueAdmission::Admitted => {
                log::info!("Queuing allowed.");
                true
            }
            QueueAdmission::LightNotRed => {
                log::info!("Queuing denied, because light is not red.");
                false
            }
            QueueAdmission::AlreadyQueued => {
                log::info!("Queuing denied, because car is already in queue.");
                false
            }
        }
    }

    /// True if the car is at the head of the queue. False if it is further back
    /// or not queued at all.
    pub fn is_first_in_line(&self, car_id: CarId) -> bool {
        self.lock().is_first_in_line(car_id)
    }

    /// Try passing the light. A queued car leaves the queue whatever happens.
    pub fn pass(&self, car: &CarDesc) -> PassAttemptResult {
        let result = {
            let mut state = self.lock();
            log::info!("{} is trying to pass.", car);
            let result = adjudicate_pass(&mut state, car.car_id);
            match result.crash_reason {
                None => log::info!("Car has passed."),
                Some(reason) => log::info!("Car has crashed because '{}'.", reason),
            }
            result
        };

        if let Some(journal) = &self.journal {
            record_off_worker(Arc::clone(journal), car.clone(), result);
        }
        result
    }

    pub fn queue_len(&self) -> usize {
        self.lock().queue_len()
    }

    pub fn queued_cars(&self) -> Vec<CarId> {
        self.lock().queued_cars().collect()
    }
}

// File I/O goes to the blocking pool when called from a runtime.
fn record_off_worker(journal: Arc<TrafficJournal>, car: CarDesc, result: PassAttemptResult) {
    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn_blocking(move || journal.record(&car, &result));
        }
        Err(_) => journal.record(&car, &result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::intersection::CrashReason;
    use crate::monitoring::traffic_journal::{summarize_journal, JournalSummary};

    fn car(id: CarId) -> CarDesc {
        CarDesc::new(id, "TST 001", "Steve Steveson")
    }

    #[test]
    fn scenario_red_light_runner() {
        let controller = TrafficLightController::new();
        let x = car(controller.get_unique_id());
        assert_eq!(
            controller.pass(&x),
            PassAttemptResult::crashed(CrashReason::RanRedLight)
        );
    }

    #[test]
    fn scenario_queue_then_pass_on_green() {
        let controller = TrafficLightController::new();
        let x = car(controller.get_unique_id());
        assert!(controller.queue(&x));
        assert!(!controller.queue(&x));
        assert_eq!(controller.flip_light(), LightState::Green);
        assert!(controller.is_first_in_line(x.car_id));
        assert_eq!(controller.pass(&x), PassAttemptResult::passed());
        assert!(controller.queued_cars().is_empty());
    }

    #[test]
    fn scenario_rear_end_collision() {
        let controller = TrafficLightController::new();
        let x = car(controller.get_unique_id());
        let y = car(controller.get_unique_id());
        assert!(controller.queue(&x));
        assert!(controller.queue(&y));
        controller.flip_light();

        assert_eq!(
            controller.pass(&y),
            PassAttemptResult::crashed(CrashReason::HitCarInFront)
        );
        assert_eq!(controller.queued_cars(), vec![x.car_id]);
    }

    #[test]
    fn scenario_straight_through_on_green() {
        let controller = TrafficLightController::new();
        controller.flip_light();
        let z = car(controller.get_unique_id());
        assert!(!controller.queue(&z));
        assert_eq!(controller.pass(&z), PassAttemptResult::passed());
    }

    #[test]
    fn light_state_is_stable_between_flips() {
        let controller = TrafficLightController::new();
        for _ in 0..10 {
            assert_eq!(controller.get_light_state(), LightState::Red);
        }
        controller.flip_light();
        for _ in 0..10 {
            assert_eq!(controller.get_light_state(), LightState::Green);
        }
    }

    #[test]
    fn clones_share_the_same_intersection() {
        let controller = TrafficLightController::new();
        let other = controller.clone();
        assert_eq!(controller.get_unique_id(), CarId(1));
        assert_eq!(other.get_unique_id(), CarId(2));
        other.flip_light();
        assert_eq!(controller.get_light_state(), LightState::Green);
    }

    #[test]
    fn flips_are_published_to_subscribers() {
        let controller = TrafficLightController::new();
        let mut rx = controller.subscribe_light();
        assert_eq!(*rx.borrow_and_update(), LightState::Red);
        controller.flip_light();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), LightState::Green);
    }

    #[test]
    fn pass_attempts_are_journaled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("passes.csv");
        let controller = TrafficLightController::new().with_journal(TrafficJournal::new(&path));

        let x = car(controller.get_unique_id());
        assert_eq!(
            controller.pass(&x),
            PassAttemptResult::crashed(CrashReason::RanRedLight)
        );
        controller.flip_light();
        assert_eq!(controller.pass(&x), PassAttemptResult::passed());

        assert_eq!(
            summarize_journal(&path).unwrap(),
            JournalSummary {
                passed: 1,
                ran_red_light: 1,
                hit_car_in_front: 0,
            }
        );
    }

    #[test]
    fn broken_journal_does_not_change_results() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be appended to
        let controller = TrafficLightController::new().with_journal(TrafficJournal::new(dir.path()));
        let x = car(controller.get_unique_id());

        assert!(controller.queue(&x));
        controller.flip_light();
        assert_eq!(controller.pass(&x), PassAttemptResult::passed());
        assert!(controller.queued_cars().is_empty());
    }

    #[tokio::test]
    async fn journal_writes_from_a_runtime_still_land() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("passes.csv");
        let controller = TrafficLightController::new().with_journal(TrafficJournal::new(&path));
        let x = car(controller.get_unique_id());
        controller.pass(&x);

        // the write runs on the blocking pool; poll until it shows up
        let mut summary = JournalSummary::default();
        for _ in 0..200 {
            if let Ok(found) = summarize_journal(&path) {
                summary = found;
                if summary.total() == 1 {
                    break;
                }
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(summary.ran_red_light, 1);
    }
}
