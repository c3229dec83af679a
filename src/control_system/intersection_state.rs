use std::collections::VecDeque;

use crate::models::intersection::LightState;
use crate::models::vehicle::CarId;

/// Mutable state of the intersection.
///
/// Holds no lock of its own; `TrafficLightController` keeps it behind a single
/// mutex so every method here runs inside one critical section.
#[derive(Debug, Clone, Default)]
pub struct IntersectionState {
    /// Last unique ID handed out. Zero means none yet.
    last_unique_id: u64,
    light_state: LightState,
    /// Waiting cars, head of line first. No duplicates.
    car_queue: VecDeque<CarId>,
}

impl IntersectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_unique_id(&mut self) -> CarId {
        self.last_unique_id += 1;
        CarId(self.last_unique_id)
    }

    pub fn light_state(&self) -> LightState {
        self.light_state
    }

    #[cfg(test)]
    pub fn set_light_state(&mut self, state: LightState) {
        self.light_state = state;
    }

    /// Switch the light and return the new state.
    pub fn flip_light(&mut self) -> LightState {
        self.light_state = self.light_state.toggled();
        self.light_state
    }

    pub fn is_queued(&self, car_id: CarId) -> bool {
        self.car_queue.contains(&car_id)
    }

    pub fn is_first_in_line(&self, car_id: CarId) -> bool {
        self.car_queue.front() == Some(&car_id)
    }

    /// Append the car to the queue unless it is already waiting.
    /// Returns false, leaving the queue untouched, on a duplicate.
    pub fn enqueue(&mut self, car_id: CarId) -> bool {
        if self.is_queued(car_id) {
            return false;
        }
        self.car_queue.push_back(car_id);
        true
    }

    pub fn remove_from_queue(&mut self, car_id: CarId) {
        self.car_queue.retain(|id| *id != car_id);
    }

    pub fn queue_len(&self) -> usize {
        self.car_queue.len()
    }

    pub fn queued_cars(&self) -> impl Iterator<Item = CarId> + '_ {
        self.car_queue.iter().copied()
    }
}
