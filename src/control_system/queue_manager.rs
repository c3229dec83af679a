use crate::control_system::intersection_state::IntersectionState;
use crate::models::intersection::LightState;
use crate::models::vehicle::CarId;

/// Outcome of a request to join the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueAdmission {
    Admitted,
    /// Queuing only makes sense while the light is red.
    LightNotRed,
    AlreadyQueued,
}

impl QueueAdmission {
    pub fn is_admitted(self) -> bool {
        self == QueueAdmission::Admitted
    }
}

/// Put the car at the tail of the queue if the light is red and the car is
/// not already waiting. A refusal leaves the state untouched.
pub fn try_queue(state: &mut IntersectionState, car_id: CarId) -> QueueAdmission {
    if state.light_state() != LightState::Red {
        return QueueAdmission::LightNotRed;
    }
    if !state.enqueue(car_id) {
        return QueueAdmission::AlreadyQueued;
    }
    QueueAdmission::Admitted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_on_red() {
        let mut state = IntersectionState::new();
        assert_eq!(try_queue(&mut state, CarId(1)), QueueAdmission::Admitted);
        assert!(state.is_first_in_line(CarId(1)));
    }

    #[test]
    fn refuses_on_green_whatever_the_queue_holds() {
        let mut state = IntersectionState::new();
        try_queue(&mut state, CarId(1));
        state.set_light_state(LightState::Green);

        assert_eq!(try_queue(&mut state, CarId(2)), QueueAdmission::LightNotRed);
        assert_eq!(try_queue(&mut state, CarId(1)), QueueAdmission::LightNotRed);
        assert_eq!(state.queued_cars().collect::<Vec<_>>(), vec![CarId(1)]);
    }

    #[test]
    fn second_request_from_same_car_is_refused() {
        let mut state = IntersectionState::new();
        assert!(try_queue(&mut state, CarId(5)).is_admitted());
        assert_eq!(try_queue(&mut state, CarId(5)), QueueAdmission::AlreadyQueued);
        assert_eq!(state.queue_len(), 1);
    }
}
