use crate::control_system::intersection_state::IntersectionState;
use crate::models::intersection::{CrashReason, LightState, PassAttemptResult};
use crate::models::vehicle::CarId;

/// Decide whether a car gets through the intersection.
///
/// | light | car position      | result             |
/// |-------|-------------------|--------------------|
/// | Red   | head of line      | `RanRedLight`      |
/// | Red   | queued, not head  | `HitCarInFront`    |
/// | Red   | not queued        | `RanRedLight`      |
/// | Green | head of line      | passed             |
/// | Green | queued, not head  | `HitCarInFront`    |
/// | Green | not queued        | passed             |
///
/// A queued car is removed from the queue whatever the result, so after this
/// call the car is never waiting.
pub fn adjudicate_pass(state: &mut IntersectionState, car_id: CarId) -> PassAttemptResult {
    if !state.is_queued(car_id) {
        // never lined up: free road on green, a red light otherwise
        return match state.light_state() {
            LightState::Green => PassAttemptResult::passed(),
            LightState::Red => PassAttemptResult::crashed(CrashReason::RanRedLight),
        };
    }

    let result = match (state.light_state(), state.is_first_in_line(car_id)) {
        (LightState::Green, true) => PassAttemptResult::passed(),
        (LightState::Red, true) => PassAttemptResult::crashed(CrashReason::RanRedLight),
        (_, false) => PassAttemptResult::crashed(CrashReason::HitCarInFront),
    };
    state.remove_from_queue(car_id);
    result
}
