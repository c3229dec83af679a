//! Controller behaviour under concurrent callers.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Barrier;
use std::thread;

use traffic_light_sim::control_system::traffic_light_controller::TrafficLightController;
use traffic_light_sim::models::intersection::{LightState, PassAttemptResult};
use traffic_light_sim::models::vehicle::{CarDesc, CarId};

const THREADS: usize = 8;
const PER_THREAD: usize = 250;

#[test]
fn concurrent_id_allocation_has_no_duplicates_or_gaps() {
    let controller = TrafficLightController::new();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let controller = controller.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let ids: Vec<CarId> = (0..PER_THREAD).map(|_| controller.get_unique_id()).collect();
                // each caller sees its own ids strictly increasing
                assert!(ids.windows(2).all(|w| w[0] < w[1]));
                ids
            })
        })
        .collect();

    let mut all = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(all.insert(id), "duplicate id {id}");
        }
    }
    let total = (THREADS * PER_THREAD) as u64;
    assert_eq!(all.len() as u64, total);
    assert!((1..=total).all(|n| all.contains(&CarId(n))));
}

#[test]
fn concurrent_queue_requests_admit_each_car_once() {
    let controller = TrafficLightController::new();
    let barrier = Arc::new(Barrier::new(THREADS));
    let car = CarDesc::new(CarId(42), "DUP 001", "Jack Jackson");

    let admitted: usize = (0..THREADS)
        .map(|_| {
            let controller = controller.clone();
            let barrier = Arc::clone(&barrier);
            let car = car.clone();
            thread::spawn(move || {
                barrier.wait();
                controller.queue(&car)
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|&ok| ok)
        .count();

    assert_eq!(admitted, 1);
    assert_eq!(controller.queued_cars(), vec![CarId(42)]);
}

#[test]
fn passes_racing_light_flips_never_leave_cars_queued() {
    let controller = TrafficLightController::new();
    let cars: Vec<CarDesc> = (0..64)
        .map(|_| CarDesc::new(controller.get_unique_id(), "RCE 000", "Steve Steveson"))
        .collect();
    for car in &cars {
        assert!(controller.queue(car));
    }

    let flipper = {
        let controller = controller.clone();
        thread::spawn(move || {
            for _ in 0..500 {
                controller.flip_light();
            }
        })
    };
    let passers: Vec<_> = cars
        .chunks(16)
        .map(|chunk| {
            let controller = controller.clone();
            let chunk = chunk.to_vec();
            thread::spawn(move || {
                for car in &chunk {
                    controller.pass(car);
                    assert!(!controller.queued_cars().contains(&car.car_id));
                }
            })
        })
        .collect();

    flipper.join().unwrap();
    for p in passers {
        p.join().unwrap();
    }
    assert_eq!(controller.queue_len(), 0);
    // 500 flips from red lands back on red
    assert_eq!(controller.get_light_state(), LightState::Red);
}

#[test]
fn direct_pass_on_green_is_allowed_ahead_of_waiting_cars() {
    let controller = TrafficLightController::new();
    let waiting = CarDesc::new(controller.get_unique_id(), "WAI 001", "John Johnson");
    let newcomer = CarDesc::new(controller.get_unique_id(), "NEW 002", "Peter Peterson");
    assert!(controller.queue(&waiting));
    controller.flip_light();

    assert_eq!(controller.pass(&newcomer), PassAttemptResult::passed());
    assert!(controller.is_first_in_line(waiting.car_id));
}
