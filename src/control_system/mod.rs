// control_system/mod.rs
pub mod intersection_state;
pub mod light_timer;
pub mod pass_arbiter;
pub mod queue_manager;
pub mod traffic_light_controller;
