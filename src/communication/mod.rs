// communication/mod.rs
pub mod client;
pub mod messages;
pub mod routes;
pub mod server;
pub mod traffic_light_api;
