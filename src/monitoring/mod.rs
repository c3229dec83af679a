// monitoring/mod.rs
pub mod traffic_journal;
