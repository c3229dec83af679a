// models/mod.rs
pub mod intersection;
pub mod vehicle;
