pub mod geo;
pub mod mercator;
pub mod models;
