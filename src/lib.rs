pub mod aggregate;
pub mod dataset;
pub mod filters;
pub mod sample;
pub mod state;
