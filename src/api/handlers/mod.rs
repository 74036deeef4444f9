pub mod index;
pub mod metrics;
pub mod todos;
