pub mod app;
pub mod core;
pub mod queue;
pub mod sensor;
