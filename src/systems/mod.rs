pub mod behaviors;
pub mod temperature;
