pub mod measurement;
pub mod measurement_reading;
pub mod station;
