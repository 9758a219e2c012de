pub mod m202506010001_create_stations;
pub mod m202506010002_create_measurements;
pub mod m202506010003_create_measurement_readings;
