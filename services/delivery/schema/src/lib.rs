pub mod deliveries;
pub mod driver_applications;
