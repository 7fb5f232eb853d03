pub mod delivery;
pub mod driver;
