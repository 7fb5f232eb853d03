pub mod google;
pub mod local;
pub mod password;
pub mod profile;
pub mod session;
