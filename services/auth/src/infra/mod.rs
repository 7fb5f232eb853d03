pub mod db;
pub mod google;
pub mod notification;
pub mod sessions;
pub mod users;
