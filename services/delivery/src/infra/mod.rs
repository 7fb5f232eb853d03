pub mod db;
pub mod notification;
