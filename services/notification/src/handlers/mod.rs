pub mod notification;
pub mod ws;
