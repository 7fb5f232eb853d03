pub mod connection;
pub mod frame;
pub mod template;
