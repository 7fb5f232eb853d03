pub mod email;
pub mod memory;
pub mod sms;
