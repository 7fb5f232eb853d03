pub mod reset_codes;
pub mod users;
