pub mod config;
pub mod room_name;
