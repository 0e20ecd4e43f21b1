pub mod config;
pub mod export;
pub mod import;
pub mod log;
pub mod reset;
pub mod status;
pub mod teams;
pub mod touch;
