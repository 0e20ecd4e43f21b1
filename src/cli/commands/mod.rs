pub mod config;
pub mod dirty;
pub mod export;
pub mod import;
pub mod init;
pub mod log;
pub mod payroll;
pub mod reset;
pub mod teams;
pub mod touch;
