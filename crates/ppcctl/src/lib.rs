// ppcctl/src/lib.rs
pub mod config;

pub use config::CtlConfig;
