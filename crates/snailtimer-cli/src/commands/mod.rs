pub mod config;
pub mod stats;
pub mod task;
pub mod timer;
pub mod whoami;
