// Library exports for the snake arena
// The binaries (interactive run, replay, batch) all drive the same core through this crate

pub mod agent;
pub mod arena;
pub mod board;
pub mod config;
pub mod debug_logger;
pub mod profiler;
pub mod replay;
pub mod round;
pub mod scorer;
pub mod space;
pub mod types;
