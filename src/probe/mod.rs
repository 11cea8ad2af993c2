// src/probe/mod.rs
mod prober;
mod watcher;

pub use prober::HealthProber;
pub use watcher::ProbeWatcher;
