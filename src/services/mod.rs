pub mod engine;
pub mod explain;
pub mod features;
pub mod providers;
pub mod scoring;
