//! CLI command implementations.

mod annotate;
mod config;
mod doctor;
mod serve;
mod transcript;

pub use annotate::run_annotate;
pub use config::run_config;
pub use doctor::run_doctor;
pub use serve::run_serve;
pub use transcript::run_transcript;
