//! TuneQueue Console
//!
//! Terminal front end for the request queue and player: reads commands from
//! stdin or a script, drives a simulated audio device and prints every change
//! the playback controller reports.
//!
//! This library exposes the session components for testing purposes.

pub mod command;
pub mod config;
pub mod device;
pub mod error;
pub mod render;
pub mod session;

// Re-export commonly used types for convenience
pub use command::Command;
pub use config::{ConsoleConfig, DeviceSettings};
pub use device::SimulatedDevice;
pub use error::{ConsoleError, Result};
pub use session::{Flow, Session, StateDump};
