//! TuneQueue Core
//!
//! Platform-agnostic domain types and error handling for TuneQueue.
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `SongId`, `AudioRef`
//! - **Catalog**: the fixed, ordered song library loaded once per session
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use tunequeue_core::{Catalog, Song, SongId};
//!
//! let catalog = Catalog::new(vec![
//!     Song::new("1", "Midnight Drive", "Luna Waves", "Lo-fi", "audio/midnight-drive.mp3"),
//!     Song::new("2", "Neon Skies", "Pulse City", "EDM", "audio/neon-skies.mp3"),
//! ])
//! .unwrap();
//!
//! let song = catalog.get(&SongId::new("2")).unwrap();
//! assert_eq!(song.title, "Neon Skies");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

pub use error::{CoreError, Result};
pub use types::{AudioRef, Catalog, Song, SongId};
