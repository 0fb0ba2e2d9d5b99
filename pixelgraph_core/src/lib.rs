//! Shared types used across the pixelgraph workspace.
//!
//! This crate carries no engine logic of its own — it's the ambient layer the
//! graph engine and the operator ecosystem both sit on: rectangle/tile-grid
//! math, progress reporting, cooperative cancellation, and a small `Config`.

pub mod cancel;
pub mod config;
pub mod geometry;
pub mod progress;

pub use cancel::CancelFlag;
pub use config::Config;
pub use geometry::{Rectangle, TileGrid};
pub use progress::{NullProgress, ProgressTrait, SubProgress};
