//! Tactile Touch Model
//!
//! Defines the data contracts shared by the recognizer and its tooling:
//! - **Vector:** 2D screen positions and displacement math
//! - **Touch:** Multi-point touch snapshots delivered by the platform
//! - **Gesture:** Synthesized pan gesture notifications
//! - **Stream:** JSONL encoding of touch event streams
//! - **Synth:** Scripted touch traces for tests and demos
//!
//! Positions are screen coordinates in device-independent pixels;
//! timestamps are monotonic milliseconds.

pub mod gesture;
pub mod stream;
pub mod synth;
pub mod touch;
pub mod vector;

pub use gesture::*;
pub use stream::*;
pub use touch::*;
pub use vector::*;
