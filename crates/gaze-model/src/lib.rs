//! GazeCue Data Model
//!
//! Defines the data contracts shared by every stage of the gaze pipeline:
//! - **Frames:** Indexed, timeline-stamped frames with an opaque payload
//! - **Landmarks:** Named eye landmarks and the face-mesh topology they come from
//! - **Events:** Gaze samples, accepted gaze events, and caption cues
//! - **Traces:** JSONL recordings of per-frame landmark sets
//!
//! All landmark coordinates are normalized to `[0.0, 1.0]` relative to the
//! frame dimensions.

pub mod event;
pub mod frame;
pub mod landmark;
pub mod trace;

pub use event::*;
pub use frame::*;
pub use landmark::*;
pub use trace::*;
