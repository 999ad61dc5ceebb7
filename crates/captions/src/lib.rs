//! GazeCue Captions
//!
//! Turns accepted gaze events into caption files:
//! - **Cues:** one fixed-length, fixed-text cue per event
//! - **Rendering:** WebVTT (default) and SRT output
//! - **Parsing:** reading caption files back into cues

pub mod cues;
pub mod subtitles;

pub use cues::*;
pub use subtitles::*;
