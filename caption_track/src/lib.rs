//! # Caption Track: Pushing Cues onto a Platform Caption Surface
//!
//! This crate bridges the renderer-agnostic [`caption_core::Cue`] and whatever caption
//! engine actually draws text on screen. An engine is described by two traits:
//!
//! - [`PlatformCue`]: a single caption object, constructed from start/end/text, with
//!   optional setters for alignment, writing direction, line, position and size;
//! - [`TextTrack`]: an ordered collection of caption objects that supports adding and
//!   removing one object at a time.
//!
//! [`CaptionTrackAdapter`] owns one track and keeps it in sync with the cue timeline:
//! [`CaptionTrackAdapter::append`] converts and adds renderable cues, and
//! [`CaptionTrackAdapter::remove`] evicts every caption object overlapping a time range.
//!
//! Some engines silently ignore `align = center`; the conversion step reads the value
//! back and retries with `middle` when that happens.
//!
//! [`InMemoryTrack`] is a reference engine with WebVTT semantics, and [`to_webvtt`]
//! serialises it.
//!
//! ## Examples
//!
//! ```rust
//! use caption_core::{Cue, TextAlign};
//! use caption_track::{CaptionTrackAdapter, InMemoryTrack, TextTrack};
//!
//! let mut cue = Cue::new(1.0, 2.5, "Hello");
//! cue.text_align = Some(TextAlign::Left);
//!
//! let mut adapter = CaptionTrackAdapter::new(InMemoryTrack::new());
//! adapter.append(&[cue, Cue::new(3.0, 3.0, "dropped")]);
//! assert_eq!(adapter.track().cues().len(), 1);
//!
//! adapter.remove(0.0, 1.0);
//! assert_eq!(adapter.track().cues().len(), 1);
//! adapter.remove(2.0, 10.0);
//! assert!(adapter.track().is_empty());
//! ```

pub mod adapter;
pub mod convert;
pub mod memory;
pub mod platform;
pub mod webvtt;

pub use adapter::CaptionTrackAdapter;
pub use convert::{apply_align, to_platform_cue};
pub use memory::{InMemoryTrack, VttCue};
pub use platform::{
    AlignSetting, LineAlignSetting, PlatformCue, PositionAlignSetting, TextTrack, VerticalSetting,
};
pub use webvtt::to_webvtt;
