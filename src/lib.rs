#![forbid(unsafe_code)]
//! Cam-groove wheels from rhythmic loops.
//!
//! A loop's onset ticks are normalized to angular positions ([`TriggerTimeline`]),
//! split across at most two wheels per channel ([`disentangle`]), turned into a
//! closed groove contour ([`PathSynthesizer`]) and finally drawn as SVG
//! ([`WheelDocument`]). [`build_wheels`] runs the whole chain for a [`LoopSource`].

pub mod calibration;
pub mod config;
pub mod document;
pub mod foundation;
pub mod pipeline;
pub mod timeline;
pub mod wheel;

pub use calibration::{CalibrationWheel, FallGroup, fall_sweep, rest_sweep, standard_wheels};
pub use config::{MAX_SEARCH_SIZE_LIMIT, WheelConfig};
pub use document::{DocumentStyle, PX_PER_MM, WheelDocument, WheelLabels, path_data};
pub use foundation::core::{BezPath, Point, Turn, Vec2, polar_point};
pub use foundation::error::{GrooveError, GrooveResult};
pub use pipeline::{
    BuildThreading, ChannelWheels, Wheel, WheelRole, build_channel, build_channels, build_wheel,
    build_wheels, triggers_for,
};
pub use timeline::normalize::TriggerTimeline;
pub use timeline::source::{LoopSource, TimeSignature};
pub use wheel::assign::{WheelLayout, disentangle};
pub use wheel::path::{GroovePath, PathPrimitive};
pub use wheel::synth::{PathSegment, PathSynthesizer, derive_segments};
pub use wheel::trigger::{GrooveForm, Trigger, TriggerSet, WheelSpec};
