//! Core library for the Shape Timeline animation engine.
//!
//! Shapes carry an immutable base polygon and color plus an optional
//! [`Timeline`] of [`Step`]s. The [`ScenePlayer`] polls a [`Clock`], replays
//! every active timeline from the base state for the current instant and
//! hands the result to a [`Renderer`]. No state is accumulated between
//! frames, so playback is deterministic and can be restarted at will.

pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod player;
pub mod render;
pub mod scene;
pub mod step;
pub mod timeline;

pub use clock::{Clock, ManualClock, PlaybackClock};
pub use color::Color;
pub use config::{AppConfig, PlayerConfig};
pub use error::{AnimationError, Result};
pub use geometry::{Geometry, Point};
pub use player::{play_scene, CancelToken, PlaybackSummary, ScenePlayer};
pub use render::{JsonLinesRenderer, RecordingRenderer, RenderedFrame, Renderer, ShapeFrame, TracingRenderer};
pub use scene::{Scene, Shape};
pub use step::{lerp, Step};
pub use timeline::{TimedStep, Timeline};
