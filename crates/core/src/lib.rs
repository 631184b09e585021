#![deny(unsafe_code)]
//! Core of the wave-field animated background.
//!
//! Provides the seeded Perlin noise (`WaveNoise`), the options (`WaveConfig`,
//! `Rgba`), pointer kinematics (`PointerState`), the spring-damped lattice
//! (`Grid`, `GridPoint`, `Viewport`), draw commands (`DrawCommand`, `Frame`),
//! the per-instance state (`WaveField`), and the host-agnostic frame loop
//! (`FrameLoop`, `FrameHost`, `Driver`, `Surface`).

pub mod color;
pub mod config;
pub mod draw;
pub mod driver;
pub mod error;
pub mod frame_loop;
pub mod grid;
pub mod noise;
pub mod params;
pub mod pointer;
pub mod scene;
pub mod seed;

pub use color::Rgba;
pub use config::WaveConfig;
pub use draw::{DrawCommand, Frame};
pub use driver::{Driver, RecordingSurface, Surface};
pub use error::WaveError;
pub use frame_loop::{CancelToken, FrameHost, FrameId, FrameLoop, LoopState, ManualHost};
pub use grid::{Grid, GridPoint, Viewport};
pub use self::noise::WaveNoise;
pub use pointer::PointerState;
pub use scene::WaveField;
pub use seed::{Drag, Seed};
