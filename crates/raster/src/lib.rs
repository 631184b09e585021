#![deny(unsafe_code)]
//! CPU-side rendering of wave field frames.
//!
//! The browser draws [`Frame`](wave_field_core::Frame)s onto a 2D canvas;
//! this crate does the same into a plain RGBA buffer so frames, and the
//! noise underneath them, can be inspected and saved without a browser.
//! Both the CLI and the tests depend on it.

pub mod noise_map;
pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

pub use noise_map::{lattice_noise, noise_to_rgba};
pub use pixel::{frame_to_rgba, Raster};
