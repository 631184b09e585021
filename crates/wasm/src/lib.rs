#![deny(unsafe_code)]
//! Browser binding for the wave-field background.
//!
//! Exposes a `WavesBackground` class to JavaScript: construct it with a
//! container element and an options object to start the animation, call
//! `destroy()` to stop it. Everything DOM-specific lives here; the field,
//! the frame loop and the draw commands come from `wave-field-core`.
//!
//! Only compiled for `wasm32`; on other targets the crate is empty so the
//! workspace still builds and tests on the host.

#[cfg(target_arch = "wasm32")]
mod background;
#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod surface;

#[cfg(target_arch = "wasm32")]
pub use background::WavesBackground;
