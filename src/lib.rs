//! Output lifecycle and layout coordination for a Wayland compositor.
//!
//! This crate discovers displays through a [`backend::Backend`], negotiates
//! their modes, arranges them in a shared coordinate space, applies client
//! reconfiguration batches atomically, derives each display's usable area,
//! and propagates topology changes to dependent subsystems exactly once per
//! logical change. See [`umbra::Umbra`] for the entry point.

pub mod backend;
pub mod hooks;
pub mod scene;
pub mod umbra;
pub mod utils;

pub use crate::umbra::Umbra;
