//! Speech provider implementations
//!
//! This module contains concrete implementations of the TTS provider traits.
//! Each provider is feature-gated and can be enabled individually.

#[cfg(feature = "remote")]
pub mod remote;
