//! # Duet Serve
//!
//! Request handlers and the browser demo server for Duet.
//!
//! The dialogue and monologue flows in [`synthesis`] are plain async
//! functions: they validate the user's input, and only when it passes do they
//! call the injected [`TTSProvider`](duet_speech::TTSProvider). The HTTP layer
//! is a thin axum wrapper around them.

pub mod error;
pub mod synthesis;
pub mod view;

pub use error::{Result, ServeError};
pub use synthesis::{
    DialogueInput, MonologueInput, SynthesisOutcome, dialogue_synthesis, monologue_synthesis,
    prepare_dialogue, prepare_monologue,
};
pub use view::{Form, FormView, PromptGroupView, form_view};

#[cfg(feature = "http-serve")]
mod server;

#[cfg(feature = "http-serve")]
pub use server::{AppState, ServerConfig, create_router, serve};
