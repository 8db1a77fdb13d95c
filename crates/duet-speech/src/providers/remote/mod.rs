//! Remote model-worker provider
//!
//! The pretrained model runs in a separate inference worker. This provider
//! loads it once through `/v1/load` and then forwards validated requests.
//!
//! # Examples
//!
//! ```no_run
//! use duet_speech::providers::remote::{RemoteTTS, RemoteTTSConfig};
//! use duet_speech::{DialogueScript, DialogueRequest, SamplingParams, TTSSpeechProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RemoteTTSConfig::new("http://127.0.0.1:9880", "./pretrained_models");
//!     let provider = RemoteTTS::connect(config).await?;
//!
//!     let request = DialogueRequest {
//!         script: DialogueScript::parse("[S1]Hello.[S2]Hi there.")?,
//!         prompts: None,
//!         sampling: SamplingParams::DIALOGUE,
//!     };
//!
//!     let response = provider.generate_dialogue(request).await?;
//!     println!("Generated {} ms of audio", response.duration_ms);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;

mod provider;
mod wire;

// Re-exports
pub use config::RemoteTTSConfig;
pub use error::{RemoteTTSError, Result};
pub use provider::RemoteTTS;
