//! Configuration for the remote model worker

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for [`RemoteTTS`](super::RemoteTTS)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteTTSConfig {
    /// Base URL of the inference worker
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Directory containing the pretrained model assets, as seen by the worker
    pub pretrained_dir: PathBuf,

    /// Device the worker should load the model on (default: cuda)
    #[serde(default = "default_device")]
    pub device: String,

    /// Generation type requested at load time; dialogue serves both modes
    #[serde(default = "default_gen_type")]
    pub gen_type: String,

    /// Per-request timeout in seconds (default: 600)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// Default value functions
fn default_endpoint() -> String {
    "http://127.0.0.1:9880".to_string()
}

fn default_device() -> String {
    "cuda".to_string()
}

fn default_gen_type() -> String {
    "dialogue".to_string()
}

fn default_timeout_secs() -> u64 {
    600
}

impl RemoteTTSConfig {
    pub fn new(endpoint: impl Into<String>, pretrained_dir: impl Into<PathBuf>) -> Self {
        Self {
            endpoint: endpoint.into(),
            pretrained_dir: pretrained_dir.into(),
            device: default_device(),
            gen_type: default_gen_type(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = device.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Join a worker route onto the endpoint
    pub(crate) fn url(&self, route: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_json() {
        let config: RemoteTTSConfig =
            serde_json::from_str(r#"{"pretrained_dir":"/models/tts"}"#).unwrap();
        assert_eq!(config.endpoint, "http://127.0.0.1:9880");
        assert_eq!(config.device, "cuda");
        assert_eq!(config.gen_type, "dialogue");
        assert_eq!(config.timeout_secs, 600);
    }

    #[test]
    fn test_url_join() {
        let config = RemoteTTSConfig::new("http://worker:9880/", "/models");
        assert_eq!(config.url("v1/load"), "http://worker:9880/v1/load");
    }

    #[test]
    fn test_builder_methods() {
        let config = RemoteTTSConfig::new("http://worker", "/models")
            .with_device("cpu")
            .with_timeout_secs(30);
        assert_eq!(config.device, "cpu");
        assert_eq!(config.timeout_secs, 30);
    }
}
