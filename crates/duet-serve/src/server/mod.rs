pub mod api;
pub mod state;

pub use api::create_router;
pub use state::AppState;

use crate::error::{Result, ServeError};
use duet_speech::TTSProvider;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allow the page and API to be used from other origins
    pub share: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7860,
            share: false,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Start the HTTP server around an already-loaded provider
///
/// # Example
///
/// ```no_run
/// use duet_serve::{serve, ServerConfig};
/// use duet_speech::providers::remote::{RemoteTTS, RemoteTTSConfig};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let provider = RemoteTTS::connect(RemoteTTSConfig::new(
///         "http://127.0.0.1:9880",
///         "./pretrained_models",
///     ))
///     .await?;
///
///     serve(ServerConfig::default(), Arc::new(provider)).await?;
///     Ok(())
/// }
/// ```
pub async fn serve(config: ServerConfig, provider: Arc<dyn TTSProvider>) -> Result<()> {
    log::info!("Initializing Duet HTTP server");
    log::debug!("Server configuration: {:?}", config);

    let model = provider.get_current_model();
    log::info!(
        "Serving model '{}' through provider '{}'",
        model.name,
        provider.provider_name()
    );

    let state = Arc::new(AppState::new(provider));

    let mut app = create_router(state).layer(TraceLayer::new_for_http());
    if config.share {
        log::info!("Sharing enabled: accepting cross-origin requests");
        app = app.layer(CorsLayer::permissive());
    }

    let addr = config.addr();
    log::info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        log::error!("Failed to bind to {}: {}", addr, e);
        ServeError::BindError(addr.clone(), e)
    })?;

    log::info!("Server is ready: open http://{}/ in a browser", addr);

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("Server error: {}", e);
        return Err(ServeError::ServerError(e.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:7860");
        assert!(!config.share);
    }

    #[tokio::test]
    async fn test_serve_reports_bind_error() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: taken.local_addr().unwrap().port(),
            share: false,
        };

        let provider = Arc::new(duet_test_utils::MockTTSProvider::new());
        let err = serve(config.clone(), provider).await.unwrap_err();
        match err {
            ServeError::BindError(addr, _) => assert_eq!(addr, config.addr()),
            other => panic!("Unexpected error: {other:?}"),
        }
    }
}
