use duet_speech::TTSProvider;
use std::sync::Arc;
use std::time::Instant;

/// Handles shared by every request, built once before serving
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn TTSProvider>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(provider: Arc<dyn TTSProvider>) -> Self {
        Self {
            provider,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
