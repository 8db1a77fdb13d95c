pub mod provider;

pub use provider::{MockTTSProvider, RecordedCall};
