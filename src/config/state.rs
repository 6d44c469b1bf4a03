// Application state module
// Bundles the configuration and the loaded store for sharing across tasks

use crate::store::EmojiStore;

use super::types::Config;

/// Application state
///
/// Immutable after startup; shared by `Arc` across connection tasks, so
/// handlers read it without locking.
pub struct AppState {
    pub config: Config,
    pub store: EmojiStore,
}

impl AppState {
    pub const fn new(config: Config, store: EmojiStore) -> Self {
        Self { config, store }
    }
}
