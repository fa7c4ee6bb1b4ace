use std::path::PathBuf;
use std::sync::Arc;

use crate::lister::EmojiLister;
use crate::slack::SlackApi;
use crate::uploader::EmojiUploader;

#[derive(Clone)]
pub struct AppState {
    pub lister: EmojiLister,
    pub uploader: EmojiUploader,
    /// Masked credential prefix surfaced by `/ping`.
    pub token_hint: String,
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(slack: Arc<dyn SlackApi>, token_hint: String, static_dir: Option<PathBuf>) -> Self {
        Self {
            lister: EmojiLister::new(Arc::clone(&slack)),
            uploader: EmojiUploader::new(slack),
            token_hint,
            static_dir,
        }
    }
}
