#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use tokio::sync::Mutex;

use emojibridge::slack::{SlackApi, SlackError, UploadDestination};
use emojibridge::state::AppState;

pub fn api_err(method: &'static str, code: &str) -> SlackError {
    SlackError::Api {
        method,
        code: code.to_string(),
    }
}

/// Scripted in-memory Slack double. Remote calls are recorded in order,
/// failures can be armed per method, and `add_emoji` mutates the registry
/// the way the real workspace would.
#[derive(Default)]
pub struct ScriptedSlack {
    pub state: Mutex<ScriptedState>,
}

#[derive(Default)]
pub struct ScriptedState {
    /// The remote emoji registry served by `emoji_list`.
    pub emoji: HashMap<String, String>,
    /// Remote method names in call order.
    pub calls: Vec<&'static str>,
    /// Filenames passed to `file_upload_url`.
    pub upload_filenames: Vec<String>,
    /// Titles passed to `complete_upload`.
    pub completed_titles: Vec<String>,
    pub fail_emoji_list: Option<SlackError>,
    pub fail_upload_url: Option<SlackError>,
    pub fail_put_file: Option<SlackError>,
    pub fail_complete: Option<SlackError>,
    pub fail_share: Option<SlackError>,
    pub fail_add: Option<SlackError>,
}

impl ScriptedSlack {
    pub fn with_emoji(pairs: &[(&str, &str)]) -> Self {
        let emoji = pairs
            .iter()
            .map(|(n, u)| (n.to_string(), u.to_string()))
            .collect();
        Self {
            state: Mutex::new(ScriptedState {
                emoji,
                ..Default::default()
            }),
        }
    }

    pub async fn calls(&self) -> Vec<&'static str> {
        self.state.lock().await.calls.clone()
    }

    pub async fn registry(&self) -> HashMap<String, String> {
        self.state.lock().await.emoji.clone()
    }
}

#[async_trait]
impl SlackApi for ScriptedSlack {
    async fn emoji_list(&self) -> Result<HashMap<String, String>, SlackError> {
        let mut state = self.state.lock().await;
        state.calls.push("emoji.list");
        if let Some(err) = state.fail_emoji_list.take() {
            return Err(err);
        }
        Ok(state.emoji.clone())
    }

    async fn file_upload_url(
        &self,
        filename: &str,
        _length: usize,
    ) -> Result<UploadDestination, SlackError> {
        let mut state = self.state.lock().await;
        state.calls.push("files.getUploadURLExternal");
        state.upload_filenames.push(filename.to_string());
        if let Some(err) = state.fail_upload_url.take() {
            return Err(err);
        }
        Ok(UploadDestination {
            upload_url: "https://files.example.com/upload/F42".to_string(),
            file_id: "F42".to_string(),
        })
    }

    async fn put_file(&self, _upload_url: &str, _bytes: Vec<u8>) -> Result<(), SlackError> {
        let mut state = self.state.lock().await;
        state.calls.push("put_file");
        if let Some(err) = state.fail_put_file.take() {
            return Err(err);
        }
        Ok(())
    }

    async fn complete_upload(&self, _file_id: &str, title: &str) -> Result<(), SlackError> {
        let mut state = self.state.lock().await;
        state.calls.push("files.completeUploadExternal");
        state.completed_titles.push(title.to_string());
        if let Some(err) = state.fail_complete.take() {
            return Err(err);
        }
        Ok(())
    }

    async fn share_public(&self, file_id: &str) -> Result<String, SlackError> {
        let mut state = self.state.lock().await;
        state.calls.push("files.sharedPublicURL");
        if let Some(err) = state.fail_share.take() {
            return Err(err);
        }
        Ok(format!(
            "https://files.example.com/{file_id}/emoji.png?pub_secret=stub"
        ))
    }

    async fn add_emoji(&self, name: &str, url: &str) -> Result<(), SlackError> {
        let mut state = self.state.lock().await;
        state.calls.push("admin.emoji.add");
        if let Some(err) = state.fail_add.take() {
            return Err(err);
        }
        state.emoji.insert(name.to_string(), url.to_string());
        Ok(())
    }
}

/// Full application router over a scripted Slack double.
pub fn test_app(slack: Arc<ScriptedSlack>) -> Router {
    let state = AppState::new(slack, "xoxp...".to_string(), None);
    emojibridge::routes::router(state)
}

pub const TEST_BOUNDARY: &str = "emojibridge-test-boundary";

/// Build a `multipart/form-data` body with the given `name` and `file`
/// parts. Returns `(content_type, body)`.
pub fn multipart_body(name: Option<&str>, file: Option<&[u8]>) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    if let Some(name) = name {
        body.extend_from_slice(
            format!(
                "--{TEST_BOUNDARY}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\n{name}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{TEST_BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"emoji.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(file);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{TEST_BOUNDARY}--\r\n").as_bytes());
    (
        format!("multipart/form-data; boundary={TEST_BOUNDARY}"),
        body,
    )
}
