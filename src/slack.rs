use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

const SLACK_API_BASE: &str = "https://slack.com/api";

#[derive(Debug)]
pub enum SlackError {
    Http(reqwest::Error),
    Api { method: &'static str, code: String },
    Transfer { status: u16 },
    Malformed { method: &'static str, field: &'static str },
}

impl SlackError {
    /// The raw Slack error code, when the failure came from an `ok: false`
    /// envelope rather than the transport.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            SlackError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl fmt::Display for SlackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlackError::Http(e) => write!(f, "HTTP error: {e}"),
            SlackError::Api { method, code } => write!(f, "{method} failed: {code}"),
            SlackError::Transfer { status } => {
                write!(f, "file transfer rejected with status {status}")
            }
            SlackError::Malformed { method, field } => {
                write!(f, "{method} response missing {field}")
            }
        }
    }
}

impl From<reqwest::Error> for SlackError {
    fn from(e: reqwest::Error) -> Self {
        SlackError::Http(e)
    }
}

/// A staging slot granted by Slack for one file upload.
#[derive(Debug, Clone)]
pub struct UploadDestination {
    pub upload_url: String,
    pub file_id: String,
}

/// The subset of the Slack Web API this service depends on. Implemented by
/// [`SlackClient`] over the wire and by scripted doubles in tests.
#[async_trait]
pub trait SlackApi: Send + Sync {
    /// Full `name -> value` emoji map for the workspace. Values are image
    /// URLs for custom emoji and `alias:`/unicode references otherwise.
    async fn emoji_list(&self) -> Result<HashMap<String, String>, SlackError>;

    /// Ask for an upload destination for a file of `length` bytes.
    async fn file_upload_url(
        &self,
        filename: &str,
        length: usize,
    ) -> Result<UploadDestination, SlackError>;

    /// Transfer the raw bytes to a granted upload URL. Any non-2xx status
    /// is a failure.
    async fn put_file(&self, upload_url: &str, bytes: Vec<u8>) -> Result<(), SlackError>;

    /// Finalize a staged upload.
    async fn complete_upload(&self, file_id: &str, title: &str) -> Result<(), SlackError>;

    /// Publish the file and return its public image URL.
    async fn share_public(&self, file_id: &str) -> Result<String, SlackError>;

    /// Register `url` as a new custom emoji under `name`.
    async fn add_emoji(&self, name: &str, url: &str) -> Result<(), SlackError>;
}

#[derive(Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    token: String,
    team_id: String,
    base_url: String,
}

impl SlackClient {
    pub fn new(token: String, team_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
            team_id,
            base_url: SLACK_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.header("Authorization", format!("Bearer {}", self.token))
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }
}

#[derive(Deserialize)]
struct EmojiListResponse {
    ok: bool,
    error: Option<String>,
    emoji: Option<HashMap<String, String>>,
}

#[derive(Deserialize)]
struct UploadUrlResponse {
    ok: bool,
    error: Option<String>,
    upload_url: Option<String>,
    file_id: Option<String>,
}

#[derive(Deserialize)]
struct AckResponse {
    ok: bool,
    error: Option<String>,
}

#[derive(Deserialize)]
struct SharePublicResponse {
    ok: bool,
    error: Option<String>,
    file: Option<SharedFile>,
}

#[derive(Deserialize)]
struct SharedFile {
    url_private: Option<String>,
    permalink_public: Option<String>,
}

fn envelope_error(method: &'static str, error: Option<String>) -> SlackError {
    SlackError::Api {
        method,
        code: error.unwrap_or_else(|| "unknown_error".to_string()),
    }
}

/// Derive the publicly fetchable image URL for a shared file. The trailing
/// segment of `permalink_public` is the public secret.
fn public_image_url(url_private: &str, permalink_public: &str) -> String {
    let secret = permalink_public.rsplit('-').next().unwrap_or_default();
    format!("{url_private}?pub_secret={secret}")
}

#[async_trait]
impl SlackApi for SlackClient {
    async fn emoji_list(&self) -> Result<HashMap<String, String>, SlackError> {
        let builder = self.http.get(self.method_url("emoji.list"));
        let body: EmojiListResponse = self.apply_auth(builder).send().await?.json().await?;
        if !body.ok {
            return Err(envelope_error("emoji.list", body.error));
        }
        body.emoji.ok_or(SlackError::Malformed {
            method: "emoji.list",
            field: "emoji",
        })
    }

    async fn file_upload_url(
        &self,
        filename: &str,
        length: usize,
    ) -> Result<UploadDestination, SlackError> {
        let length = length.to_string();
        let builder = self
            .http
            .post(self.method_url("files.getUploadURLExternal"))
            .form(&[("filename", filename), ("length", length.as_str())]);
        let body: UploadUrlResponse = self.apply_auth(builder).send().await?.json().await?;
        if !body.ok {
            return Err(envelope_error("files.getUploadURLExternal", body.error));
        }
        let upload_url = body.upload_url.ok_or(SlackError::Malformed {
            method: "files.getUploadURLExternal",
            field: "upload_url",
        })?;
        let file_id = body.file_id.ok_or(SlackError::Malformed {
            method: "files.getUploadURLExternal",
            field: "file_id",
        })?;
        Ok(UploadDestination {
            upload_url,
            file_id,
        })
    }

    async fn put_file(&self, upload_url: &str, bytes: Vec<u8>) -> Result<(), SlackError> {
        // The upload URL is pre-signed; no bearer header here.
        let resp = self.http.put(upload_url).body(bytes).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SlackError::Transfer {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    async fn complete_upload(&self, file_id: &str, title: &str) -> Result<(), SlackError> {
        let builder = self
            .http
            .post(self.method_url("files.completeUploadExternal"))
            .json(&json!({ "files": [{ "id": file_id, "title": title }] }));
        let body: AckResponse = self.apply_auth(builder).send().await?.json().await?;
        if !body.ok {
            return Err(envelope_error("files.completeUploadExternal", body.error));
        }
        Ok(())
    }

    async fn share_public(&self, file_id: &str) -> Result<String, SlackError> {
        let builder = self
            .http
            .post(self.method_url("files.sharedPublicURL"))
            .form(&[("file", file_id)]);
        let body: SharePublicResponse = self.apply_auth(builder).send().await?.json().await?;
        if !body.ok {
            return Err(envelope_error("files.sharedPublicURL", body.error));
        }
        let file = body.file.ok_or(SlackError::Malformed {
            method: "files.sharedPublicURL",
            field: "file",
        })?;
        let url_private = file.url_private.ok_or(SlackError::Malformed {
            method: "files.sharedPublicURL",
            field: "url_private",
        })?;
        let permalink_public = file.permalink_public.ok_or(SlackError::Malformed {
            method: "files.sharedPublicURL",
            field: "permalink_public",
        })?;
        Ok(public_image_url(&url_private, &permalink_public))
    }

    async fn add_emoji(&self, name: &str, url: &str) -> Result<(), SlackError> {
        let builder = self
            .http
            .post(self.method_url("admin.emoji.add"))
            .form(&[
                ("name", name),
                ("url", url),
                ("team_id", self.team_id.as_str()),
            ]);
        let body: AckResponse = self.apply_auth(builder).send().await?.json().await?;
        if !body.ok {
            return Err(envelope_error("admin.emoji.add", body.error));
        }
        Ok(())
    }
}
