use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::error::AppError;
use crate::slack::{SlackApi, SlackError};

/// Slack error codes that mean the token itself was rejected.
const AUTH_FAILURE_CODES: &[&str] = &["invalid_auth", "not_authed", "token_expired"];

const AUTH_FAILURE_MESSAGE: &str = "the configured token does not have emoji read access";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmojiEntry {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct EmojiPage {
    pub emojis: Vec<EmojiEntry>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

/// Lists the workspace's custom emoji: one upstream fetch, then local
/// filtering, search, ordering, and pagination.
#[derive(Clone)]
pub struct EmojiLister {
    slack: Arc<dyn SlackApi>,
}

impl EmojiLister {
    pub fn new(slack: Arc<dyn SlackApi>) -> Self {
        Self { slack }
    }

    pub async fn list(
        &self,
        query: Option<&str>,
        page: usize,
        per_page: usize,
    ) -> Result<EmojiPage, AppError> {
        let emoji = self.slack.emoji_list().await.map_err(map_list_error)?;
        let entries = shape_entries(emoji, query);
        Ok(paginate(entries, page, per_page))
    }
}

fn map_list_error(err: SlackError) -> AppError {
    match err {
        SlackError::Api { ref code, .. }
            if AUTH_FAILURE_CODES.iter().any(|c| code.contains(c)) =>
        {
            AppError::Auth(AUTH_FAILURE_MESSAGE.to_string())
        }
        other => AppError::Upstream(other.to_string()),
    }
}

/// Keep custom entries (URL-valued), apply the optional search, and order
/// them: Hangul-named emoji first, then everything else, each group by
/// case-folded name.
fn shape_entries(emoji: HashMap<String, String>, query: Option<&str>) -> Vec<EmojiEntry> {
    let mut entries: Vec<EmojiEntry> = emoji
        .into_iter()
        .filter(|(_, value)| value.starts_with("http"))
        .map(|(name, url)| EmojiEntry { name, url })
        .collect();

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        let needle = query.to_lowercase();
        entries.retain(|e| e.name.to_lowercase().contains(&needle));
    }

    entries.sort_by_key(|e| (!contains_hangul(&e.name), e.name.to_lowercase()));
    entries
}

fn contains_hangul(name: &str) -> bool {
    name.chars().any(|c| ('\u{AC00}'..='\u{D7A3}').contains(&c))
}

fn paginate(entries: Vec<EmojiEntry>, page: usize, per_page: usize) -> EmojiPage {
    let per_page = per_page.max(1);
    let total = entries.len();
    let total_pages = total.div_ceil(per_page);

    // Out-of-range pages are an empty slice, not an error.
    let start = page.saturating_sub(1).saturating_mul(per_page).min(total);
    let end = start.saturating_add(per_page).min(total);
    let emojis = entries[start..end].to_vec();

    EmojiPage {
        emojis,
        total,
        page,
        per_page,
        total_pages,
    }
}
