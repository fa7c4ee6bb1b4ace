use axum::extract::{Multipart, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::AppError;
use crate::lister::EmojiPage;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListEmojisQuery {
    pub query: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

pub async fn list_emojis(
    state: State<AppState>,
    Query(params): Query<ListEmojisQuery>,
) -> Result<Json<EmojiPage>, AppError> {
    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(25);
    let result = state
        .lister
        .list(params.query.as_deref(), page, per_page)
        .await?;
    Ok(Json(result))
}

pub async fn add_emoji(
    state: State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut name: Option<String> = None;
    let mut image: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("name") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("unreadable name field: {e}")))?;
                name = Some(text);
            }
            Some("file") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("unreadable file field: {e}")))?;
                image = Some(bytes.to_vec());
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| AppError::Validation("missing name field".to_string()))?;
    let image = image.ok_or_else(|| AppError::Validation("missing file field".to_string()))?;
    if image.is_empty() {
        return Err(AppError::Validation("file field is empty".to_string()));
    }

    state.uploader.upload(&name, image).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
