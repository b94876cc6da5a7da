use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};
use dealflow_core::{
    frameworks::FrameworkKey,
    notes::{NewNote, Note},
};

#[derive(Debug, Default, Deserialize)]
struct NotesQuery {
    framework: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteBody {
    framework: String,
    content: String,
    author: Option<String>,
}

async fn list_notes(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(q): Query<NotesQuery>,
) -> ApiResult<Json<Vec<Note>>> {
    state.deal_service.get_deal(&id)?;
    let framework = q
        .framework
        .as_deref()
        .map(str::parse::<FrameworkKey>)
        .transpose()?;
    Ok(Json(state.note_service.list_notes(&id, framework)))
}

async fn add_note(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<NoteBody>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    state.deal_service.get_deal(&id)?;
    let note = state
        .note_service
        .add_note(NewNote {
            deal_id: id,
            framework: body.framework.parse()?,
            content: body.content,
            author: body.author,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/deals/{id}/notes", get(list_notes).post(add_note))
}
