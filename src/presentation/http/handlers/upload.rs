use crate::application::upload_track::{
    dto::{UploadTrackInput, UploadedFile},
    use_case::UploadTrackUseCase,
};
use crate::domain::track::entity::Track;
use crate::presentation::http::{errors::AppError, state::AppState};
use axum::{
    Json,
    extract::{Multipart, State},
};

/// Admin: upload a new track.
///
/// Multipart fields: `audio` (required), `cover` (optional), `title`, `bpm`,
/// `music_key`, `description`, `for_sale`, `price`. BPM and key typically
/// arrive pre-filled by the in-browser analysis; the server just stores them.
pub async fn upload_track(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Track>, AppError> {
    let mut audio = None;
    let mut cover = None;
    let mut title = String::new();
    let mut bpm = 0i32;
    let mut music_key = String::new();
    let mut description = None;
    let mut for_sale = false;
    let mut price = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::BadRequest("Field error".into()))?
    {
        match field.name().unwrap_or("") {
            "audio" => {
                let file_name = field.file_name().unwrap_or("track.bin").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| AppError::BadRequest("Byte error".into()))?;
                audio = Some(UploadedFile {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            "cover" => {
                let file_name = field.file_name().unwrap_or("cover.bin").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| AppError::BadRequest("Byte error".into()))?;
                cover = Some(UploadedFile {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            "title" => title = field.text().await.unwrap_or_default(),
            "bpm" => {
                bpm = field
                    .text()
                    .await
                    .unwrap_or_default()
                    .trim()
                    .parse()
                    .unwrap_or(0)
            }
            "music_key" => music_key = field.text().await.unwrap_or_default(),
            "description" => description = Some(field.text().await.unwrap_or_default()),
            "for_sale" => for_sale = field.text().await.unwrap_or_default().trim() == "true",
            "price" => price = field.text().await.unwrap_or_default().trim().parse().ok(),
            _ => {}
        }
    }

    let audio = audio.ok_or(AppError::BadRequest("Missing audio file".into()))?;

    let use_case = UploadTrackUseCase::new(state.track_repo.clone(), state.storage.clone());
    let track = use_case
        .execute(UploadTrackInput {
            title,
            bpm,
            music_key,
            description,
            for_sale,
            price,
            audio,
            cover,
        })
        .await?;

    Ok(Json(track))
}
