use axum::{
    Json,
    extract::{Multipart, Path, State},
    extract::rejection::JsonRejection,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use super::error_response::ApiError;
use super::models::{ArtworkResponse, OkResponse};
use super::state::GalleryState;
use crate::domain::artwork::entities::{Artwork, ArtworkId};
use crate::domain::artwork::value_objects::ImageRef;
use crate::domain::auth::entities::AdminSession;

#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    pub ids: Vec<String>,
}

/// Collected fields of an artwork upload form
struct UploadForm {
    author: Option<String>,
    order: Option<u32>,
    image: Option<UploadedImage>,
}

struct UploadedImage {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

/// List all artworks in display order with their like counts
pub async fn list_artworks(
    State(state): State<Arc<GalleryState>>,
) -> Result<Json<Vec<ArtworkResponse>>, ApiError> {
    let artworks = state.artworks.list_ordered().await?;
    let counts = state.likes.counts().await?;

    let responses = artworks
        .iter()
        .map(|artwork| {
            let like_count = counts.get(&artwork.id).copied().unwrap_or(0);
            ArtworkResponse::from_artwork(artwork, like_count)
        })
        .collect();

    Ok(Json(responses))
}

/// Create a new artwork from a multipart upload
pub async fn create_artwork(
    _session: AdminSession,
    State(state): State<Arc<GalleryState>>,
    mut multipart: Multipart,
) -> Result<Json<ArtworkResponse>, ApiError> {
    let form = read_upload_form(&mut multipart).await?;

    let image = form
        .image
        .ok_or_else(|| ApiError::validation("Image file is required"))?;
    if image.bytes.is_empty() {
        return Err(ApiError::validation("Image file is empty"));
    }

    let display_order = match form.order {
        Some(order) => order,
        None => state.artworks.next_display_order().await?,
    };

    let id = ArtworkId::generate();
    let image_ref = ImageRef::for_upload(
        &id,
        image.file_name.as_deref(),
        image.content_type.as_deref(),
        &image.bytes,
    );
    let artwork = Artwork::with_id(id, form.author.unwrap_or_default(), display_order, image_ref);
    artwork
        .validate()
        .map_err(|e| ApiError::validation(e.to_string()))?;

    state.images.put(&artwork.image.file_name, &image.bytes).await?;
    state.artworks.save(&artwork).await?;

    info!("Artwork created: {} by {}", artwork.id, artwork.author);

    Ok(Json(ArtworkResponse::from_artwork(&artwork, 0)))
}

/// Update an existing artwork; all form fields are optional
pub async fn update_artwork(
    _session: AdminSession,
    State(state): State<Arc<GalleryState>>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ArtworkResponse>, ApiError> {
    let id = parse_artwork_id(&id)?;
    let mut artwork = state
        .artworks
        .find_by_id(&id)
        .await?
        .ok_or_else(|| artwork_not_found(&id))?;

    let form = read_upload_form(&mut multipart).await?;

    let mut new_image: Option<(String, Vec<u8>)> = None;
    if let Some(author) = form.author {
        artwork.set_author(author);
    }
    if let Some(order) = form.order {
        artwork.set_display_order(order);
    }
    if let Some(image) = form.image {
        if image.bytes.is_empty() {
            return Err(ApiError::validation("Image file is empty"));
        }
        let previous_file = artwork.image.file_name.clone();
        let image_ref = ImageRef::for_upload(
            &id,
            image.file_name.as_deref(),
            image.content_type.as_deref(),
            &image.bytes,
        );
        artwork.replace_image(image_ref);
        new_image = Some((previous_file, image.bytes));
    }

    artwork
        .validate()
        .map_err(|e| ApiError::validation(e.to_string()))?;

    if let Some((previous_file, bytes)) = new_image {
        state.images.put(&artwork.image.file_name, &bytes).await?;
        // The file name carries the extension, so it can change on replace
        if previous_file != artwork.image.file_name {
            if let Err(e) = state.images.remove(&previous_file).await {
                warn!("Failed to remove replaced image {}: {}", previous_file, e);
            }
        }
    }
    state.artworks.save(&artwork).await?;

    let like_count = state.likes.count_for(&artwork.id).await?;
    info!("Artwork updated: {}", artwork.id);

    Ok(Json(ArtworkResponse::from_artwork(&artwork, like_count)))
}

/// Delete an artwork together with its likes and stored image
pub async fn delete_artwork(
    _session: AdminSession,
    State(state): State<Arc<GalleryState>>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiError> {
    let id = parse_artwork_id(&id)?;
    let artwork = state
        .artworks
        .find_by_id(&id)
        .await?
        .ok_or_else(|| artwork_not_found(&id))?;

    // Likes go first so no orphaned rows survive a failure in between
    let removed_likes = state.likes.remove_for_artwork(&id).await?;
    state.artworks.delete(&id).await?;
    if let Err(e) = state.images.remove(&artwork.image.file_name).await {
        warn!(
            "Failed to remove image file {}: {}",
            artwork.image.file_name, e
        );
    }

    info!("Artwork deleted: {} ({} likes removed)", id, removed_likes);

    Ok(Json(OkResponse::ok()))
}

/// Replace the display order of the whole exhibition
pub async fn reorder_artworks(
    _session: AdminSession,
    State(state): State<Arc<GalleryState>>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<OkResponse>, ApiError> {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(e) => {
            warn!("JSON parsing error: {:?}", e);
            return Err(ApiError::validation(format!("Invalid JSON: {e}")));
        }
    };

    let mut ids = Vec::with_capacity(request.ids.len());
    for raw in &request.ids {
        let id = ArtworkId::parse(raw)
            .map_err(|_| ApiError::validation(format!("Invalid artwork id: {raw}")))?;
        ids.push(id);
    }

    state.artworks.reorder(&ids).await?;

    Ok(Json(OkResponse::ok()))
}

/// Serve the stored image bytes, honoring `If-None-Match`
pub async fn get_artwork_image(
    State(state): State<Arc<GalleryState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let id = parse_artwork_id(&id)?;
    let artwork = state
        .artworks
        .find_by_id(&id)
        .await?
        .ok_or_else(|| artwork_not_found(&id))?;

    let etag = artwork.image.etag();
    let revalidated = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|candidate| candidate == etag);
    if revalidated {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }

    let bytes = state.images.get(&artwork.image.file_name).await?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, artwork.image.content_type.clone()),
            (header::ETAG, etag),
        ],
        bytes,
    )
        .into_response())
}

/// Read the multipart fields of the upload form
async fn read_upload_form(multipart: &mut Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm {
        author: None,
        order: None,
        image: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Invalid multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "author" => {
                form.author = Some(read_text(field).await?);
            }
            "order" => {
                let text = read_text(field).await?;
                if text.trim().is_empty() {
                    continue;
                }
                let order = text
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| ApiError::validation(format!("Invalid order value: {text}")))?;
                form.order = Some(order);
            }
            "image" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::validation(format!("Invalid image field: {e}")))?
                    .to_vec();
                form.image = Some(UploadedImage {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            // Unknown fields are ignored
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    let name = field.name().unwrap_or("").to_string();
    field
        .text()
        .await
        .map_err(|e| ApiError::validation(format!("Invalid field '{name}': {e}")))
}

fn parse_artwork_id(raw: &str) -> Result<ArtworkId, ApiError> {
    // Malformed ids cannot match any artwork
    ArtworkId::parse(raw).map_err(|_| ApiError::not_found(format!("Artwork not found: {raw}")))
}

fn artwork_not_found(id: &ArtworkId) -> ApiError {
    ApiError::not_found(format!("Artwork not found: {id}"))
}
