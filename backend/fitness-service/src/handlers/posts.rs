/// Post handlers - HTTP endpoints under `/api/v1/posts`
use crate::error::{AppError, Result};
use crate::metrics::{record_media_failed, record_media_stored, record_post_with_media_created};
use crate::models::Post;
use crate::services::PostService;
use crate::storage::{MediaStorage, StoredMedia};
use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;

const PART_TITLE: &str = "title";
const PART_CONTENT: &str = "content";
const PART_AUTHOR: &str = "author";
const PART_FILES: &str = "files";

/// Create a post from a multipart form with optional media files
/// POST /api/v1/posts/save-with-media
///
/// Files are written as they arrive. The first write failure aborts the
/// request with 400 and a plain-text reason; files stored before it stay on disk.
pub async fn save_post_with_media(
    service: web::Data<PostService>,
    storage: web::Data<MediaStorage>,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    let mut title = None;
    let mut content = None;
    let mut author = None;
    let mut media: Vec<StoredMedia> = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            PART_TITLE => title = Some(read_text(&mut field).await?),
            PART_CONTENT => content = Some(read_text(&mut field).await?),
            PART_AUTHOR => author = Some(read_text(&mut field).await?),
            PART_FILES => media.push(store_file(&storage, &mut field).await?),
            other => {
                tracing::debug!(part = %other, "ignoring unexpected multipart part");
                while let Some(chunk) = field.next().await {
                    chunk?;
                }
            }
        }
    }

    let post = service
        .create_with_media(
            required(title, PART_TITLE)?,
            required(content, PART_CONTENT)?,
            required(author, PART_AUTHOR)?,
            media,
        )
        .await?;
    record_post_with_media_created();

    Ok(HttpResponse::Ok().json(post))
}

/// GET /api/v1/posts/getAll
pub async fn get_all_posts(service: web::Data<PostService>) -> Result<HttpResponse> {
    let posts = service.list_all().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Upsert under the path id; an unknown id creates the post
/// PUT /api/v1/posts/edit/{id}
pub async fn edit_post(
    service: web::Data<PostService>,
    post_id: web::Path<String>,
    req: web::Json<Post>,
) -> Result<HttpResponse> {
    let post = service.edit(&post_id, req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/v1/posts/delete/{id}
pub async fn delete_post(
    service: web::Data<PostService>,
    post_id: web::Path<String>,
) -> Result<HttpResponse> {
    service.delete(&post_id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// 200 with the post, or 200 with an empty body when it does not exist
/// GET /api/v1/posts/search/{id}
pub async fn get_post(
    service: web::Data<PostService>,
    post_id: web::Path<String>,
) -> Result<HttpResponse> {
    match service.get_by_id(&post_id).await? {
        Some(post) => Ok(HttpResponse::Ok().json(post)),
        None => Ok(HttpResponse::Ok().finish()),
    }
}

async fn read_text(field: &mut Field) -> Result<String> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        bytes.extend_from_slice(&chunk?);
    }

    String::from_utf8(bytes).map_err(|_| {
        AppError::BadRequest(format!(
            "Part '{}' is not valid UTF-8",
            field.name().unwrap_or_default()
        ))
    })
}

async fn store_file(storage: &MediaStorage, field: &mut Field) -> Result<StoredMedia> {
    let original_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .map(str::to_string);
    let content_type = field.content_type().map(|mime| mime.to_string());

    match storage
        .store(original_name.as_deref(), content_type.as_deref(), field)
        .await
    {
        Ok(stored) => {
            record_media_stored();
            Ok(stored)
        }
        Err(err) => {
            record_media_failed();
            tracing::warn!(
                file = ?original_name,
                error = %err,
                "media upload failed"
            );
            Err(AppError::UploadFailed(err.to_string()))
        }
    }
}

fn required(value: Option<String>, part: &str) -> Result<String> {
    value.ok_or_else(|| AppError::BadRequest(format!("Required part '{}' is not present", part)))
}
