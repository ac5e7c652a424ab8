use std::{io::ErrorKind, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use card::{
    contact::{ContactRecord, DirectoryContact},
    slug::slugify,
    vcard::VCard,
};
use qrcode::{render::svg, QrCode};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    database::{fetch_contact, insert_contact, next_contact_id},
    directory::find_by_slug,
    error::AppError,
    search::{upsert_contacts, SearchContact, CONTACT_INDEX},
    state::AppState,
    storage,
};

pub async fn contact_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ContactRecord>, AppError> {
    let mut connection = state.redis_connection.clone();

    fetch_contact(&mut connection, &slug)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

#[derive(Debug, Default)]
struct RegistrationForm {
    name: String,
    slug: String,
    role: String,
    phone: String,
    email: String,
    about: String,
    social: String,
    social_text: String,
    zalo: String,
    avatar: Option<(String, Bytes)>,
}

async fn read_registration(multipart: &mut Multipart) -> Result<RegistrationForm, AppError> {
    let mut form = RegistrationForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::MalformedPayload)?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "avatar" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|_| AppError::MalformedPayload)?;

            // an empty file input still submits a part
            if !bytes.is_empty() {
                form.avatar = Some((file_name, bytes));
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|_| AppError::MalformedPayload)?;

        match name.as_str() {
            "name" => form.name = value,
            "slug" => form.slug = value,
            "role" => form.role = value,
            "phone" => form.phone = value,
            "email" => form.email = value,
            "about" => form.about = value,
            "social" => form.social = value,
            "socialText" | "social_text" => form.social_text = value,
            "zalo" => form.zalo = value,
            _ => {}
        }
    }

    Ok(form)
}

pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = read_registration(&mut multipart).await?;

    let name = form.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::MalformedPayload);
    }

    // edited or not, the stored slug always satisfies [a-z0-9-]
    let slug = if form.slug.trim().is_empty() {
        slugify(&name)
    } else {
        slugify(&form.slug)
    };
    if slug.is_empty() {
        return Err(AppError::MalformedPayload);
    }

    let mut avatar = String::new();
    if let Some((file_name, bytes)) = &form.avatar {
        let object = storage::object_name(&slug, storage::extension(file_name));
        storage::save(&state.config.media_dir, &object, bytes).await?;
        avatar = storage::public_url(&state.config.public_url, &object);
    }

    let mut connection = state.redis_connection.clone();
    let id = next_contact_id(&mut connection).await?;

    let record = ContactRecord {
        id,
        slug,
        name,
        role: form.role,
        phone: form.phone,
        email: form.email,
        about: form.about,
        social: form.social,
        social_text: form.social_text,
        zalo: form.zalo,
        avatar,
    };

    if !insert_contact(&mut connection, &record).await? {
        return Err(AppError::SlugTaken);
    }

    info!("Registered contact {} (id {})", record.slug, record.id);

    if let Err(e) = upsert_contacts(
        state.meili_client.clone(),
        &[SearchContact::from(&record)],
    )
    .await
    {
        warn!("Failed to index contact {}: {e}", record.slug);
    }

    Ok((StatusCode::CREATED, Json(record)))
}

#[derive(Deserialize)]
pub struct ExportParams {
    #[serde(default)]
    share: bool,
}

pub async fn vcard_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(params): Query<ExportParams>,
) -> Result<Response, AppError> {
    let mut connection = state.redis_connection.clone();
    let record = fetch_contact(&mut connection, &slug)
        .await?
        .ok_or(AppError::NotFound)?;

    let payload = VCard::from(&record).render();
    let file_name = storage::object_name(&record.slug, "vcf");

    if params.share {
        storage::save(&state.config.media_dir, &file_name, payload.as_bytes()).await?;

        let url = storage::public_url(&state.config.public_url, &file_name);
        return Ok(Redirect::to(&url).into_response());
    }

    let headers = [
        (header::CONTENT_TYPE, "text/vcard".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ),
    ];

    Ok((headers, payload).into_response())
}

pub async fn directory_handler(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<DirectoryContact>> {
    Json(state.directory.clone())
}

pub async fn directory_contact_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<DirectoryContact>, AppError> {
    find_by_slug(&state.directory, &slug)
        .cloned()
        .map(Json)
        .ok_or(AppError::NotFound)
}

pub async fn qr_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let contact = find_by_slug(&state.directory, &slug).ok_or(AppError::NotFound)?;

    let payload = VCard::from(contact).render();
    let code = QrCode::new(payload.as_bytes())?;
    let image = code.render::<svg::Color>().min_dimensions(180, 180).build();

    Ok((
        [(header::CONTENT_TYPE, "image/svg+xml")],
        image,
    )
        .into_response())
}

fn default_search_limit() -> usize {
    20
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
    #[serde(default = "default_search_limit")]
    limit: usize,
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchContact>>, AppError> {
    let results = state
        .meili_client
        .index(CONTACT_INDEX)
        .search()
        .with_query(&params.q)
        .with_limit(params.limit.clamp(1, 50))
        .execute::<SearchContact>()
        .await?;

    Ok(Json(results.hits.into_iter().map(|hit| hit.result).collect()))
}

pub async fn media_handler(
    State(state): State<Arc<AppState>>,
    Path(object): Path<String>,
) -> Result<Response, AppError> {
    if !storage::is_valid_object(&object) {
        return Err(AppError::MalformedPayload);
    }

    let bytes = match storage::read(&state.config.media_dir, &object).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(AppError::NotFound),
        Err(e) => return Err(e.into()),
    };

    Ok((
        [(header::CONTENT_TYPE, storage::content_type(&object))],
        bytes,
    )
        .into_response())
}
