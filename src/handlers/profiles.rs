//! Writer and client profile handlers.
//!
//! - POST, GET, PATCH, DELETE /api/v1/accounts/{id}/writer-profile
//! - POST, GET, PATCH, DELETE /api/v1/accounts/{id}/client-profile
//!
//! Creating a profile requires an account with the matching role.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    extract::{ApiJson, ApiPath},
    models::profile::{
        ClientProfile, CreateClientProfileRequest, CreateWriterProfileRequest,
        UpdateClientProfileRequest, UpdateWriterProfileRequest, WriterProfile,
    },
    services::profile_service,
};

/// Attach a writer profile to a writer account.
///
/// # Request Body
///
/// ```json
/// {
///   "about_me": "History graduate",
///   "success_rate": 98.5,
///   "skills": ["history", "essays"],
///   "languages": ["english"]
/// }
/// ```
///
/// - **201 Created**: the profile
/// - **400**: account is not a writer, or already has a profile
/// - **404**: no such account
pub async fn create_writer_profile(
    State(pool): State<DbPool>,
    ApiPath(account_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CreateWriterProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let profile = profile_service::create_writer_profile(&pool, account_id, request).await?;

    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn get_writer_profile(
    State(pool): State<DbPool>,
    ApiPath(account_id): ApiPath<Uuid>,
) -> Result<Json<WriterProfile>, AppError> {
    Ok(Json(
        profile_service::get_writer_profile(&pool, account_id).await?,
    ))
}

pub async fn update_writer_profile(
    State(pool): State<DbPool>,
    ApiPath(account_id): ApiPath<Uuid>,
    ApiJson(update): ApiJson<UpdateWriterProfileRequest>,
) -> Result<Json<WriterProfile>, AppError> {
    Ok(Json(
        profile_service::update_writer_profile(&pool, account_id, update).await?,
    ))
}

/// Returns 204 No Content, or 404 if the account has no writer profile.
pub async fn delete_writer_profile(
    State(pool): State<DbPool>,
    ApiPath(account_id): ApiPath<Uuid>,
) -> Result<StatusCode, AppError> {
    profile_service::delete_writer_profile(&pool, account_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Attach a client profile to a client account.
///
/// ```json
/// { "country": "KE", "pay_rate_cents": 1200 }
/// ```
pub async fn create_client_profile(
    State(pool): State<DbPool>,
    ApiPath(account_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CreateClientProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let profile = profile_service::create_client_profile(&pool, account_id, request).await?;

    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn get_client_profile(
    State(pool): State<DbPool>,
    ApiPath(account_id): ApiPath<Uuid>,
) -> Result<Json<ClientProfile>, AppError> {
    Ok(Json(
        profile_service::get_client_profile(&pool, account_id).await?,
    ))
}

pub async fn update_client_profile(
    State(pool): State<DbPool>,
    ApiPath(account_id): ApiPath<Uuid>,
    ApiJson(update): ApiJson<UpdateClientProfileRequest>,
) -> Result<Json<ClientProfile>, AppError> {
    Ok(Json(
        profile_service::update_client_profile(&pool, account_id, update).await?,
    ))
}

pub async fn delete_client_profile(
    State(pool): State<DbPool>,
    ApiPath(account_id): ApiPath<Uuid>,
) -> Result<StatusCode, AppError> {
    profile_service::delete_client_profile(&pool, account_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
