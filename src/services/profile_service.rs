//! Writer and client profile persistence.
//!
//! A profile can only be attached to an account of the matching role, and
//! an account holds at most one of each kind.

use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        account::AccountRole,
        profile::{
            ClientProfile, CreateClientProfileRequest, CreateWriterProfileRequest,
            UpdateClientProfileRequest, UpdateWriterProfileRequest, WriterProfile,
        },
    },
};

async fn ensure_role(pool: &DbPool, account_id: Uuid, role: AccountRole) -> Result<(), AppError> {
    let actual: AccountRole = sqlx::query_scalar("SELECT role FROM accounts WHERE id = $1")
        .bind(account_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::AccountNotFound)?;

    if actual != role {
        return Err(AppError::InvalidRequest(format!(
            "account has role {actual:?}, expected {role:?}"
        )));
    }
    Ok(())
}

pub async fn create_writer_profile(
    pool: &DbPool,
    account_id: Uuid,
    request: CreateWriterProfileRequest,
) -> Result<WriterProfile, AppError> {
    request.validate()?;
    ensure_role(pool, account_id, AccountRole::Writer).await?;

    let result = sqlx::query_as::<_, WriterProfile>(
        r#"
        INSERT INTO writer_profiles (
            account_id, about_me, status, profile_picture, success_rate,
            completed_orders, skills, languages
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(account_id)
    .bind(request.about_me)
    .bind(request.status)
    .bind(request.profile_picture)
    .bind(request.success_rate)
    .bind(request.completed_orders)
    .bind(request.skills)
    .bind(request.languages)
    .fetch_one(pool)
    .await;

    match result {
        Ok(profile) => {
            tracing::info!(account_id = %account_id, "writer profile created");
            Ok(profile)
        }
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(
            AppError::InvalidRequest("writer profile already exists".to_string()),
        ),
        Err(e) => Err(e.into()),
    }
}

pub async fn get_writer_profile(pool: &DbPool, account_id: Uuid) -> Result<WriterProfile, AppError> {
    sqlx::query_as::<_, WriterProfile>("SELECT * FROM writer_profiles WHERE account_id = $1")
        .bind(account_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::ProfileNotFound)
}

pub async fn update_writer_profile(
    pool: &DbPool,
    account_id: Uuid,
    update: UpdateWriterProfileRequest,
) -> Result<WriterProfile, AppError> {
    update.validate()?;

    sqlx::query_as::<_, WriterProfile>(
        r#"
        UPDATE writer_profiles
        SET about_me = COALESCE($2, about_me),
            status = COALESCE($3, status),
            profile_picture = COALESCE($4, profile_picture),
            success_rate = COALESCE($5, success_rate),
            completed_orders = COALESCE($6, completed_orders),
            skills = COALESCE($7, skills),
            languages = COALESCE($8, languages),
            updated_at = NOW()
        WHERE account_id = $1
        RETURNING *
        "#,
    )
    .bind(account_id)
    .bind(update.about_me)
    .bind(update.status)
    .bind(update.profile_picture)
    .bind(update.success_rate)
    .bind(update.completed_orders)
    .bind(update.skills)
    .bind(update.languages)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::ProfileNotFound)
}

pub async fn delete_writer_profile(pool: &DbPool, account_id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM writer_profiles WHERE account_id = $1")
        .bind(account_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::ProfileNotFound);
    }

    tracing::info!(account_id = %account_id, "writer profile deleted");

    Ok(())
}

pub async fn create_client_profile(
    pool: &DbPool,
    account_id: Uuid,
    request: CreateClientProfileRequest,
) -> Result<ClientProfile, AppError> {
    request.validate()?;
    ensure_role(pool, account_id, AccountRole::Client).await?;

    let result = sqlx::query_as::<_, ClientProfile>(
        r#"
        INSERT INTO client_profiles (account_id, country, pay_rate_cents, accepted_orders)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(account_id)
    .bind(request.country)
    .bind(request.pay_rate_cents)
    .bind(request.accepted_orders)
    .fetch_one(pool)
    .await;

    match result {
        Ok(profile) => {
            tracing::info!(account_id = %account_id, "client profile created");
            Ok(profile)
        }
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(
            AppError::InvalidRequest("client profile already exists".to_string()),
        ),
        Err(e) => Err(e.into()),
    }
}

pub async fn get_client_profile(pool: &DbPool, account_id: Uuid) -> Result<ClientProfile, AppError> {
    sqlx::query_as::<_, ClientProfile>("SELECT * FROM client_profiles WHERE account_id = $1")
        .bind(account_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::ProfileNotFound)
}

pub async fn update_client_profile(
    pool: &DbPool,
    account_id: Uuid,
    update: UpdateClientProfileRequest,
) -> Result<ClientProfile, AppError> {
    update.validate()?;

    sqlx::query_as::<_, ClientProfile>(
        r#"
        UPDATE client_profiles
        SET country = COALESCE($2, country),
            pay_rate_cents = COALESCE($3, pay_rate_cents),
            accepted_orders = COALESCE($4, accepted_orders),
            updated_at = NOW()
        WHERE account_id = $1
        RETURNING *
        "#,
    )
    .bind(account_id)
    .bind(update.country)
    .bind(update.pay_rate_cents)
    .bind(update.accepted_orders)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::ProfileNotFound)
}

pub async fn delete_client_profile(pool: &DbPool, account_id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM client_profiles WHERE account_id = $1")
        .bind(account_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::ProfileNotFound);
    }

    tracing::info!(account_id = %account_id, "client profile deleted");

    Ok(())
}
