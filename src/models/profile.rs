//! Writer and client profiles.
//!
//! A profile holds the role-specific part of an account: what a writer
//! offers, or where a client is and what they pay. Each account has at most
//! one profile, of the kind matching its role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct WriterProfile {
    pub account_id: Uuid,
    pub about_me: Option<String>,
    /// Free-form availability note, e.g. "available".
    pub status: Option<String>,
    pub profile_picture: Option<String>,
    /// Percentage of orders delivered successfully, 0 to 100.
    pub success_rate: f64,
    pub completed_orders: i32,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct ClientProfile {
    pub account_id: Uuid,
    pub country: Option<String>,
    /// Usual rate the client pays per page, in cents.
    pub pay_rate_cents: i64,
    pub accepted_orders: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /api/v1/accounts/{id}/writer-profile`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateWriterProfileRequest {
    #[serde(default)]
    pub about_me: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub completed_orders: i32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

impl CreateWriterProfileRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        check_success_rate(Some(self.success_rate))?;
        check_non_negative("completed_orders", Some(self.completed_orders))?;
        check_tags("skills", Some(&self.skills))?;
        check_tags("languages", Some(&self.languages))?;
        Ok(())
    }
}

/// Partial update of a writer profile.
///
/// `skills` and `languages` replace the stored lists when present.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateWriterProfileRequest {
    pub about_me: Option<String>,
    pub status: Option<String>,
    pub profile_picture: Option<String>,
    pub success_rate: Option<f64>,
    pub completed_orders: Option<i32>,
    pub skills: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
}

impl UpdateWriterProfileRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.about_me.is_none()
            && self.status.is_none()
            && self.profile_picture.is_none()
            && self.success_rate.is_none()
            && self.completed_orders.is_none()
            && self.skills.is_none()
            && self.languages.is_none()
        {
            return Err(AppError::InvalidRequest(
                "update must change at least one field".to_string(),
            ));
        }
        check_success_rate(self.success_rate)?;
        check_non_negative("completed_orders", self.completed_orders)?;
        check_tags("skills", self.skills.as_deref())?;
        check_tags("languages", self.languages.as_deref())?;
        Ok(())
    }
}

/// Request body for `POST /api/v1/accounts/{id}/client-profile`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateClientProfileRequest {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub pay_rate_cents: i64,
    #[serde(default)]
    pub accepted_orders: i32,
}

impl CreateClientProfileRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        check_pay_rate(Some(self.pay_rate_cents))?;
        check_non_negative("accepted_orders", Some(self.accepted_orders))
    }
}

/// Partial update of a client profile.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateClientProfileRequest {
    pub country: Option<String>,
    pub pay_rate_cents: Option<i64>,
    pub accepted_orders: Option<i32>,
}

impl UpdateClientProfileRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.country.is_none() && self.pay_rate_cents.is_none() && self.accepted_orders.is_none()
        {
            return Err(AppError::InvalidRequest(
                "update must change at least one field".to_string(),
            ));
        }
        check_pay_rate(self.pay_rate_cents)?;
        check_non_negative("accepted_orders", self.accepted_orders)
    }
}

fn check_success_rate(rate: Option<f64>) -> Result<(), AppError> {
    if rate.is_some_and(|r| !(0.0..=100.0).contains(&r)) {
        return Err(AppError::InvalidRequest(
            "success_rate must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

fn check_non_negative(field: &str, value: Option<i32>) -> Result<(), AppError> {
    if value.is_some_and(|v| v < 0) {
        return Err(AppError::InvalidRequest(format!(
            "{field} must not be negative"
        )));
    }
    Ok(())
}

fn check_pay_rate(pay_rate_cents: Option<i64>) -> Result<(), AppError> {
    if pay_rate_cents.is_some_and(|p| p < 0) {
        return Err(AppError::InvalidRequest(
            "pay_rate_cents must not be negative".to_string(),
        ));
    }
    Ok(())
}

fn check_tags(field: &str, tags: Option<&[String]>) -> Result<(), AppError> {
    if tags.is_some_and(|tags| tags.iter().any(|t| t.trim().is_empty())) {
        return Err(AppError::InvalidRequest(format!(
            "{field} must not contain blank entries"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_profile_defaults_are_valid() {
        let request: CreateWriterProfileRequest = serde_json::from_str("{}").unwrap();

        assert_eq!(request.success_rate, 0.0);
        assert!(request.skills.is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn success_rate_must_be_a_percentage() {
        let update = UpdateWriterProfileRequest {
            success_rate: Some(101.0),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = UpdateWriterProfileRequest {
            success_rate: Some(97.5),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn blank_skill_is_rejected() {
        let request = CreateWriterProfileRequest {
            skills: vec!["history".to_string(), " ".to_string()],
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn empty_updates_are_rejected() {
        assert!(UpdateWriterProfileRequest::default().validate().is_err());
        assert!(UpdateClientProfileRequest::default().validate().is_err());
    }

    #[test]
    fn client_update_cannot_touch_balance() {
        let result: Result<UpdateClientProfileRequest, _> =
            serde_json::from_str(r#"{"balance_cents": 500}"#);
        assert!(result.is_err());
    }

    #[test]
    fn negative_pay_rate_is_rejected() {
        let request = CreateClientProfileRequest {
            pay_rate_cents: -1,
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }
}
