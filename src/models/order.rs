//! Order data models and API request types.
//!
//! Orders are plain records: the marketplace attaches no pricing or
//! writer-assignment rules to them, so the only logic here is field
//! validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
pub enum OrderStatus {
    Draft,
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "order_language", rename_all = "snake_case")]
pub enum Language {
    EnglishUs,
    EnglishUk,
    SpanishEs,
    FrenchFr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "order_service", rename_all = "snake_case")]
pub enum Service {
    Writing,
    Rewriting,
    Editing,
    Proofreading,
    ProblemSolving,
    Calculations,
}

/// Represents an order record from the database.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Order {
    pub id: Uuid,
    pub product: i32,
    pub deadline: DateTime<Utc>,
    pub for_final_date: Option<DateTime<Utc>>,
    pub language: Language,
    pub level: i32,
    pub service: Service,
    pub quantity: i32,
    pub space: i32,
    pub words_count: i32,
    pub size_type: String,
    pub topic: String,
    pub description: String,

    /// Quoted price in cents, if one has been set.
    pub price_cents: Option<i64>,

    pub subject: String,
    pub number_of_sources: i32,
    pub style: i32,
    pub is_private: bool,
    pub promocode: Option<String>,

    /// Account of the client who placed the order.
    pub client_id: Uuid,

    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /api/v1/orders`.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub product: i32,
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub for_final_date: Option<DateTime<Utc>>,
    pub language: Language,
    pub level: i32,
    pub service: Service,
    pub quantity: i32,
    pub space: i32,
    pub words_count: i32,
    pub size_type: String,
    pub topic: String,
    pub description: String,
    #[serde(default)]
    pub price_cents: Option<i64>,
    pub subject: String,
    pub number_of_sources: i32,
    pub style: i32,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub promocode: Option<String>,
    pub client_id: Uuid,
    #[serde(default = "default_status")]
    pub status: OrderStatus,
}

fn default_status() -> OrderStatus {
    OrderStatus::Draft
}

impl CreateOrderRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        check_counts(
            Some(self.quantity),
            Some(self.words_count),
            Some(self.number_of_sources),
        )?;
        check_text("size_type", Some(&self.size_type))?;
        check_text("topic", Some(&self.topic))?;
        check_text("subject", Some(&self.subject))?;
        check_price(self.price_cents)?;
        Ok(())
    }
}

/// Partial update of an order.
///
/// Every changeable column is listed; the owning client and timestamps are
/// not.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateOrderRequest {
    pub product: Option<i32>,
    pub deadline: Option<DateTime<Utc>>,
    pub for_final_date: Option<DateTime<Utc>>,
    pub language: Option<Language>,
    pub level: Option<i32>,
    pub service: Option<Service>,
    pub quantity: Option<i32>,
    pub space: Option<i32>,
    pub words_count: Option<i32>,
    pub size_type: Option<String>,
    pub topic: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub subject: Option<String>,
    pub number_of_sources: Option<i32>,
    pub style: Option<i32>,
    pub is_private: Option<bool>,
    pub promocode: Option<String>,
    pub status: Option<OrderStatus>,
}

impl UpdateOrderRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        check_counts(self.quantity, self.words_count, self.number_of_sources)?;
        check_text("size_type", self.size_type.as_deref())?;
        check_text("topic", self.topic.as_deref())?;
        check_text("subject", self.subject.as_deref())?;
        check_price(self.price_cents)?;
        Ok(())
    }

    /// Write the present fields over `order`.
    pub fn apply_to(self, order: &mut Order) {
        if let Some(v) = self.product {
            order.product = v;
        }
        if let Some(v) = self.deadline {
            order.deadline = v;
        }
        if let Some(v) = self.for_final_date {
            order.for_final_date = Some(v);
        }
        if let Some(v) = self.language {
            order.language = v;
        }
        if let Some(v) = self.level {
            order.level = v;
        }
        if let Some(v) = self.service {
            order.service = v;
        }
        if let Some(v) = self.quantity {
            order.quantity = v;
        }
        if let Some(v) = self.space {
            order.space = v;
        }
        if let Some(v) = self.words_count {
            order.words_count = v;
        }
        if let Some(v) = self.size_type {
            order.size_type = v;
        }
        if let Some(v) = self.topic {
            order.topic = v;
        }
        if let Some(v) = self.description {
            order.description = v;
        }
        if let Some(v) = self.price_cents {
            order.price_cents = Some(v);
        }
        if let Some(v) = self.subject {
            order.subject = v;
        }
        if let Some(v) = self.number_of_sources {
            order.number_of_sources = v;
        }
        if let Some(v) = self.style {
            order.style = v;
        }
        if let Some(v) = self.is_private {
            order.is_private = v;
        }
        if let Some(v) = self.promocode {
            order.promocode = Some(v);
        }
        if let Some(v) = self.status {
            order.status = v;
        }
    }
}

/// Query string for order listings.
#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
}

fn check_counts(
    quantity: Option<i32>,
    words_count: Option<i32>,
    number_of_sources: Option<i32>,
) -> Result<(), AppError> {
    if quantity.is_some_and(|q| q <= 0) {
        return Err(AppError::InvalidRequest(
            "quantity must be positive".to_string(),
        ));
    }
    if words_count.is_some_and(|w| w < 0) {
        return Err(AppError::InvalidRequest(
            "words_count must not be negative".to_string(),
        ));
    }
    if number_of_sources.is_some_and(|n| n < 0) {
        return Err(AppError::InvalidRequest(
            "number_of_sources must not be negative".to_string(),
        ));
    }
    Ok(())
}

fn check_text(field: &str, value: Option<&str>) -> Result<(), AppError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(AppError::InvalidRequest(format!(
            "{field} must not be empty"
        ))),
        _ => Ok(()),
    }
}

fn check_price(price_cents: Option<i64>) -> Result<(), AppError> {
    if price_cents.is_some_and(|p| p < 0) {
        return Err(AppError::InvalidRequest(
            "price_cents must not be negative".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> Order {
        Order {
            id: Uuid::new_v4(),
            product: 1,
            deadline: Utc::now(),
            for_final_date: None,
            language: Language::EnglishUs,
            level: 2,
            service: Service::Writing,
            quantity: 3,
            space: 1,
            words_count: 825,
            size_type: "pages".to_string(),
            topic: "Industrial revolution".to_string(),
            description: "Essay".to_string(),
            price_cents: None,
            subject: "History".to_string(),
            number_of_sources: 4,
            style: 0,
            is_private: false,
            promocode: None,
            client_id: Uuid::new_v4(),
            status: OrderStatus::Draft,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn update_only_touches_present_fields() {
        let mut order = sample_order();
        let update = UpdateOrderRequest {
            topic: Some("Steam engines".to_string()),
            status: Some(OrderStatus::Open),
            ..Default::default()
        };

        update.validate().unwrap();
        update.apply_to(&mut order);

        assert_eq!(order.topic, "Steam engines");
        assert_eq!(order.status, OrderStatus::Open);
        assert_eq!(order.quantity, 3);
        assert_eq!(order.subject, "History");
    }

    #[test]
    fn update_rejects_unknown_fields() {
        let result: Result<UpdateOrderRequest, _> =
            serde_json::from_str(r#"{"client_id": "550e8400-e29b-41d4-a716-446655440000"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_rejects_blank_topic_and_zero_quantity() {
        let blank = UpdateOrderRequest {
            topic: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(blank.validate().is_err());

        let zero = UpdateOrderRequest {
            quantity: Some(0),
            ..Default::default()
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn enums_use_snake_case_names() {
        assert_eq!(
            serde_json::to_string(&Service::ProblemSolving).unwrap(),
            "\"problem_solving\""
        );
        let lang: Language = serde_json::from_str("\"english_uk\"").unwrap();
        assert_eq!(lang, Language::EnglishUk);
    }
}
