//! Payment-provider callback payload.
//!
//! # Example
//!
//! ```json
//! {
//!   "event": "charge.success",
//!   "data": {
//!     "reference": "txn_5f0c9a1b2c3d4e5f60718293",
//!     "status": "success"
//!   }
//! }
//! ```

use serde::Deserialize;

use crate::{error::AppError, models::transaction::TransactionStatus};

#[derive(Debug, Deserialize)]
pub struct CallbackPayload {
    pub event: String,
    pub data: CallbackData,
}

#[derive(Debug, Deserialize)]
pub struct CallbackData {
    pub reference: String,
    pub status: String,
}

impl CallbackPayload {
    /// Ledger status the provider's charge status resolves to.
    pub fn target_status(&self) -> Result<TransactionStatus, AppError> {
        match self.data.status.as_str() {
            "success" => Ok(TransactionStatus::Completed),
            "failed" | "abandoned" => Ok(TransactionStatus::Failed),
            other => Err(AppError::InvalidRequest(format!(
                "unsupported charge status '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(status: &str) -> CallbackPayload {
        CallbackPayload {
            event: "charge.success".to_string(),
            data: CallbackData {
                reference: "txn_1".to_string(),
                status: status.to_string(),
            },
        }
    }

    #[test]
    fn charge_statuses_map_to_terminal_states() {
        assert_eq!(
            payload("success").target_status().unwrap(),
            TransactionStatus::Completed
        );
        assert_eq!(
            payload("abandoned").target_status().unwrap(),
            TransactionStatus::Failed
        );
        assert!(payload("ongoing").target_status().is_err());
    }
}
