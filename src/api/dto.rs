//! Request and response bodies for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::entities::coffee_log;

/// Body of `POST /boxes`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBoxRequest {
    /// Display name of the box
    pub name: String,
    /// Number of cups in the box, must be positive
    pub total_cups: i32,
    /// Price paid for the whole box
    pub price: f64,
    /// Internal id of the user adding the box
    pub created_by: i64,
}

/// Body of `POST /coffee-logs`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogCoffeeRequest {
    /// Internal user id
    pub user_id: i64,
    /// Box the cup is taken from
    pub box_id: i64,
}

/// Body of `POST /payments`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentRequest {
    /// Internal user id of the payer
    pub user_id: i64,
    /// Box the payment is for
    pub box_id: i64,
    /// Amount owed
    pub amount: f64,
}

/// Query of `GET /coffee-logs`.
#[derive(Debug, Clone, Deserialize)]
pub struct CoffeeLogQuery {
    /// Whose logs to list
    pub user_id: i64,
    /// Maximum number of logs, newest first
    pub limit: Option<u64>,
}

/// Query of `GET /payments`. Exactly one field must be set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentQuery {
    /// List payments of this user
    pub user_id: Option<i64>,
    /// List payments for this box
    pub box_id: Option<i64>,
}

/// Query of `GET /debts`.
#[derive(Debug, Clone, Deserialize)]
pub struct DebtQuery {
    /// Whose debt to compute
    pub user_id: i64,
    /// Restrict to one box; all boxes when absent
    pub box_id: Option<i64>,
}

/// Debt of one user for one box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtResponse {
    /// Internal user id
    pub user_id: i64,
    /// Box id
    pub box_id: i64,
    /// `cups * cost_per_cup`
    pub amount: f64,
}

/// A coffee log together with the name of its box.
#[derive(Debug, Clone, Serialize)]
pub struct CoffeeLogEntry {
    /// The log row
    #[serde(flatten)]
    pub log: coffee_log::Model,
    /// Name of the box, if it still exists
    pub box_name: Option<String>,
}
