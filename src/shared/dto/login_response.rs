use serde::Serialize;

use crate::user_summary::UserSummary;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}
