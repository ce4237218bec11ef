use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAddRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}
