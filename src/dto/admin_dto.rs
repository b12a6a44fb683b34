use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserStatusPayload {
    pub is_active: bool,
}
