use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employer {
    pub id: i64,
    pub user_id: i64,
    pub company_name: String,
    pub company_address: Option<String>,
    pub contact_person: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployerFields {
    pub company_name: String,
    pub company_address: Option<String>,
    pub contact_person: Option<String>,
}
