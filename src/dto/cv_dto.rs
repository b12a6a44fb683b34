use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::cv::{Cv, CvEntry, CvFields};
use crate::utils::entry_codec;
use crate::utils::validation::{clean_optional, required};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CvPayload {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(max = 255))]
    pub position: Option<String>,
    #[validate(length(max = 255))]
    pub full_name: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    pub objective: Option<String>,
    #[validate(length(max = 255))]
    pub skills: Option<String>,
    #[serde(default)]
    pub experience: Vec<CvEntry>,
    #[serde(default)]
    pub education: Vec<CvEntry>,
}

impl CvPayload {
    pub fn into_fields(self) -> Result<CvFields> {
        for (block, entries) in [("experience", &self.experience), ("education", &self.education)] {
            if let Some(field) = entry_codec::find_delimiter(entries) {
                return Err(Error::BadRequest(format!(
                    "{} entries may not contain '{}': {}",
                    block,
                    entry_codec::FIELD_DELIMITER,
                    field
                )));
            }
        }

        Ok(CvFields {
            title: required(&self.title, "title")?,
            position: clean_optional(self.position),
            full_name: clean_optional(self.full_name),
            email: clean_optional(self.email),
            phone: clean_optional(self.phone),
            objective: clean_optional(self.objective),
            skills: clean_optional(self.skills),
            experience: entry_codec::encode(&self.experience),
            education: entry_codec::encode(&self.education),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvResponse {
    pub id: i64,
    pub candidate_id: i64,
    pub title: String,
    pub position: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub objective: Option<String>,
    pub skills: Option<String>,
    pub experience: Vec<CvEntry>,
    pub education: Vec<CvEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Cv> for CvResponse {
    fn from(value: Cv) -> Self {
        Self {
            id: value.id,
            candidate_id: value.candidate_id,
            title: value.title,
            position: value.position,
            full_name: value.full_name,
            email: value.email,
            phone: value.phone,
            objective: value.objective,
            skills: value.skills,
            experience: entry_codec::decode(&value.experience),
            education: entry_codec::decode(&value.education),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
