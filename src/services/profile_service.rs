use std::sync::Arc;

use crate::dto::profile_dto::{ProfileDetails, UpdateProfilePayload};
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateFields};
use crate::models::employer::{Employer, EmployerFields};
use crate::models::user::{Capability, Principal, User, UserRole};
use crate::store::PortalStore;
use crate::utils::validation::clean_optional;

#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn PortalStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn PortalStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, principal: &Principal) -> Result<(User, ProfileDetails)> {
        let user = self
            .store
            .find_user(principal.user_id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

        let profile = match principal.role {
            UserRole::Candidate => self
                .store
                .find_candidate_by_user(user.id)
                .await?
                .map(ProfileDetails::Candidate)
                .unwrap_or(ProfileDetails::None),
            UserRole::Employer => self
                .store
                .find_employer_by_user(user.id)
                .await?
                .map(ProfileDetails::Employer)
                .unwrap_or(ProfileDetails::None),
            UserRole::Admin => ProfileDetails::None,
        };
        Ok((user, profile))
    }

    /// Edits the caller's profile, creating it on first edit. Omitted fields
    /// keep their stored values.
    pub async fn update(
        &self,
        principal: &Principal,
        payload: UpdateProfilePayload,
    ) -> Result<ProfileDetails> {
        match principal.role {
            UserRole::Candidate => {
                principal.require(Capability::ManageCandidateProfile)?;
                let current = self.store.find_candidate_by_user(principal.user_id).await?;
                let fields = merge_candidate(current, payload);
                let candidate = self
                    .store
                    .upsert_candidate(principal.user_id, fields)
                    .await?;
                tracing::info!(candidate_id = candidate.id, "Candidate profile updated");
                Ok(ProfileDetails::Candidate(candidate))
            }
            UserRole::Employer => {
                principal.require(Capability::ManageEmployerProfile)?;
                let current = self.store.find_employer_by_user(principal.user_id).await?;
                let fields = merge_employer(current, payload);
                let employer = self
                    .store
                    .upsert_employer(principal.user_id, fields)
                    .await?;
                tracing::info!(employer_id = employer.id, "Employer profile updated");
                Ok(ProfileDetails::Employer(employer))
            }
            UserRole::Admin => Err(Error::Forbidden(
                "administrators do not have a profile".to_string(),
            )),
        }
    }
}

fn pick(update: Option<String>, current: Option<String>) -> Option<String> {
    match update {
        Some(value) => clean_optional(Some(value)),
        None => current,
    }
}

fn merge_candidate(current: Option<Candidate>, payload: UpdateProfilePayload) -> CandidateFields {
    let current = current
        .map(|c| CandidateFields {
            full_name: c.full_name,
            phone: c.phone,
            email: c.email,
            address: c.address,
        })
        .unwrap_or_default();
    CandidateFields {
        full_name: payload
            .full_name
            .map(|n| n.trim().to_string())
            .unwrap_or(current.full_name),
        phone: pick(payload.phone, current.phone),
        email: pick(payload.email, current.email),
        address: pick(payload.address, current.address),
    }
}

fn merge_employer(current: Option<Employer>, payload: UpdateProfilePayload) -> EmployerFields {
    let current = current
        .map(|e| EmployerFields {
            company_name: e.company_name,
            company_address: e.company_address,
            contact_person: e.contact_person,
        })
        .unwrap_or_default();
    EmployerFields {
        company_name: payload
            .company_name
            .map(|n| n.trim().to_string())
            .unwrap_or(current.company_name),
        company_address: pick(payload.company_address, current.company_address),
        contact_person: pick(payload.contact_person, current.contact_person),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_fields_keep_stored_values() {
        let current = Candidate {
            id: 1,
            user_id: 2,
            full_name: "Ann".to_string(),
            phone: Some("555".to_string()),
            email: None,
            address: Some("Old street".to_string()),
        };
        let payload = UpdateProfilePayload {
            email: Some("ann@example.com".to_string()),
            address: Some("  ".to_string()),
            ..Default::default()
        };
        let merged = merge_candidate(Some(current), payload);
        assert_eq!(merged.full_name, "Ann");
        assert_eq!(merged.phone.as_deref(), Some("555"));
        assert_eq!(merged.email.as_deref(), Some("ann@example.com"));
        assert_eq!(merged.address, None);
    }

    #[test]
    fn first_employer_edit_starts_from_empty_fields() {
        let payload = UpdateProfilePayload {
            company_name: Some(" Acme ".to_string()),
            ..Default::default()
        };
        let merged = merge_employer(None, payload);
        assert_eq!(merged.company_name, "Acme");
        assert_eq!(merged.contact_person, None);
    }
}
