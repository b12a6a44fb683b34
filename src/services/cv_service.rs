use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::models::cv::{Cv, CvFields};
use crate::models::user::{Capability, Principal};
use crate::store::PortalStore;

#[derive(Clone)]
pub struct CvService {
    store: Arc<dyn PortalStore>,
}

impl CvService {
    pub fn new(store: Arc<dyn PortalStore>) -> Self {
        Self { store }
    }

    async fn candidate_for(&self, principal: &Principal) -> Result<Candidate> {
        principal.require(Capability::ManageCvs)?;
        self.store
            .find_candidate_by_user(principal.user_id)
            .await?
            .ok_or_else(|| Error::NotFound("Candidate profile not found".to_string()))
    }

    /// CVs owned by somebody else are reported as missing.
    async fn owned(&self, candidate: &Candidate, id: i64) -> Result<Cv> {
        match self.store.find_cv(id).await? {
            Some(cv) if cv.candidate_id == candidate.id => Ok(cv),
            _ => Err(Error::NotFound("CV not found".to_string())),
        }
    }

    pub async fn list(&self, principal: &Principal) -> Result<Vec<Cv>> {
        let candidate = self.candidate_for(principal).await?;
        self.store.list_cvs(candidate.id).await
    }

    pub async fn get(&self, principal: &Principal, id: i64) -> Result<Cv> {
        let candidate = self.candidate_for(principal).await?;
        self.owned(&candidate, id).await
    }

    pub async fn create(&self, principal: &Principal, fields: CvFields) -> Result<Cv> {
        let candidate = self.candidate_for(principal).await?;
        let cv = self.store.insert_cv(candidate.id, fields).await?;
        tracing::info!(cv_id = cv.id, candidate_id = candidate.id, "CV created");
        Ok(cv)
    }

    pub async fn update(&self, principal: &Principal, id: i64, fields: CvFields) -> Result<Cv> {
        let candidate = self.candidate_for(principal).await?;
        self.owned(&candidate, id).await?;
        let cv = self
            .store
            .update_cv(id, fields)
            .await?
            .ok_or_else(|| Error::NotFound("CV not found".to_string()))?;
        tracing::info!(cv_id = cv.id, "CV updated");
        Ok(cv)
    }

    pub async fn delete(&self, principal: &Principal, id: i64) -> Result<()> {
        let candidate = self.candidate_for(principal).await?;
        self.owned(&candidate, id).await?;
        if !self.store.delete_cv(id).await? {
            return Err(Error::NotFound("CV not found".to_string()));
        }
        tracing::info!(cv_id = id, "CV deleted");
        Ok(())
    }
}
