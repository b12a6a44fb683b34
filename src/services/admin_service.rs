use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::user::{Capability, Principal, User};
use crate::store::PortalStore;

#[derive(Clone)]
pub struct AdminService {
    store: Arc<dyn PortalStore>,
}

impl AdminService {
    pub fn new(store: Arc<dyn PortalStore>) -> Self {
        Self { store }
    }

    pub async fn list_users(&self, principal: &Principal) -> Result<Vec<User>> {
        principal.require(Capability::Administer)?;
        self.store.list_users().await
    }

    pub async fn set_user_active(
        &self,
        principal: &Principal,
        id: i64,
        active: bool,
    ) -> Result<User> {
        principal.require(Capability::Administer)?;
        if id == principal.user_id && !active {
            return Err(Error::BadRequest(
                "administrators cannot deactivate themselves".to_string(),
            ));
        }
        let user = self
            .store
            .set_user_active(id, active)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
        tracing::info!(user_id = id, is_active = active, "User status changed");
        Ok(user)
    }

    pub async fn delete_user(&self, principal: &Principal, id: i64) -> Result<()> {
        principal.require(Capability::Administer)?;
        if id == principal.user_id {
            return Err(Error::BadRequest(
                "administrators cannot delete themselves".to_string(),
            ));
        }
        if !self.store.delete_user(id).await? {
            return Err(Error::NotFound("User not found".to_string()));
        }
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}
