use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Page, Pagination, User, UserCreate, UserPatch};
use crate::user_actor::UserError;

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: u64) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner
            .get(id)
            .await
            .map_err(|e| UserError::from_framework(Some(id), e))?
            .ok_or(UserError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self, pagination: Pagination) -> Result<Page<User>, UserError> {
        debug!("Sending request");
        self.inner
            .list(pagination)
            .await
            .map_err(|e| UserError::from_framework(None, e))
    }

    #[instrument(skip(self, payload), fields(user_email = ?payload.email))]
    pub async fn create_user(&self, payload: UserCreate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner
            .create(payload)
            .await
            .map_err(|e| UserError::from_framework(None, e))
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: u64, patch: UserPatch) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner
            .update(id, patch)
            .await
            .map_err(|e| UserError::from_framework(Some(id), e))
    }

    /// Removes the user and hands back the record that was deleted.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: u64) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner
            .delete(id)
            .await
            .map_err(|e| UserError::from_framework(Some(id), e))
    }

    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn user_count(&self) -> Result<usize, UserError> {
        debug!("Sending request");
        self.inner
            .count()
            .await
            .map_err(|e| UserError::from_framework(None, e))
    }
}
