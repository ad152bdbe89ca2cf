use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::clients::UserClient;
use crate::domain::User;
use crate::user_actor::next_user_id;

const USER_BUFFER_SIZE: usize = 32;

/// Owns the user store actor and hands out clients to it.
///
/// Responsible for starting the actor with its initial records and for
/// waiting on it during shutdown.
pub struct UserSystem {
    pub user_client: UserClient,
    handle: tokio::task::JoinHandle<()>,
}

impl UserSystem {
    /// Starts a store holding the seed records.
    pub fn new() -> Self {
        Self::with_users(User::seed())
    }

    pub fn with_users(users: Vec<User>) -> Self {
        info!(users = users.len(), "Starting user system");
        let (user_actor, user_resource_client) =
            ResourceActor::<User>::with_items(USER_BUFFER_SIZE, users, next_user_id);
        let user_client = UserClient::new(user_resource_client);
        let handle = tokio::spawn(user_actor.run());

        Self {
            user_client,
            handle,
        }
    }

    /// Drops this system's client and waits for the actor to drain.
    ///
    /// Clones of the client held elsewhere keep the actor alive, so they must
    /// be dropped first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down user system...");
        drop(self.user_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("User system shutdown complete.");
        Ok(())
    }
}

impl Default for UserSystem {
    fn default() -> Self {
        Self::new()
    }
}
