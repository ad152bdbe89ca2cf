use std::fmt::{Debug, Display};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument};

use crate::domain::{Page, Pagination};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks and DTOs)
// =============================================================================

/// Errors produced by a `ResourceActor` or while talking to one.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid request: {0}")]
    Invalid(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    type Id: PartialEq + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and Payload
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, FrameworkError>;

    // --- Lifecycle Hooks ---

    /// Runs against the current store before an id is assigned.
    fn before_create(_store: &[Self], _payload: &Self::CreatePayload) -> Result<(), FrameworkError> {
        Ok(())
    }

    /// Runs against the current store before `on_update` touches `self`.
    fn before_update(&self, _store: &[Self], _patch: &Self::Patch) -> Result<(), FrameworkError> {
        Ok(())
    }

    fn on_update(&mut self, patch: Self::Patch) -> Result<(), FrameworkError>;
    fn on_delete(&self) -> Result<(), FrameworkError> {
        Ok(())
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        pagination: Pagination,
        respond_to: Response<Page<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<T>,
    },
    Count {
        respond_to: Response<usize>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns an insertion-ordered store and serves requests one at a time.
///
/// Every read and write goes through the message loop, so id assignment and
/// uniqueness checks are atomic with the mutation that follows them.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Vec<T>,
    next_id_fn: Box<dyn Fn(&[T]) -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    #[allow(dead_code)]
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn(&[T]) -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        Self::with_items(buffer_size, Vec::new(), next_id_fn)
    }

    /// Like [`ResourceActor::new`], but the store starts out holding `items`.
    pub fn with_items(
        buffer_size: usize,
        items: Vec<T>,
        next_id_fn: impl Fn(&[T]) -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: items,
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient { sender };
        (actor, client)
    }

    /// Runs until every client has been dropped.
    #[instrument(name = "resource_actor", skip(self))]
    pub async fn run(mut self) {
        info!(items = self.store.len(), "ResourceActor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let _ = respond_to.send(self.handle_create(payload));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_get(&id)));
                }
                ResourceRequest::List { pagination, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_list(pagination)));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.len()));
                }
            }
        }

        info!("ResourceActor stopped");
    }

    fn position(&self, id: &T::Id) -> Option<usize> {
        self.store.iter().position(|item| item.id() == id)
    }

    #[instrument(skip(self, payload))]
    fn handle_create(&mut self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        debug!("Processing create request");
        T::before_create(&self.store, &payload)?;

        let id = (self.next_id_fn)(&self.store);
        let item = T::from_create(id.clone(), payload)?;
        self.store.push(item.clone());

        info!(id = %id, "Item created");
        Ok(item)
    }

    #[instrument(skip(self, id), fields(id = %id))]
    fn handle_get(&self, id: &T::Id) -> Option<T> {
        debug!("Processing get request");
        self.store.iter().find(|item| item.id() == id).cloned()
    }

    #[instrument(skip(self))]
    fn handle_list(&self, pagination: Pagination) -> Page<T> {
        let window = pagination.window(self.store.len());
        debug!(start = window.start, end = window.end, "Processing list request");

        Page {
            total: self.store.len(),
            page: pagination.page,
            limit: pagination.limit,
            items: self.store[window].to_vec(),
        }
    }

    #[instrument(skip(self, id, patch), fields(id = %id))]
    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        debug!("Processing update request");
        let index = self
            .position(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;

        self.store[index].before_update(&self.store, &patch)?;

        let item = &mut self.store[index];
        item.on_update(patch)?;
        info!("Item updated");
        Ok(item.clone())
    }

    #[instrument(skip(self, id), fields(id = %id))]
    fn handle_delete(&mut self, id: T::Id) -> Result<T, FrameworkError> {
        debug!("Processing delete request");
        let index = self
            .position(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;

        self.store[index].on_delete()?;
        let removed = self.store.remove(index);
        info!(remaining = self.store.len(), "Item deleted");
        Ok(removed)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self, pagination: Pagination) -> Result<Page<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { pagination, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn count(&self) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Count { respond_to })
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
