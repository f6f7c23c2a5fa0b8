//! # Resource Actor Framework
//!
//! Every collection of the realtime store (users, menu, promotions, coupons,
//! orders) is a [`ResourceActor`] owning a keyed map of one [`Entity`] type.
//! Callers talk to it through a cloneable [`ResourceClient`].
//!
//! Writes are applied one at a time in arrival order, so concurrent writers get
//! last-write-wins semantics. A write that fails leaves the stored record
//! untouched. After every successful write the actor publishes the complete
//! collection to its subscribers.

use std::collections::BTreeMap;
use std::fmt::{Debug, Display};

use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Params, and Actions)
// =============================================================================

/// Trait that any stored record must implement to be managed by [`ResourceActor`].
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    type Id: Ord + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    type Error: std::error::Error + Clone + Send + Sync + 'static;

    /// Construct the full record from its key and creation parameters.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;
    fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler ---

    /// Handle a domain-specific action.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Errors produced by the framework itself, wrapping the entity's own error type.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError<E> {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
    #[error("{0}")]
    Entity(E),
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    /// Store a new record under a generated key.
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id, T::Error>,
    },
    /// Store a record under a caller-chosen key, replacing any previous one.
    Put {
        id: T::Id,
        params: T::CreateParams,
        respond_to: Response<T, T::Error>,
    },
    /// Return the record under `id`, storing one built from `params` if there is none.
    /// The flag is `true` when the record was created by this request.
    GetOrPut {
        id: T::Id,
        params: T::CreateParams,
        respond_to: Response<(T, bool), T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
    /// Receive the full collection now and again after every change.
    Subscribe {
        respond_to: Response<watch::Receiver<Vec<T>>, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    name: &'static str,
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    snapshots: watch::Sender<Vec<T>>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        name: &'static str,
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (snapshots, _) = watch::channel(Vec::new());
        let actor = Self {
            name,
            receiver,
            store: BTreeMap::new(),
            snapshots,
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, ResourceClient::new(sender))
    }

    #[instrument(name = "resource_actor", skip(self), fields(resource = self.name))]
    pub async fn run(mut self) {
        info!("Resource actor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let id = (self.next_id_fn)();
                    let result = self.insert(id.clone(), params).map(|_| id);
                    Self::reply(respond_to, result);
                }
                ResourceRequest::Put { id, params, respond_to } => {
                    let result = self.insert(id, params);
                    Self::reply(respond_to, result);
                }
                ResourceRequest::GetOrPut { id, params, respond_to } => {
                    let result = match self.store.get(&id) {
                        Some(item) => Ok((item.clone(), false)),
                        None => self.insert(id, params).map(|item| (item, true)),
                    };
                    Self::reply(respond_to, result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(%id, found = item.is_some(), "Get");
                    Self::reply(respond_to, Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    Self::reply(respond_to, Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let result = self.update(id, patch);
                    Self::reply(respond_to, result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let result = self.delete(id);
                    Self::reply(respond_to, result);
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let result = self.act(id, action);
                    Self::reply(respond_to, result);
                }
                ResourceRequest::Subscribe { respond_to } => {
                    Self::reply(respond_to, Ok(self.snapshots.subscribe()));
                }
            }
        }

        info!("Resource actor stopped");
    }

    fn insert(&mut self, id: T::Id, params: T::CreateParams) -> Result<T, FrameworkError<T::Error>> {
        let mut item = T::from_create_params(id.clone(), params).map_err(FrameworkError::Entity)?;
        item.on_create().map_err(FrameworkError::Entity)?;
        debug!(%id, "Stored");
        self.store.insert(id, item.clone());
        self.publish();
        Ok(item)
    }

    fn update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        let mut candidate = self.existing(&id)?.clone();
        candidate.on_update(patch).map_err(FrameworkError::Entity)?;
        debug!(%id, "Updated");
        self.store.insert(id, candidate.clone());
        self.publish();
        Ok(candidate)
    }

    fn delete(&mut self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        self.existing(&id)?.on_delete().map_err(FrameworkError::Entity)?;
        self.store.remove(&id);
        debug!(%id, "Deleted");
        self.publish();
        Ok(())
    }

    fn act(&mut self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        // Actions run against a copy so a rejected action never leaves a half-applied record.
        let mut candidate = self.existing(&id)?.clone();
        let result = candidate.handle_action(action).map_err(FrameworkError::Entity)?;
        self.store.insert(id, candidate);
        self.publish();
        Ok(result)
    }

    fn existing(&self, id: &T::Id) -> Result<&T, FrameworkError<T::Error>> {
        self.store
            .get(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.store.values().cloned().collect());
    }

    fn reply<R>(respond_to: Response<R, T::Error>, result: Result<R, FrameworkError<T::Error>>) {
        if let Err(e) = &result {
            warn!(error = %e, "Request rejected");
        }
        if respond_to.send(result).is_err() {
            debug!("Requester went away before the reply");
        }
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
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R, T::Error>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, FrameworkError<T::Error>> {
        self.request(move |respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn put(&self, id: T::Id, params: T::CreateParams) -> Result<T, FrameworkError<T::Error>> {
        self.request(move |respond_to| ResourceRequest::Put { id, params, respond_to })
            .await
    }

    pub async fn get_or_put(
        &self,
        id: T::Id,
        params: T::CreateParams,
    ) -> Result<(T, bool), FrameworkError<T::Error>> {
        self.request(move |respond_to| ResourceRequest::GetOrPut { id, params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError<T::Error>> {
        self.request(move |respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        self.request(move |respond_to| ResourceRequest::Update { id, patch, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        self.request(move |respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        self.request(move |respond_to| ResourceRequest::Action { id, action, respond_to })
            .await
    }

    pub async fn subscribe(&self) -> Result<watch::Receiver<Vec<T>>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Subscribe { respond_to })
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use testresult::TestResult;

    #[derive(Clone, Debug, PartialEq)]
    struct Ticket {
        id: String,
        title: String,
        votes: u32,
    }

    #[derive(Debug)]
    struct TicketCreate {
        title: String,
    }

    #[derive(Debug)]
    struct TicketPatch {
        title: Option<String>,
    }

    #[derive(Debug)]
    enum TicketAction {
        Vote,
        /// Bumps the title then fails, to prove nothing is kept.
        RenameThenFail(String),
    }

    #[derive(Debug, Clone, Error, PartialEq)]
    #[error("{0}")]
    struct TicketError(String);

    impl Entity for Ticket {
        type Id = String;
        type CreateParams = TicketCreate;
        type Patch = TicketPatch;
        type Action = TicketAction;
        type ActionResult = u32;
        type Error = TicketError;

        fn from_create_params(id: String, params: TicketCreate) -> Result<Self, TicketError> {
            if params.title.is_empty() {
                return Err(TicketError("title required".into()));
            }
            Ok(Self { id, title: params.title, votes: 0 })
        }

        fn on_update(&mut self, patch: TicketPatch) -> Result<(), TicketError> {
            if let Some(title) = patch.title {
                self.title = title;
            }
            Ok(())
        }

        fn handle_action(&mut self, action: TicketAction) -> Result<u32, TicketError> {
            match action {
                TicketAction::Vote => {
                    self.votes += 1;
                    Ok(self.votes)
                }
                TicketAction::RenameThenFail(title) => {
                    self.title = title;
                    Err(TicketError("rejected".into()))
                }
            }
        }
    }

    fn start() -> ResourceClient<Ticket> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("ticket_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = ResourceActor::new("tickets", 10, next_id);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_resource_actor_with_actions() -> TestResult {
        let client = start();

        let id = client.create(TicketCreate { title: "Late pizza".into() }).await?;
        assert_eq!(id, "ticket_1");

        assert_eq!(client.perform_action(id.clone(), TicketAction::Vote).await?, 1);
        assert_eq!(client.perform_action(id.clone(), TicketAction::Vote).await?, 2);

        let ticket = client.get(id).await?.ok_or("ticket missing")?;
        assert_eq!(ticket.votes, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_action_leaves_record_untouched() -> TestResult {
        let client = start();
        let id = client.create(TicketCreate { title: "Cold soup".into() }).await?;

        let result = client
            .perform_action(id.clone(), TicketAction::RenameThenFail("changed".into()))
            .await;
        assert_eq!(result, Err(FrameworkError::Entity(TicketError("rejected".into()))));

        let ticket = client.get(id).await?.ok_or("ticket missing")?;
        assert_eq!(ticket.title, "Cold soup");
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_records_are_reported() {
        let client = start();
        let result = client
            .update("nope".into(), TicketPatch { title: Some("x".into()) })
            .await;
        assert_eq!(result, Err(FrameworkError::NotFound("nope".into())));
        assert_eq!(client.delete("nope".into()).await, Err(FrameworkError::NotFound("nope".into())));
    }

    #[tokio::test]
    async fn test_put_replaces_under_chosen_key() -> TestResult {
        let client = start();
        client.put("fixed".into(), TicketCreate { title: "first".into() }).await?;
        client.put("fixed".into(), TicketCreate { title: "second".into() }).await?;

        let all = client.list().await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "second");
        Ok(())
    }

    #[tokio::test]
    async fn test_get_or_put_keeps_the_first_record() -> TestResult {
        let client = start();
        let other = client.clone();

        let (first, first_new) = client.get_or_put("fixed".into(), TicketCreate { title: "first".into() }).await?;
        client.perform_action("fixed".into(), TicketAction::Vote).await?;
        let (second, second_new) = other.get_or_put("fixed".into(), TicketCreate { title: "second".into() }).await?;

        assert!(first_new);
        assert!(!second_new);
        assert_eq!(first.title, "first");
        assert_eq!(second.title, "first");
        assert_eq!(second.votes, 1);
        assert_eq!(client.list().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_or_put_still_validates_new_records() {
        let client = start();
        let result = client.get_or_put("blank".into(), TicketCreate { title: String::new() }).await;
        assert_eq!(result, Err(FrameworkError::Entity(TicketError("title required".into()))));
    }

    #[tokio::test]
    async fn test_subscribers_receive_full_snapshots() -> TestResult {
        let client = start();
        let mut snapshots = client.subscribe().await?;
        assert!(snapshots.borrow().is_empty());

        client.create(TicketCreate { title: "one".into() }).await?;
        snapshots.changed().await?;
        assert_eq!(snapshots.borrow_and_update().len(), 1);

        client.create(TicketCreate { title: "two".into() }).await?;
        snapshots.changed().await?;
        let titles: Vec<String> = snapshots.borrow().iter().map(|t| t.title.clone()).collect();
        assert_eq!(titles, vec!["one".to_string(), "two".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_closed_actor_is_reported() {
        let (actor, client) = ResourceActor::<Ticket>::new("tickets", 1, || "x".to_string());
        drop(actor);
        assert_eq!(client.list().await, Err(FrameworkError::ActorClosed));
    }
}
