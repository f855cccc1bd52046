use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks and Actions)
// =============================================================================

/// Trait that any domain entity must implement to be managed by [`ResourceActor`].
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    type Error: Send + Sync + Debug + Display + Clone;

    /// Id requested by the caller. `None` lets the actor generate one.
    fn requested_id(_params: &Self::CreateParams) -> Option<Self::Id> {
        None
    }

    /// Construct the full entity from the id and creation parameters.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler ---

    /// Handle a domain-specific action. Runs inside the actor loop, so the
    /// read and the write it performs are never interleaved with another
    /// request for the same store.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Errors raised by the generic actor machinery. Entity-level failures are
/// carried untouched in [`FrameworkError::Entity`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError<E> {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("{0}")]
    Entity(E),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        respond_to: Response<Vec<T>, T::Error>,
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
    /// Applies every action in order and commits only if all of them succeed.
    Batch {
        actions: Vec<(T::Id, T::Action)>,
        respond_to: Response<Vec<T::ActionResult>, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs until every client has been dropped.
    pub async fn run(mut self) {
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.delete(id));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let result = match self.store.get_mut(&id) {
                        Some(item) => item.handle_action(action).map_err(FrameworkError::Entity),
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Batch { actions, respond_to } => {
                    let _ = respond_to.send(self.batch(actions));
                }
            }
        }
    }

    fn create(&mut self, params: T::CreateParams) -> Result<T, FrameworkError<T::Error>> {
        let id = match T::requested_id(&params) {
            Some(id) if self.store.contains_key(&id) => {
                return Err(FrameworkError::AlreadyExists(id.to_string()));
            }
            Some(id) => id,
            None => (self.next_id_fn)(),
        };
        let mut item = T::from_create_params(id.clone(), params).map_err(FrameworkError::Entity)?;
        item.on_create().map_err(FrameworkError::Entity)?;
        self.store.insert(id, item.clone());
        Ok(item)
    }

    fn delete(&mut self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        let item = self
            .store
            .get(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete().map_err(FrameworkError::Entity)?;
        self.store.remove(&id);
        Ok(())
    }

    fn batch(
        &mut self,
        actions: Vec<(T::Id, T::Action)>,
    ) -> Result<Vec<T::ActionResult>, FrameworkError<T::Error>> {
        // Actions run against working copies; the store is untouched until all succeed.
        let mut working: HashMap<T::Id, T> = HashMap::new();
        let mut results = Vec::with_capacity(actions.len());

        for (id, action) in actions {
            if !working.contains_key(&id) {
                let item = self
                    .store
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
                working.insert(id.clone(), item);
            }
            if let Some(item) = working.get_mut(&id) {
                results.push(item.handle_action(action).map_err(FrameworkError::Entity)?);
            }
        }

        self.store.extend(working);
        Ok(results)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Manual impl: deriving would require `T: Clone` bounds on the sender only.
impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
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

    pub async fn create(&self, params: T::CreateParams) -> Result<T, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    pub async fn perform_batch(
        &self,
        actions: Vec<(T::Id, T::Action)>,
    ) -> Result<Vec<T::ActionResult>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Batch {
            actions,
            respond_to,
        })
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

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        id: String,
        value: u32,
    }

    #[derive(Debug)]
    struct CounterCreate {
        id: Option<String>,
        value: u32,
    }

    #[derive(Debug)]
    enum CounterAction {
        Take(u32),
    }

    impl Entity for Counter {
        type Id = String;
        type CreateParams = CounterCreate;
        type Action = CounterAction;
        type ActionResult = u32;
        type Error = String;

        fn requested_id(params: &CounterCreate) -> Option<String> {
            params.id.clone()
        }

        fn from_create_params(id: String, params: CounterCreate) -> Result<Self, String> {
            Ok(Self {
                id,
                value: params.value,
            })
        }

        fn handle_action(&mut self, action: CounterAction) -> Result<u32, String> {
            match action {
                CounterAction::Take(amount) if amount <= self.value => {
                    self.value -= amount;
                    Ok(self.value)
                }
                CounterAction::Take(amount) => Err(format!("cannot take {} of {}", amount, self.value)),
            }
        }
    }

    fn start() -> ResourceClient<Counter> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("counter_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        let client = start();

        let created = client
            .create(CounterCreate { id: None, value: 5 })
            .await
            .unwrap();
        assert_eq!(created.id, "counter_1");

        let left = client
            .perform_action(created.id.clone(), CounterAction::Take(2))
            .await
            .unwrap();
        assert_eq!(left, 3);

        let err = client
            .perform_action(created.id.clone(), CounterAction::Take(4))
            .await
            .unwrap_err();
        assert_eq!(err, FrameworkError::Entity("cannot take 4 of 3".to_string()));

        let stored = client.get(created.id).await.unwrap().unwrap();
        assert_eq!(stored.value, 3);
    }

    #[tokio::test]
    async fn test_requested_id_conflict() {
        let client = start();
        client
            .create(CounterCreate { id: Some("x".into()), value: 1 })
            .await
            .unwrap();

        let err = client
            .create(CounterCreate { id: Some("x".into()), value: 2 })
            .await
            .unwrap_err();
        assert_eq!(err, FrameworkError::AlreadyExists("x".to_string()));
    }

    #[tokio::test]
    async fn test_batch_is_all_or_nothing() {
        let client = start();
        client.create(CounterCreate { id: Some("a".into()), value: 2 }).await.unwrap();
        client.create(CounterCreate { id: Some("b".into()), value: 1 }).await.unwrap();

        // Second action on "a" pushes past its value, so nothing commits.
        let err = client
            .perform_batch(vec![
                ("a".into(), CounterAction::Take(1)),
                ("b".into(), CounterAction::Take(1)),
                ("a".into(), CounterAction::Take(2)),
            ])
            .await
            .unwrap_err();
        assert!(matches!(err, FrameworkError::Entity(_)));
        assert_eq!(client.get("a".into()).await.unwrap().unwrap().value, 2);
        assert_eq!(client.get("b".into()).await.unwrap().unwrap().value, 1);

        let err = client
            .perform_batch(vec![("missing".into(), CounterAction::Take(1))])
            .await
            .unwrap_err();
        assert_eq!(err, FrameworkError::NotFound("missing".to_string()));

        let results = client
            .perform_batch(vec![
                ("a".into(), CounterAction::Take(1)),
                ("a".into(), CounterAction::Take(1)),
            ])
            .await
            .unwrap();
        assert_eq!(results, vec![1, 0]);
        assert_eq!(client.get("a".into()).await.unwrap().unwrap().value, 0);
    }

    #[tokio::test]
    async fn test_delete_and_list() {
        let client = start();
        client.create(CounterCreate { id: None, value: 1 }).await.unwrap();
        let second = client.create(CounterCreate { id: None, value: 2 }).await.unwrap();

        client.delete(second.id.clone()).await.unwrap();
        let remaining = client.list().await.unwrap();
        assert_eq!(remaining.len(), 1);

        let err = client.delete(second.id).await.unwrap_err();
        assert!(matches!(err, FrameworkError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_closed_actor_reports_error() {
        let (actor, client) = ResourceActor::<Counter>::new(1, || "id".to_string());
        drop(actor);
        let err = client.list().await.unwrap_err();
        assert_eq!(err, FrameworkError::ActorClosed);
    }
}
