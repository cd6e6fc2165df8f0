use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use async_trait::async_trait;
use tracing::warn;

use crate::{
    dispatch::error::{DispatchError, handler_conflict, registration_invalid},
    forge::types::CommentEvent,
};

/// One chat-ops command reacting to inbound comment events. Handlers decide
/// eligibility themselves; an ineligible event is a silent `Ok`.
#[async_trait]
pub trait CommentHandlerPort: Send + Sync {
    fn name(&self) -> &'static str;

    async fn handle(&self, event: &CommentEvent) -> Result<(), DispatchError>;
}

/// Explicit replacement for host-framework global command registration:
/// handlers register under a unique name and every inbound event fans out to
/// all of them.
#[derive(Default)]
pub struct InMemoryHandlerRegistry {
    handlers: RwLock<BTreeMap<&'static str, Arc<dyn CommentHandlerPort>>>,
}

impl InMemoryHandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, handler: Arc<dyn CommentHandlerPort>) -> Result<(), DispatchError> {
        let name = handler.name();
        if name.trim().is_empty() {
            return Err(registration_invalid("handler name cannot be empty"));
        }

        let mut guard = self.handlers.write().expect("lock poisoned");
        if guard.contains_key(name) {
            return Err(handler_conflict(format!("handler already registered: {name}")));
        }
        guard.insert(name, handler);
        Ok(())
    }

    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers
            .read()
            .expect("lock poisoned")
            .keys()
            .copied()
            .collect()
    }

    /// Fans the event out to every registered handler in name order. One
    /// handler's failure is logged and does not starve the others.
    pub async fn dispatch(&self, event: &CommentEvent) {
        let handlers: Vec<(&'static str, Arc<dyn CommentHandlerPort>)> = {
            let guard = self.handlers.read().expect("lock poisoned");
            guard
                .iter()
                .map(|(name, handler)| (*name, Arc::clone(handler)))
                .collect()
        };

        for (name, handler) in handlers {
            if let Err(err) = handler.handle(event).await {
                warn!(
                    target: "dispatch",
                    handler = name,
                    repo = %event.repo,
                    number = event.number,
                    error = %err,
                    "comment_handler_failed"
                );
            }
        }
    }
}
