//! Transport-free request pipeline: authorize, then touch the store

use bytes::Bytes;
use capstore_core::{Error, ObjectAction, ObjectRequest, Result, Verb};
use capstore_store::ObjectStore;
use capstore_token::Authorizer;
use std::sync::Arc;

/// Result of a successful object request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectOutcome {
    /// A read returned the stored payload
    Payload(Bytes),
    /// A mutation was applied
    Done,
}

/// Authorizes object requests and applies them to a store
pub struct ObjectService {
    authorizer: Authorizer,
    store: Arc<ObjectStore>,
    conceal_incomplete: bool,
}

impl ObjectService {
    pub fn new(authorizer: Authorizer, store: Arc<ObjectStore>) -> Self {
        Self {
            authorizer,
            store,
            conceal_incomplete: false,
        }
    }

    /// Report reserved objects as missing on read
    pub fn with_conceal_incomplete(mut self, conceal: bool) -> Self {
        self.conceal_incomplete = conceal;
        self
    }

    pub fn authorizer(&self) -> &Authorizer {
        &self.authorizer
    }

    pub fn store(&self) -> &Arc<ObjectStore> {
        &self.store
    }

    /// Handle one request.
    ///
    /// The store is only reached once authorization has succeeded; a
    /// rejected request leaves every entry untouched.
    pub fn handle(&self, request: ObjectRequest) -> Result<ObjectOutcome> {
        self.authorizer.authorize(&request)?;

        let name = request.target_name.as_str();
        match Verb::parse(&request.verb)?.action() {
            ObjectAction::Read => match self.store.get(name) {
                Ok(payload) => Ok(ObjectOutcome::Payload(payload)),
                Err(Error::Incomplete { .. }) if self.conceal_incomplete => {
                    Err(Error::not_found(name))
                }
                Err(e) => Err(e),
            },
            ObjectAction::Reserve => {
                self.store.reserve(name, request.body.unwrap_or_default());
                Ok(ObjectOutcome::Done)
            }
            ObjectAction::Complete => {
                self.store.complete(name)?;
                Ok(ObjectOutcome::Done)
            }
            ObjectAction::Remove => {
                self.store.remove(name);
                Ok(ObjectOutcome::Done)
            }
        }
    }
}
