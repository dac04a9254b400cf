//! Remote store abstraction.
//!
//! The browser never calls the store itself: it emits store requests as
//! actions, and whoever runs the actions (see [`crate::runtime::Driver`]) hands
//! them to a [`RemoteStore`] and feeds the reply back as an event. Replies may
//! be delivered in any order.

use crate::store::messages::{StoreReply, StoreRequest};

/// A store that answers browser requests.
pub trait RemoteStore {
    /// Executes one request. Failures are reported as [`StoreReply::Error`].
    fn execute(&mut self, request: &StoreRequest) -> StoreReply;
}

impl<S: RemoteStore + ?Sized> RemoteStore for Box<S> {
    fn execute(&mut self, request: &StoreRequest) -> StoreReply {
        (**self).execute(request)
    }
}
