//! Remote store boundary.
//!
//! # Modules
//!
//! - `backend`: [`RemoteStore`] trait
//! - `messages`: Ticketed request/reply protocol and the REST envelope
//! - `memory`: In-process store used by the replay binary and tests

pub mod backend;
pub mod memory;
pub mod messages;

pub use backend::RemoteStore;
pub use memory::MemoryStore;
pub use messages::{
    Column, ColumnFilter, RestEnvelope, RestMeta, SearchQuery, StoreReply, StoreRequest, Ticket,
};
