//! Shared response types.

mod response;

pub use response::{AdviceResponse, Created, EntryCreated, MessageResponse, Registered};
