//! Application layer of the relay: the content store.

pub mod store;

pub use store::ContentStore;
