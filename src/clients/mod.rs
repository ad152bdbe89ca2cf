//! Typed handles for talking to the resource actors.

pub mod user_client;

pub use user_client::UserClient;
