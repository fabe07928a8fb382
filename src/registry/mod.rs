//! Registry tag-listing client

pub mod auth;
pub mod client;
pub mod tags;

pub use auth::{AuthChain, AuthLayer, Credentials};
pub use client::{ClientConfig, RegistryClient, Scheme, StatusPolicy};
pub use tags::TagRecord;
