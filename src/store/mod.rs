//! Chrome Web Store publishing API client
//!
//! - [`types`] -- wire types returned by the store.
//! - [`client`] -- [`StoreClient`], the three store operations.

pub mod client;
pub mod types;

pub use client::{StoreClient, DEFAULT_API_BASE_URL, DEFAULT_UPLOAD_BASE_URL};
pub use types::{ExtensionItem, ItemError, PublishResult, UploadState};
