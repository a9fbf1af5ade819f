//! Client for MyAnimeList's XML-over-HTTP API.
//!
//! The [`xml`] module owns the mapping between the service's XML dialect and
//! the records in [`types`]; [`MalClient`] drives one request per operation
//! through a [`Transport`].

pub mod client;
pub mod error;
pub mod transport;
pub mod types;
pub mod xml;

pub use client::{Credentials, MalClient};
pub use error::MalError;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport, TransportConfig};
pub use types::{
    AnimeSearchResult, EntryUpdate, ListEntry, ListStatus, ListSummary, RewatchValue,
    UpdateStatus, User,
};
