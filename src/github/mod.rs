//! GitHub GraphQL integration layer.
//!
//! This module wraps the HTTP executor (`client`) and the query texts
//! (`queries`) and re-exports only what the fetchers need.
//!
//! Fetchers should depend on [`GraphqlClient`] rather than on `reqwest`
//! directly, so tests can point them at a mock endpoint through [`Config`].
//!
//! [`Config`]: crate::Config

mod client;
pub(crate) mod queries;

pub use client::GraphqlClient;
