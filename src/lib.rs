//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may obtain a copy of the License at
//  http://www.apache.org/licenses/LICENSE-2.0
//
//! MarkLogic Management Rust SDK
//!
//! This is a Rust client for the MarkLogic server management REST API. It
//! lets applications script administrative setup and teardown: databases
//! and their forests, HTTP and XDBC application servers, security roles
//! and users, plus simple bulk document loading against the content
//! endpoint.
//!
//! This SDK supplies and uses Rust `async` methods throughout, using the
//! [tokio](https://crates.io/crates/tokio) runtime. There is currently no
//! blocking support.
//!
//! The general flow for an application is:
//! - Create a [`HandleBuilder`] with host, ports and HTTP Digest credentials
//! - Create a [`Handle`] from the [`HandleBuilder`] that is used throughout
//!   the application, across all threads
//! - Construct entity structs such as [`Database`], [`Forest`],
//!   [`HttpServer`], [`Role`] or [`User`] locally with their builders, then
//!   apply them to the server with `create()`, `save()` or `remove()`
//!
//! Entities are plain local values until an operation is called; nothing
//! is sent over the wire by a constructor or setter. Every operation is a
//! single HTTP round trip authenticated with HTTP Digest. Fetching a
//! resource that does not exist yields `Ok(None)` rather than an error,
//! and removing one that is already gone succeeds.
//!
//! ## Simple Example
//! The following code creates a [`Handle`] from values in the current
//! environment, then creates a database with two forests and an element
//! range index:
//! ```no_run
//! use marklogic_mgmt_rust_sdk::{Database, ElementRangeIndex, Handle};
//! use marklogic_mgmt_rust_sdk::types::ScalarType;
//! use std::error::Error;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn Error>> {
//!     let handle = Handle::builder()
//! #       .host("localhost")?
//! #       .digest_auth("admin", "admin")?
//!         .from_environment()?
//!         .build()?;
//!     Database::new("orders")
//!         .add_forest("orders-Forest-002")
//!         .add_index(ElementRangeIndex::new("order-id", ScalarType::Int))
//!         .create(&handle)
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Quickstart
//! [`SimpleDatabase`] wraps the common case of standing up a content
//! database, a modules database and an HTTP server for one application:
//! ```no_run
//! use marklogic_mgmt_rust_sdk::{Handle, SimpleDatabase};
//! use std::error::Error;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn Error>> {
//!     let handle = Handle::builder()
//!         .host("localhost")?
//!         .digest_auth("admin", "admin")?
//!         .build()?;
//!     let parts = SimpleDatabase::new("invoices", 8100)
//!         .forests(2)
//!         .create(&handle, "localhost.localdomain")
//!         .await?;
//!     println!("created {}", parts.server.name());
//!     Ok(())
//! }
//! ```
//!
//! ## Prerequisites
//! - Rust 1.78 or later
//! - A running MarkLogic server with its management API enabled (port 8002
//!   by default) and an admin user with the `manage-admin` role
//!
//! ## Configuration
//! Connection parameters can be set programmatically on the
//! [`HandleBuilder`], or gathered from the environment with
//! [`HandleBuilder::from_environment()`], which reads `MARKLOGIC_HOST`,
//! `MARKLOGIC_PORT`, `MARKLOGIC_MANAGEMENT_PORT`, `MARKLOGIC_USER`,
//! `MARKLOGIC_PASSWORD`, `MARKLOGIC_CA_CERT` and
//! `MARKLOGIC_ACCEPT_INVALID_CERTS`.
//!
//! ## Errors
//! All fallible calls return [`MgmtError`], which pairs a coarse
//! [`MgmtErrorCode`] with a message; service errors carry the server's
//! response body text. Values rejected locally (an out-of-range throttle,
//! an unknown enum token) never reach the network.

pub(crate) mod handle_builder;
pub use crate::handle_builder::HandleBuilder;

pub(crate) mod handle;
pub use crate::handle::Handle;

pub(crate) mod error;
pub use crate::error::{MgmtError, MgmtErrorCode};

pub(crate) mod database;
pub use crate::database::{Database, PathNamespace};

pub(crate) mod forest;
pub use crate::forest::Forest;

pub(crate) mod server;
pub use crate::server::{HttpServer, XdbcServer};

pub(crate) mod role;
pub use crate::role::{Privilege, Role};

pub(crate) mod user;
pub use crate::user::User;

pub(crate) mod host;
pub use crate::host::Host;

pub(crate) mod index;
pub use crate::index::{
    ElementAttributeRangeIndex, ElementRangeIndex, Field, FieldPath, FieldRangeIndex,
    FieldReference, RangeIndex,
};

pub(crate) mod files;
pub use crate::files::{walk_directory, FileEntry};

pub(crate) mod quickstart;
pub use crate::quickstart::{SimpleDatabase, SimpleDatabaseParts};

pub(crate) mod mlcp;
pub use crate::mlcp::MlcpLoader;

pub mod types;
