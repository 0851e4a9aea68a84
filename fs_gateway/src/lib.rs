//! # Filesystem Gateway
//!
//! This crate defines the storage capability consumed by the document browser.
//!
//! ## Philosophy
//!
//! - **Paths are views, not authority**: every path is relative to a single
//!   sandbox root and can never escape it
//! - **The gateway is stateless**: all browsing state lives in the caller;
//!   backends own nothing but the stored bytes
//! - **Closed vocabulary**: entry kinds and error kinds are closed enums,
//!   ambiguity from the backend is normalized at this boundary
//! - **Testable**: an in-memory backend and a fault-injecting wrapper ship
//!   alongside the real one
//!
//! ## Design
//!
//! - [`SandboxPath`] is the validated relative-path model (empty = root)
//! - [`FileGateway`] is the async capability trait
//! - [`MemoryGateway`] stores a deterministic in-memory tree
//! - [`LocalGateway`] maps the contract onto a real directory tree
//! - [`FailingGateway`] injects failures for exercising error paths

pub mod error;
pub mod failing;
pub mod gateway;
pub mod local;
pub mod memory;
pub mod path;

pub use error::GatewayError;
pub use failing::{FailingGateway, FailurePolicy, GatewayOp};
pub use gateway::{EntryKind, FileGateway, Locator, RawEntry};
pub use local::LocalGateway;
pub use memory::MemoryGateway;
pub use path::{PathError, SandboxPath};
