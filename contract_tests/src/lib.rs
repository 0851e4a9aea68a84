//! # Gateway Contract Tests
//!
//! This crate provides "golden" tests for the gateway contract to ensure
//! backends don't drift apart accidentally over time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: backend behavior is written as code
//! - **Testability first**: contract tests fail when a backend diverges
//! - **Mechanism not policy**: define what must be stable, not how to use it
//!
//! ## Structure
//!
//! [`gateway_contract`] holds one check function per behavioral clause,
//! each run against every shipped backend. The test-only modules pin wire
//! payload shapes and walk full browsing scenarios end to end.

pub mod gateway_contract;

#[cfg(test)]
mod payloads;

#[cfg(test)]
mod scenarios;
