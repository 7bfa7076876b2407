//! # Connection Module
//!
//! The `connection` module implements the typed relationship registry between
//! identity tokens. Two tokens are linked by a *pair* of mirrored records: a
//! record describing the relationship from the parent token's side, and a
//! companion record describing the same relationship from the child token's
//! side using the reciprocal connection type.
//!
//! ## Consent protocol
//!
//! A pair is created in one of two states:
//!
//! - **active** immediately, when both tokens resolve to the same controlling
//!   identity at creation time (self-consent shortcut)
//! - **pending** otherwise, awaiting approval from the counterparty token's
//!   owner
//!
//! Approval is addressed by `(token, type)` rather than by connection id: the
//! owner of the awaiting token approves the earliest pending record whose
//! child is their token and whose type matches. Activation always applies to
//! both legs of the pair at once; a half-active pair is never observable.
//!
//! ## Module Structure
//!
//! - [`types`] - identifiers, error taxonomy and trait contracts
//! - [`connection`] - the `Connection` edge entity
//! - [`table`] - connection-type reciprocal mapping
//! - [`store`] - the append-only arena and the pairing/consent algorithm
//! - [`usecase`] - the `RegistryAPI` façade composing store, oracle, policy
//!   and persistence
pub mod types;
pub mod usecase;

mod connection;
pub use connection::Connection;

mod table;
pub use table::{ConnectionType, TypeTable};

mod store;
pub use store::ConnectionStore;
