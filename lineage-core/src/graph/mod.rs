//! `graph` is the domain that maintains relationships between identity
//! tokens.
//!
//! A relationship ("connection") is always recorded twice, once from each
//! endpoint's perspective, and the two records form a *pair* that activates
//! and lives together. The graph itself never owns tokens: resolving a token
//! to its controlling identity is delegated to an external ownership oracle,
//! and every authorization decision is delegated to an injected access
//! policy.
//!
//! The single sub-domain here is `connection`:
//!
//! - `connection::types` holds the identifiers, the error taxonomy and every
//!   trait contract an outer layer may implement
//! - `connection::Connection` is the edge entity
//! - `connection::TypeTable` maps a connection type to its reciprocal type
//! - `connection::ConnectionStore` is the append-only arena plus the
//!   pairing and consent state machine
//! - `connection::Usecase` is the public façade wiring storage, oracle and
//!   policy together behind the `RegistryAPI` trait
pub mod connection;
