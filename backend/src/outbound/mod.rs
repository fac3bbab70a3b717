//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL-backed entity stores using Diesel ORM
//!
//! Adapters are thin translators between domain records and
//! infrastructure-specific representations. They contain no business logic.

pub mod persistence;
