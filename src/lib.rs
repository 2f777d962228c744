//! # shot-sequence-api
//!
//! REST service for storing and generating sports-training shot sequences.
//!
//! A shot sequence is an ordered list of court positions that alternates
//! between the two halves of a court. Sequences come from people, from a
//! generative text API, or from a local random generator; every path goes
//! through the same validator before a sequence is returned or stored.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── SequenceService (service/)
//!     │       ├── validate_sequence (domain/)
//!     │       ├── SequenceGenerator → TextGenerator (generation/)
//!     │       └── random_sequence (generation/)
//!     │
//!     └── SequenceStore (persistence/)
//!             ├── PostgreSQL
//!             ├── SQLite
//!             └── in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod generation;
pub mod persistence;
pub mod service;
