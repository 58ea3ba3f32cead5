//! Codice Fiscale client library.
//!
//! Computes and verifies Italian fiscal codes by calling a remote web service that
//! answers with single-string XML documents. Nothing about the code itself is
//! derived locally.
//!
//! # Modules
//!
//! - `api`: HTTP facade route table.
//! - `config`: Configuration management.
//! - `endpoint`: Creation and verification URL builder.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Identity, normalization and outcome types.
//! - `orchestrator`: `compute`, `verify` and `do_request`.
//! - `service_client`: GET fetcher for the remote service.
//! - `session`: Per-request pipeline state.
//! - `xml`: Single-string XML unwrapper.

pub mod api;

pub mod config;
pub mod endpoint;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod service_client;
pub mod session;
pub mod xml;
