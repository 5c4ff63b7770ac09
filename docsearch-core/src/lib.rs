#![doc = "docsearch-core: core logic library for docsearch."]

//! This crate contains all pipeline logic for synchronising generated HTML
//! documentation pages into a hosted search index: page discovery, outline
//! extraction, search-record building and the publish contract.
//! Networked clients and CLI glue live in the `docsearch` binary crate.
//!
//! # Usage
//! Add this as a dependency for all shared extraction, record, config and
//! sync code.

pub mod config;
pub mod discover;
pub mod document;
pub mod error;
pub mod outline;
pub mod publisher;
pub mod record;
pub mod synchronise;
