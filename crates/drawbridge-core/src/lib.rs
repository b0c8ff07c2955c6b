//! Drawbridge Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `Project`, `DesignFile`, `Version`, `Editor`, `SyncEntry`,
//!   `ActivityPayload`, `SyncMarker`
//! - **Identity resolution** - Static handle-to-email mapping with normalized lookup
//! - **Port definitions** - Traits for adapters: `DesignProvider`, `EventSink`
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no network dependencies.
//! Ports define trait interfaces that adapter crates implement.
//! The sync crate orchestrates domain entities through port interfaces.

pub mod config;
pub mod domain;
pub mod identity;
pub mod ports;
