//! Core types for Vitrine.
//!
//! This module provides the canonical shapes shared between the client
//! pipeline and the server persister.

pub mod cart;
pub mod event;
pub mod product;

pub use cart::{CartLine, ProductId};
pub use event::{EventRecord, EventType, Page};
pub use product::Product;
