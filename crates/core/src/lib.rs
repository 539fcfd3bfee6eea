//! Domain layer of the foundation shade catalog.
//!
//! - [`skintone`] -- numeric scale to skintone category mapping.
//! - [`shade`] -- the shade record, request DTOs and their validation.
//! - [`payload`] -- field-by-field decoding of JSON request bodies.
//! - [`store`] -- the document store gateway trait and in-process stores.
//! - [`batch`] -- chunked, sequential bulk writes.
//! - [`catalog`] -- the catalog service façade used by the HTTP layer.

pub mod batch;
pub mod catalog;
pub mod error;
pub mod payload;
pub mod shade;
pub mod skintone;
pub mod store;
