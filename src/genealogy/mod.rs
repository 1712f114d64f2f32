//! Genealogy resolution core.
//!
//! Three layers, composed by [`resolve`]:
//! - [`collect`] — pure construction of a linear ancestor→descendant chain
//!   from unordered artifact observations.
//! - [`relate`] — iterative, chain-verified search extending a chain
//!   endpoint to a previously recorded network.
//! - [`resolve`] — orchestration: collect, extend both directions, persist.

pub mod collect;
pub mod relate;
pub mod resolve;

pub use collect::{collect, Genealogy};
pub use relate::find_relation;
pub use resolve::{assemble, persist_resolution, Resolution};
