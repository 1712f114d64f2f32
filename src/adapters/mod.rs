//! Adapter implementations for the port traits.
//!
//! Three families: `live` talks to real services, `recording` wraps live
//! adapters and captures every interaction to cassettes, `replaying` serves
//! previously recorded interactions deterministically.

pub mod live;
pub mod recording;
pub mod replaying;
