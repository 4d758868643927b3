//! Domain engine for a peer-to-peer marketplace node.
//!
//! Peers publish signed listings, negotiate orders, fund multi-party escrow
//! and resolve disputes through a neutral moderator. This crate holds the
//! rules that govern all of that: listing validation, the order/escrow state
//! machine, the dispute case lifecycle and the notification feed.
//!
//! The HTTP gateway, the P2P transport, the wallet client and the durable
//! store are external collaborators. They call into the services here and
//! persist through the narrow traits in [`store`]; everything in this crate
//! is synchronous, request-triggered and short-lived.

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod telemetry;
pub mod validation;

pub use error::Error;
