//! Omni Concierge - conversational intake backend for Omni Suite AI
//!
//! Routes user messages through a staged intake flow (service selection →
//! open conversation → appointment booking) and delegates reply generation
//! to an external language-model provider.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
