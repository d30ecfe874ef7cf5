//! Bulk operations against a local lbrynet daemon: download, delete, peer
//! discovery, subscription snapshots and support updates over many
//! channels and claims at once.

pub mod actions;
pub mod bulk;
pub mod comments;
pub mod config;
pub mod format;
pub mod gateway;
pub mod listing;
pub mod model;
pub mod parse;
pub mod peers;
pub mod pool;
pub mod resolver;
pub mod subscriptions;
pub mod support_plan;
pub mod transcript;
