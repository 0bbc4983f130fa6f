//! Mundo Tangible marketplace API
//!
//! HTTP service for browsing and purchasing fractional tokens of
//! real-world assets, reselling holdings on a peer-to-peer listing board,
//! and administering assets, operators and smart-contract records.

pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
