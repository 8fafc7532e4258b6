//! Phoenix Flow - Shopify Merchant Co-Pilot backend
//!
//! This crate wraps a generative text model behind tier-gated HTTP routes for
//! Shopify merchants: product description generation, media alt-text
//! optimization, bulk catalog analysis, and a usage/billing dashboard, with
//! an anti-churn reinstall lockout driven by uninstall webhooks.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
