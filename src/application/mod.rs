//! Application layer: operation handlers wired over the ports.

pub mod handlers;
