//! Mass partition and aggregation primitives for SCPN Repository Core.

pub mod aggregate;
pub mod sorption;
pub mod volumes;
