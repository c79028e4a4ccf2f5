//! Gateway contract and typed repository functions for the domain layer.

pub mod rooms;
