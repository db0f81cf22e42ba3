//! API layer - REST transport

pub mod rest;
