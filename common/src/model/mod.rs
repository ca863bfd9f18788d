//! Domain models shared across crates

pub mod account;
