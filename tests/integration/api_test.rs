//! API endpoint integration tests
//!
//! Drives the composed application router over an in-memory document store,
//! and checks the document store backends against one contract.

#![allow(dead_code)]

mod common;
mod invariants;
mod rosters;
mod store;
mod teams;
mod users;
