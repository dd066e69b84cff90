//! Shared vocabulary of the LAN discovery pipeline.
//!
//! Holds the data model, the error taxonomy and the trait seams that the
//! scanning implementations in `lansight-core` plug into. This crate does
//! no I/O of its own.

pub mod error;
pub mod model;
pub mod network;
pub mod scanning;
