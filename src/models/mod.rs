//! Request and Response models for the object cache API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{BatchOp, BatchRequest, CounterRequest, KeyQuery, WriteRequest, MAX_KEY_LENGTH};
pub use responses::{
    BatchResponse, CounterResponse, DeleteResponse, FlushResponse, GetResponse, HealthResponse,
    OpOutcome, StatsResponse, WriteResponse,
};
