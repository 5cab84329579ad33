//! API Module
//!
//! HTTP handlers and routing binding the object cache to a REST API.
//!
//! # Endpoints
//! - `POST /add`, `PUT /set`, `POST /replace` - Write a value
//! - `GET /get/:group/:key` - Retrieve a value
//! - `DELETE /del/:group/:key` - Delete a value
//! - `POST /incr`, `POST /decr` - Adjust a counter
//! - `POST /batch` - Several operations sharing one request-local cache
//! - `POST /flush` - Clear local and shared caches
//! - `GET /stats` - Shared store statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
