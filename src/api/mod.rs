//! API Module
//!
//! HTTP handlers, routing and the cross-origin policy.
//!
//! # Endpoints
//! - `GET /api/character?url=` - Fetch an external URL through the proxy
//! - `POST /api/save` - Store a document under a key
//! - `GET /api/load?key=` - Retrieve a document
//! - `DELETE /api/delete?key=` - Delete a document
//! - `GET /health` - Liveness probe

pub mod cors;
pub mod handlers;
pub mod routes;

pub use cors::CorsPolicy;
pub use handlers::*;
pub use routes::create_router;
