//! API layer: handlers, DTOs, middleware, and the HTTP cookie boundary.

pub mod cookies;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
