//! HTTP boundary for the Spear auth server
//!
//! Decodes inbound requests, calls the token lifecycle service and maps its
//! errors onto stable codes and HTTP statuses.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod telemetry;
