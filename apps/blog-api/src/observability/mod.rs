//! Observability module - request correlation.

mod request_id;

pub use request_id::{REQUEST_ID_HEADER, RequestIdMiddleware};
