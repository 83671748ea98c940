//! Request validation shared by the resource handlers.

mod validation;
pub use validation::{parse_id, RequestValidator};
