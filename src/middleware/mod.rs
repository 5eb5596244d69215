//! 中间件

mod cors;
mod errors;

pub use cors::cors_layer;
pub use errors::json_error_handlers;
