//! Request pipeline layers shared by all routes

pub mod error_handler;
pub mod request_id;
