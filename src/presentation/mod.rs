// Presentation layer - HTTP surface
pub mod api_error;
pub mod app_state;
pub mod handlers;
pub mod router;
pub mod validation;
