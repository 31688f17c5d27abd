pub mod health_handlers;
pub mod redirect_handlers;
pub mod url_handlers;
