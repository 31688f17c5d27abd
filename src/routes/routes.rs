use actix_web::web;

use crate::handlers::health_handlers::health_check;
use crate::handlers::redirect_handlers::redirect_to_url;
use crate::handlers::url_handlers::{
    create_short_url, get_all_urls, get_url_analytics, resolve_code,
};

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/shorten", web::post().to(create_short_url))
            .route("/urls", web::get().to(get_all_urls))
            .route("/url/{code}", web::get().to(resolve_code))
            .route("/analytics/{code}", web::get().to(get_url_analytics))
            .route("/health/check", web::get().to(health_check)),
    );
    // Redirect route sits at the root, after the API scope
    cfg.route("/{code}", web::get().to(redirect_to_url));
}
