use actix_web::{HttpRequest, http};

use crate::models::click_event::ClickEvent;
use crate::utils::hash_ip::hash_ip;

fn header_value(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Build the click event for a redirect request
pub fn click_from_request(req: &HttpRequest, location_header: &str, salt: &str) -> ClickEvent {
    let source =
        header_value(req, http::header::REFERER.as_str()).unwrap_or_else(|| "direct".to_string());
    let location = header_value(req, location_header).unwrap_or_else(|| "unknown".to_string());

    let visitor = req
        .connection_info()
        .realip_remote_addr()
        .map(|ip| hash_ip(ip, salt));

    ClickEvent::new(source, location, visitor)
}
