use actix_web::{HttpResponse, web};

use crate::state::app_state::AppState;

pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    match state.store() {
        Ok(store) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "links": store.len(),
            "backend": store.backend_name(),
            "resolver": state.resolver.mode_name(),
        })),
        Err(_) => HttpResponse::InternalServerError()
            .json(serde_json::json!({ "success": false, "error": "Mapping store unavailable" })),
    }
}
