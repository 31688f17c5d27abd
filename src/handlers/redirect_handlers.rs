use actix_web::{HttpRequest, HttpResponse, Responder, Result, http, web};
use log::{info, warn};

use crate::resolver::ResolutionState;
use crate::state::app_state::AppState;
use crate::utils::click_info::click_from_request;

/// Redirect to original URL
pub async fn redirect_to_url(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<impl Responder> {
    let code = path.into_inner();

    let state = app_state
        .resolver
        .resolve(&code, &app_state.store)
        .await?;

    match state {
        ResolutionState::Resolved(original_url) => {
            let click = click_from_request(&req, &app_state.location_header, &app_state.visitor_salt);
            // Codes resolved remotely have no local record; that click is dropped
            let state = app_state.clone();
            let click_code = code.clone();
            let recorded = web::block(move || -> crate::errors::Result<bool> {
                let mut store = state.store()?;
                store.record_click(&click_code, click)
            })
            .await??;
            if !recorded {
                info!("No local record for {}, click not logged", code);
            }

            Ok(HttpResponse::Found()
                .append_header((http::header::LOCATION, original_url))
                .finish())
        }
        ResolutionState::NotFound | ResolutionState::Pending => {
            warn!("Short code not found: {}", code);
            Ok(HttpResponse::NotFound().json(serde_json::json!({
                "error": "URL not found or expired"
            })))
        }
    }
}
