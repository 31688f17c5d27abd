use actix_web::{HttpResponse, Responder, Result, web};
use log::debug;
use validator::Validate;

use crate::errors::ShortenerError;
use crate::state::app_state::AppState;
use crate::structs::url_request::{
    ResolveResponse, UrlAnalyticsResponse, UrlListResponse, UrlRequest, UrlSearchParams,
};

/// Create a shortened URL
pub async fn create_short_url(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<UrlRequest>,
) -> Result<impl Responder> {
    if let Err(errors) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    // Saving touches the backend, so keep it off the worker thread
    let state = app_state.clone();
    let link = web::block(move || -> crate::errors::Result<_> {
        let mut store = state.store()?;
        store.issue(&req.url, req.validity_minutes, req.shortcode.as_deref())
    })
    .await??;

    Ok(HttpResponse::Created().json(link))
}

/// List every issued link with its click log
pub async fn get_all_urls(
    app_state: web::Data<AppState>,
    query: web::Query<UrlSearchParams>,
) -> Result<impl Responder> {
    let needle = query
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let store = app_state.store()?;
    let urls: Vec<UrlListResponse> = store
        .list()
        .iter()
        .filter(|link| match &needle {
            Some(n) => link.original_url.to_lowercase().contains(n.as_str()),
            None => true,
        })
        .map(UrlListResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(urls))
}

/// Get analytics for a specific URL
pub async fn get_url_analytics(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<impl Responder> {
    let code = path.into_inner();
    let store = app_state.store()?;
    let link = store.get(&code).ok_or(ShortenerError::NotFound)?;

    Ok(HttpResponse::Ok().json(UrlAnalyticsResponse::from(link)))
}

/// Resolution endpoint other instances query in remote mode
pub async fn resolve_code(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<impl Responder> {
    let code = path.into_inner();
    let original_url = app_state.store()?.resolve(&code)?;
    debug!("Served remote resolution for {}", code);

    Ok(HttpResponse::Ok().json(ResolveResponse { original_url }))
}
