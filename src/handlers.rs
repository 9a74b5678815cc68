use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path as AxumPath, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};

use crate::components::templates::{EDIT, VIEW};
use crate::errors::WikiError;
use crate::types::{AppState, Page};
use crate::utils::{form_field, title_url_segment};

const FRONT_PAGE: &str = "FrontPage";
const FORM_MIME: &str = "application/x-www-form-urlencoded";

/// Build the wiki router over already-initialized state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/view/:title", get(handle_view))
        .route("/edit/:title", get(handle_edit))
        .route("/save/:title", post(handle_save))
        .fallback(handle_fallback)
        .with_state(state)
}

/// The submitted `body` field. Requests that are not urlencoded forms, or
/// that lack the field, submit an empty body.
fn submitted_body(headers: &HeaderMap, form: &[u8]) -> Vec<u8> {
    let is_form = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_MIME));
    if !is_form {
        log::debug!("Save request without a urlencoded form, using an empty body");
        return Vec::new();
    }
    form_field(form, "body").unwrap_or_default()
}

/// 302 Found, the status every wiki redirect uses
fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// Gate every page operation on the title allowlist. A segment that cannot
/// even be decoded is rejected the same way.
fn validated_title(
    state: &AppState,
    raw: Result<AxumPath<String>, PathRejection>,
) -> Result<String, WikiError> {
    match raw {
        Ok(AxumPath(title)) if state.validator.is_valid(&title) => Ok(title),
        Ok(AxumPath(title)) => {
            log::warn!("Rejected invalid title: {:?}", title);
            Err(WikiError::InvalidTitle)
        }
        Err(rejection) => {
            log::warn!("Rejected undecodable title: {}", rejection);
            Err(WikiError::InvalidTitle)
        }
    }
}

/// Handle root path requests
pub async fn handle_root() -> Response {
    found(format!("/view/{FRONT_PAGE}"))
}

pub async fn handle_view(
    State(state): State<AppState>,
    raw: Result<AxumPath<String>, PathRejection>,
) -> Result<Response, WikiError> {
    let title = validated_title(&state, raw)?;
    log::info!("View request for '{}'", title);

    let page = match state.store.load(&title).await {
        Ok(page) => page,
        Err(WikiError::PageNotFound(_)) => {
            log::info!("Page '{}' does not exist yet, redirecting to edit", title);
            return Ok(found(format!("/edit/{}", title_url_segment(&title))));
        }
        Err(e) => return Err(e),
    };

    let mut out = state.rewriter.wrap(Vec::<u8>::new());
    state.templates.render(VIEW, &page, &mut out)?;
    Ok(Html(out.into_inner()).into_response())
}

pub async fn handle_edit(
    State(state): State<AppState>,
    raw: Result<AxumPath<String>, PathRejection>,
) -> Result<Response, WikiError> {
    let title = validated_title(&state, raw)?;
    log::info!("Edit request for '{}'", title);

    let loaded = state.store.load(&title).await;
    let page = match loaded {
        Ok(page) => page,
        Err(WikiError::PageNotFound(_)) => Page::empty(title),
        Err(e) => return Err(e),
    };

    let mut out: Vec<u8> = Vec::new();
    state.templates.render(EDIT, &page, &mut out)?;
    Ok(Html(out).into_response())
}

pub async fn handle_save(
    State(state): State<AppState>,
    raw: Result<AxumPath<String>, PathRejection>,
    headers: HeaderMap,
    form: Result<Bytes, BytesRejection>,
) -> Result<Response, WikiError> {
    let title = validated_title(&state, raw)?;
    let form = match form {
        Ok(form) => form,
        Err(rejection) => {
            log::warn!("Rejected save request body for '{}': {}", title, rejection);
            return Ok(rejection.into_response());
        }
    };
    let body = submitted_body(&headers, &form);
    log::info!("Save request for '{}', {} bytes", title, body.len());

    let page = Page::new(title, body);
    state.store.save(&page).await?;
    Ok(found(format!("/view/{}", title_url_segment(&page.title))))
}

/// Anything outside the page routes
pub async fn handle_fallback() -> WikiError {
    WikiError::NotFound
}
