//! Site server
//!
//! Serves the rendered pages at `/`, `/about` and `/blog`, plus `/en`
//! prefixed variants, static assets under `/assets` and a health probe.
//! Every request opens its own resolver scope, so concurrent renders are
//! independent and a page type is fetched at most once per render.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::content::{ContentResolver, PageKind, PageView};
use crate::locale::{self, Locale};
use crate::{html, Folio};

/// Shared server state
struct AppState {
    config: crate::config::SiteConfig,
    resolver: ContentResolver,
}

/// Start the site server
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    let assets_dir = folio.base_dir.join(&folio.config.assets_dir);
    let state = Arc::new(AppState {
        config: folio.config.clone(),
        resolver: folio.resolver(),
    });

    let app = Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/blog", get(blog))
        .route("/:locale", get(home))
        .route("/:locale/about", get(about))
        .route("/:locale/blog", get(blog))
        .route("/healthz", get(healthz))
        .nest_service("/assets", ServeDir::new(assets_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Negotiate the request locale from the optional path prefix and headers.
fn request_locale(explicit: Option<&str>, headers: &HeaderMap) -> Locale {
    let cookie = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok());
    let accept = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());
    locale::negotiate(explicit, cookie, accept)
}

/// Locale for a page request. A path prefix that is not a supported locale
/// code (stray single-segment paths like `/favicon.ico` land here too) is
/// `None` and the route answers 404 instead of serving the home page.
fn page_locale(explicit: Option<&str>, headers: &HeaderMap) -> Option<Locale> {
    match explicit {
        Some(code) => Locale::from_code(code),
        None => Some(request_locale(None, headers)),
    }
}

async fn render(state: &AppState, page: PageKind, locale: Locale) -> Html<String> {
    let mut scope = state.resolver.scope(locale);
    let body = match scope.view(page).await {
        PageView::Home(view) => html::home_page(&state.config, locale, view),
        PageView::About(view) => html::about_page(&state.config, locale, view),
        PageView::Blog(view) => html::blog_page(&state.config, locale, view),
    };
    Html(body)
}

async fn page(
    state: &AppState,
    page: PageKind,
    locale_code: Option<Path<String>>,
    headers: &HeaderMap,
) -> Response {
    match page_locale(locale_code.as_ref().map(|Path(code)| code.as_str()), headers) {
        Some(locale) => render(state, page, locale).await.into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

async fn home(
    State(state): State<Arc<AppState>>,
    locale_code: Option<Path<String>>,
    headers: HeaderMap,
) -> Response {
    page(&state, PageKind::Home, locale_code, &headers).await
}

async fn about(
    State(state): State<Arc<AppState>>,
    locale_code: Option<Path<String>>,
    headers: HeaderMap,
) -> Response {
    page(&state, PageKind::About, locale_code, &headers).await
}

async fn blog(
    State(state): State<Arc<AppState>>,
    locale_code: Option<Path<String>>,
    headers: HeaderMap,
) -> Response {
    page(&state, PageKind::Blog, locale_code, &headers).await
}

async fn healthz() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_request_locale_prefers_path() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("es,en;q=0.5"),
        );
        assert_eq!(request_locale(Some("en"), &headers), Locale::En);
    }

    #[test]
    fn test_request_locale_reads_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("folio_locale=en; theme=dark"),
        );
        assert_eq!(request_locale(None, &headers), Locale::En);
    }

    #[test]
    fn test_page_locale_rejects_unknown_prefix() {
        let headers = HeaderMap::new();
        assert_eq!(page_locale(Some("fr"), &headers), None);
        assert_eq!(page_locale(Some("favicon.ico"), &headers), None);
        assert_eq!(page_locale(Some("en"), &headers), Some(Locale::En));
        assert_eq!(page_locale(None, &headers), Some(Locale::Es));
    }

    #[tokio::test]
    async fn test_unknown_path_prefix_is_not_found() {
        let folio = Folio::with_config(crate::config::SiteConfig::default(), ".".into());
        let state = AppState {
            config: folio.config.clone(),
            resolver: folio.resolver(),
        };

        let headers = HeaderMap::new();
        let response = page(
            &state,
            PageKind::Home,
            Some(Path("favicon.ico".to_string())),
            &headers,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = page(&state, PageKind::Home, Some(Path("en".to_string())), &headers).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_render_falls_back_without_cms() {
        let folio = Folio::with_config(crate::config::SiteConfig::default(), ".".into());
        let state = AppState {
            config: folio.config.clone(),
            resolver: folio.resolver(),
        };
        let Html(body) = render(&state, PageKind::Home, Locale::Es).await;
        assert!(body.contains("<h1>"));
        assert!(body.contains("</html>"));
    }
}
