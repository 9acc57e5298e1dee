pub mod api;
pub mod error;
pub mod filter;
pub mod proxy;
pub mod rewriting;
pub mod settings;
pub mod state;

use std::{future::Future, sync::Arc};

use axum::{extract::Request, handler::Handler, middleware, Router};
use error::Result;
use proxy::util::Origin;
use reqwest::redirect::Policy;
use scorched::{logf, LogData, LogImportance};
use state::{APIState, Config, FilterState, ProxyState};
use tower::ServiceExt;

/// Build the proxy: the config endpoint is answered locally, everything else goes to the
/// upstream through the badge filter.
pub fn app(config: &Config) -> Result<Router> {
    let upstream: Origin = config.upstream.parse()?;
    let settings = config.settings_source();

    let client = reqwest::Client::builder()
        .redirect(Policy::none())
        .no_proxy()
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .zstd(true)
        .build()?;

    let filterstate = FilterState {
        settings: settings.clone(),
        max_capture_bytes: config.max_capture_bytes,
    };

    let proxystate = ProxyState { upstream, client };

    let proxyrouter = proxy::service::proxy
        .layer(middleware::from_fn_with_state(
            Arc::new(filterstate),
            filter::badge_filter::badge_filter,
        ))
        .with_state(Arc::new(proxystate));

    let apirouter = api::service::service(Arc::new(APIState { settings }));

    Ok(Router::new().fallback(|req: Request| async move {
        if req.uri().path() == api::service::CONFIG_PATH {
            return apirouter.oneshot(req).await;
        }
        proxyrouter.oneshot(req).await
    }))
}

pub async fn serve<F>(config: Arc<Config>, graceful_shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = app(&config)?;

    logf!(
        Info,
        "Listening on {}, proxying to {}",
        config.host,
        config.upstream
    );

    if config.badge.is_none() {
        logf!(Warning, "No badge settings configured, pages are passed through untouched");
    }

    let listener = tokio::net::TcpListener::bind(config.host).await?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(graceful_shutdown)
        .await?;

    Ok(())
}
