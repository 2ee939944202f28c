use shiori_core::application::{ports::time::Clock, services::ApplicationServices};
use shiori_core::config::AppConfig;
use shiori_core::domain::{
    article::{ArticleRepository, ArticleSearchIndex},
    category::CategoryRepository,
    team::TeamRepository,
    user::UserRepository,
};
use shiori_core::infrastructure::{
    database,
    reconciler::SearchIndexReconciler,
    repositories::{
        PostgresArticleRepository, PostgresCategoryRepository, PostgresTeamRepository,
        PostgresUserRepository,
    },
    search::{ElasticsearchArticleIndex, ElasticsearchSettings},
    time::SystemClock,
};
use shiori_core::presentation::http::{
    routes::{RouterOptions, build_router},
    state::HttpState,
};
use anyhow::{Context, Result};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    let pool = database::init_pool(config.database_url())
        .await
        .context("failed to connect to the database")?;
    database::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let search = ElasticsearchArticleIndex::new(ElasticsearchSettings {
        base_url: config.search_url().to_string(),
        index: config.search_index().to_string(),
        username: config.search_username().map(str::to_string),
        password: config.search_password().map(str::to_string),
        timeout: config.search_timeout(),
    })?;
    if let Err(err) = search.ensure_index().await {
        // Writes keep working; the reconciler backfills once search is reachable.
        tracing::warn!(error = %err, "search index is not ready");
    }

    let article_repo: Arc<dyn ArticleRepository> =
        Arc::new(PostgresArticleRepository::new(pool.clone()));
    let category_repo: Arc<dyn CategoryRepository> =
        Arc::new(PostgresCategoryRepository::new(pool.clone()));
    let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let team_repo: Arc<dyn TeamRepository> = Arc::new(PostgresTeamRepository::new(pool));
    let search_index: Arc<dyn ArticleSearchIndex> = Arc::new(search);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let services = Arc::new(ApplicationServices::new(
        article_repo,
        category_repo,
        user_repo,
        team_repo,
        search_index,
        Arc::clone(&clock),
    ));

    let reconciler = config.reconcile_interval().map(|interval| {
        SearchIndexReconciler::new(Arc::clone(&services.article_commands), clock, interval).spawn()
    });

    let state = HttpState::new(Arc::clone(&services));
    let options = RouterOptions {
        allowed_origins: config.allowed_origins().to_vec(),
        request_timeout: config.request_timeout(),
        rate_limit: config.rate_limit_enabled(),
    };
    let app = build_router(state, &options);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    if let Some(handle) = reconciler {
        handle.abort();
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
