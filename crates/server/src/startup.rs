use std::{future::{Future, IntoFuture}, sync::Arc, time::Duration};

use anyhow::Context;
use configs::{AppConfig, AuthSettings};
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use service::auth::domain::RegistrationPolicy;
use service::auth::hasher::{Argon2PasswordHasher, HashCost};
use service::auth::repo::seaorm::SeaOrmUserRepository;
use service::auth::repository::UserRepository;
use service::auth::system::{Clock, SystemClock, UuidV4Generator};
use service::auth::token::JwtSigner;
use service::auth::AuthService;

use crate::routes::{self, auth::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire `AuthService` from configuration on top of `repo`.
pub fn build_auth_service(cfg: &AuthSettings, repo: Arc<dyn UserRepository>) -> anyhow::Result<AuthService> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let cost = HashCost {
        memory_kib: cfg.password.memory_kib,
        iterations: cfg.password.iterations,
        parallelism: cfg.password.parallelism,
    };
    let hasher = Argon2PasswordHasher::new(cost, Arc::clone(&clock))?;
    let signer = JwtSigner::new(&cfg.jwt_secret, cfg.jwt_ttl_secs)
        .with_issuer(cfg.jwt_issuer.clone())
        .with_audience(cfg.jwt_audience.clone());
    let policy = RegistrationPolicy {
        initial_status: cfg.registration.initial_status.parse()?,
        default_locale: cfg.registration.default_locale.clone(),
        default_timezone: cfg.registration.default_timezone.clone(),
    };
    let svc = AuthService::new(repo, Arc::new(hasher), Arc::new(signer), clock, Arc::new(UuidV4Generator))
        .with_policy(policy);
    Ok(svc)
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}

/// Serve until Ctrl+C / SIGTERM.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    serve(cfg, shutdown_signal()).await
}

/// Connect, migrate, build the router and serve until `shutdown` resolves.
/// In-flight requests get `server.shutdown_timeout_secs` to finish.
pub async fn serve(cfg: AppConfig, shutdown: impl Future<Output = ()> + Send + 'static) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .context("connect database")?;
    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None).await.context("run migrations")?;
        info!("migrations applied");
    }
    if cfg.auth.uses_dev_secret() {
        warn!("JWT_SECRET is not set; signing tokens with the development secret");
    }

    let repo = Arc::new(SeaOrmUserRepository::new(db.clone()));
    let state = ServerState { auth: Arc::new(build_auth_service(&cfg.auth, repo)?) };
    let app = routes::build_router(state, build_cors(), Duration::from_secs(cfg.server.request_timeout_secs));

    let listener = tokio::net::TcpListener::bind((cfg.server.host.as_str(), cfg.server.port))
        .await
        .with_context(|| format!("bind {}:{}", cfg.server.host, cfg.server.port))?;
    let addr = listener.local_addr()?;
    info!(%addr, "listening");

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown.await;
        let _ = stop_tx.send(());
    })
    .into_future();
    let grace = Duration::from_secs(cfg.server.shutdown_timeout_secs);
    let deadline = async move {
        match stop_rx.await {
            Ok(()) => tokio::time::sleep(grace).await,
            Err(_) => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        res = server => res?,
        _ = deadline => warn!(grace_secs = grace.as_secs(), "in-flight requests did not finish in time"),
    }

    info!("http server stopped, closing database pool");
    db.close().await?;
    Ok(())
}
