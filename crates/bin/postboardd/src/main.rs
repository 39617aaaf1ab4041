//! # postboardd: postboard daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars) and initialise logging
//! - Initialize the `SQLite` connection pool, run migrations, optionally seed
//! - Create the broker, its topics and the persistence subscribers
//! - Construct application services, injecting repositories and the broker
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use postboard_adapter_http_axum::router;
use postboard_adapter_http_axum::state::AppState;
use postboard_adapter_storage_sqlite_sqlx::seed::seed;
use postboard_app::event_bus::Broker;
use postboard_app::services::post_service::PostService;
use postboard_app::services::user_service::UserService;
use postboard_app::subscribers::{register_persistence, register_topics};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Database
    let db = postboard_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let users = Arc::new(db.users());
    let posts = Arc::new(db.posts());

    if config.database.seed {
        seed(users.as_ref(), posts.as_ref()).await?;
    }

    // Broker and subscribers
    let broker = Arc::new(Broker::new());
    register_topics(&broker);
    register_persistence(&broker, Arc::clone(&users), Arc::clone(&posts))?;

    // Services
    let mode = config.delivery_mode();
    let user_service =
        UserService::new(Arc::clone(&users), Arc::clone(&broker)).with_delivery_mode(mode);
    let post_service = PostService::new(posts, users, broker).with_delivery_mode(mode);

    // HTTP
    let app = router::build(AppState::new(user_service, post_service));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, ?mode, "postboardd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("postboardd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
