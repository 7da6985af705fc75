use clap::Args;
use ffa_core::{bootstrap, ChangeRouter, DirectoryWatcher, StateStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::server::{self, AppState};

#[derive(Args)]
pub struct ServeCommand {
    /// Port to listen on (overrides config)
    #[arg(long, short)]
    pub port: Option<u16>,
}

impl ServeCommand {
    /// Loads the data directory, keeps it fresh from file changes and serves it
    /// over HTTP until Ctrl-C.
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let store = Arc::new(StateStore::new());
        let router = Arc::new(ChangeRouter::new(
            config.routes.value.clone(),
            store.clone(),
        ));
        let cancel = CancellationToken::new();

        tracing::info!("Data directory: {}", config.data_dir.value.display());

        // Subscribe before the initial walk so edits made during it are not missed
        let watcher = DirectoryWatcher::new(
            config.watch_dirs.value.clone(),
            &config.extension.value,
            router.clone(),
        )
        .spawn(cancel.clone())?;

        let data_dir = config.data_dir.value.clone();
        let report = tokio::task::spawn_blocking({
            let router = router.clone();
            move || bootstrap(&data_dir, &router)
        })
        .await??;
        tracing::info!("Loaded {} data file(s) at startup", report.applied);

        let app = server::router(AppState {
            state: store,
            planner: None,
        });

        let port = self.port.unwrap_or(config.port.value);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        tracing::info!("Server starting on {} (ffa-core {})", addr, ffa_core::version());

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(cancel.clone()))
            .await?;

        watcher.stop();
        watcher.join().await?;
        Ok(())
    }
}

/// Resolves on Ctrl-C and cancels the file watcher.
async fn shutdown_signal(cancel: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        cancel.cancelled().await;
        return;
    }

    tracing::info!("Shutting down");
    cancel.cancel();
}
