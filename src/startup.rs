//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;

use crate::application::services::{
    GroupServiceImpl, InMemoryGroupService, InMemoryInviteService, InviteServiceImpl,
};
use crate::config::{InviteSettings, Settings};
use crate::domain::InviteUsePolicy;
use crate::infrastructure::database::InMemoryDatabase;
use crate::infrastructure::repositories::{
    InMemoryGroupRepository, InMemoryInviteRepository, InMemoryMemberRepository, InviteOptions,
};
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{cors, logging};
use crate::shared::id_allocator::IdAllocator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<InMemoryDatabase>,
    pub groups: Arc<InMemoryGroupService>,
    pub invites: Arc<InMemoryInviteService>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire storage, repositories and services from settings
    pub fn new(settings: &Settings) -> Self {
        let db = Arc::new(InMemoryDatabase::new());
        let ids = Arc::new(IdAllocator::new());

        let group_repo = Arc::new(InMemoryGroupRepository::new(db.clone(), ids.clone()));
        let member_repo = Arc::new(InMemoryMemberRepository::new(db.clone()));
        let invite_repo = Arc::new(InMemoryInviteRepository::new(
            db.clone(),
            invite_options(&settings.invites),
        ));

        Self {
            db,
            groups: Arc::new(GroupServiceImpl::new(group_repo.clone(), member_repo)),
            invites: Arc::new(InviteServiceImpl::new(invite_repo, group_repo)),
            settings: Arc::new(settings.clone()),
        }
    }
}

fn invite_options(settings: &InviteSettings) -> InviteOptions {
    InviteOptions {
        use_policy: if settings.single_use {
            InviteUsePolicy::SingleUse
        } else {
            InviteUsePolicy::Reusable
        },
        code_length: settings.code_length,
        max_code_attempts: settings.max_code_attempts,
    }
}

/// Build the router with middleware for the given state
pub fn build_router(state: AppState) -> Router {
    let cors_layer = cors::create_cors_layer(&state.settings.cors);
    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors_layer)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        handlers::health::init_server_start();

        let state = AppState::new(&settings);
        tracing::info!(
            single_use_invites = settings.invites.single_use,
            code_length = settings.invites.code_length,
            "In-memory storage initialized"
        );

        let router = build_router(state);

        // Bind to address
        let addr: SocketAddr = settings
            .server
            .socket_addr()
            .with_context(|| format!("Invalid server address {}", settings.server_addr()))?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
