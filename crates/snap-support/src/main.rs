mod category;
mod config;
mod contact;
mod error;
mod model;
mod parser;
mod reload;
mod render;
mod search;
mod server;
mod session;
mod validation;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use contact::{ContactDesk, SimulatedSubmitter};
use reload::ReloadService;
use server::SnapSupportServer;
use session::SupportSession;
use support_common::document::{DocumentClient, DocumentClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting snap-support MCP server");

    let config = Config::from_env()?;
    info!(
        source = %config.source.location(),
        layout = ?config.layout,
        submit_delay_ms = config.submit_delay.as_millis() as u64,
        "configuration loaded"
    );

    let client = DocumentClient::new(DocumentClientConfig::from_env())?;
    let reload_service = Arc::new(ReloadService::new(client, config.source.clone()));

    // A failed load still serves the page; it shows the warning until reload_faqs succeeds.
    let session = match reload_service.load().await {
        Ok(records) => {
            let session = SupportSession::loaded(records, config.layout);
            info!(
                faqs = session.records().len(),
                categories = session.groups().len(),
                "{}",
                session.loaded_announcement()
            );
            session
        }
        Err(e) => {
            warn!(
                source = %reload_service.source().location(),
                error = %e,
                "FAQ document unavailable, serving load warning"
            );
            SupportSession::failed(e.to_string(), config.layout)
        }
    };

    let contact_desk = Arc::new(ContactDesk::new(Arc::new(SimulatedSubmitter::new(
        config.submit_delay,
    ))));

    let server = SnapSupportServer::new(session, reload_service, contact_desk);

    if let Some(addr) = config.tcp_listen_addr.as_deref() {
        let listener = TcpListener::bind(addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}
