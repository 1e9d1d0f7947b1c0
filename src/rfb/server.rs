use super::*;
use crate::session::Session;
use crate::session::SystemClock;
use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct Server;

impl Server {
    /// Accepts connections forever, one task per client.
    /// Only a failure to bind is fatal.
    pub async fn run(config: Config) -> anyhow::Result<()> {
        let session = Arc::new(Session::with_rules(SystemClock, config.rules()));
        let listener = TcpListener::bind(&config.bind)
            .await
            .with_context(|| format!("bind {}", config.bind))?;
        log::info!("[rfb] listening on {}", config.bind);
        let frame = config.frame();
        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    log::warn!("[rfb] accept failed: {}", e);
                    continue;
                }
            };
            log::info!("[rfb] accepted connection from {}", peer);
            stream
                .set_nodelay(true)
                .inspect_err(|e| log::debug!("[rfb] nodelay {}: {}", peer, e))
                .ok();
            let session = session.clone();
            tokio::spawn(async move {
                match serve(stream, session, frame).await {
                    Ok(()) => log::info!("[rfb] {} closed", peer),
                    Err(e) => log::info!("[rfb] {} closed: {:#}", peer, e),
                }
            });
        }
    }
}
