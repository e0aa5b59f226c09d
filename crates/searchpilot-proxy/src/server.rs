use crate::handler::{self, ProxyState};
use crate::{ProxyConfig, Result};
use hyper::body::Incoming;
use hyper::Request;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto;
use hyper_util::service::TowerToHyperService;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

/// HTTP server exposing the SEO check endpoint
pub struct ProxyServer {
    config: ProxyConfig,
    state: ProxyState,
}

impl ProxyServer {
    /// Create a server that talks to the real PageSpeed API
    pub fn new(config: ProxyConfig) -> Self {
        let state = ProxyState::new(&config);
        Self { config, state }
    }

    /// Create a server with a prepared state
    pub fn with_state(config: ProxyConfig, state: ProxyState) -> Self {
        Self { config, state }
    }

    /// Bind the configured address and serve until Ctrl+C
    pub async fn start(self) -> Result<()> {
        let addr = self.config.addr();
        let listener = TcpListener::bind(addr).await?;

        let shutdown_signal = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Received Ctrl+C, shutting down...");
        };

        self.serve_with_shutdown(listener, shutdown_signal).await
    }

    /// Serve connections from `listener` until `shutdown` resolves
    pub async fn serve_with_shutdown<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let local_addr = listener.local_addr()?;

        if !self.state.has_api_key() {
            tracing::warn!("No PageSpeed API key configured; every SEO check will be rejected");
        }

        let state = self.state;
        let service = ServiceBuilder::new()
            .layer(CorsLayer::permissive())
            .service_fn(move |req: Request<Incoming>| {
                let state = state.clone();
                async move { Ok::<_, Infallible>(handler::handle(&state, req).await) }
            });
        let service = TowerToHyperService::new(service);

        tracing::info!("✓ Server listening on http://{}", local_addr);

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(conn) => conn,
                        Err(e) => {
                            tracing::warn!("Failed to accept connection: {}", e);
                            continue;
                        }
                    };

                    let service = service.clone();
                    tokio::spawn(async move {
                        serve_connection(stream, peer, service).await;
                    });
                }
                _ = &mut shutdown => {
                    break;
                }
            }
        }

        tracing::info!("Server stopped");

        Ok(())
    }
}

async fn serve_connection<S>(stream: tokio::net::TcpStream, peer: SocketAddr, service: S)
where
    S: hyper::service::Service<Request<Incoming>, Response = hyper::Response<handler::ProxyBody>>
        + Send
        + 'static,
    S::Future: Send + 'static,
    S::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    tracing::trace!("Accepted connection from {}", peer);

    let io = TokioIo::new(stream);
    let builder = auto::Builder::new(TokioExecutor::new());
    if let Err(e) = builder.serve_connection(io, service).await {
        tracing::debug!("Connection from {} ended with error: {}", peer, e);
    }
}
