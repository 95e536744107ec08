use tracing::{debug, warn};

use crate::error::ResolveError;
use crate::provider::GeocodeProvider;
use crate::resolver::{LocationResolver, ResolveFuture};

/// Resolver that talks to a [`GeocodeProvider`] over reqwest.
#[derive(Debug, Clone)]
pub struct HttpResolver<P> {
    client: reqwest::Client,
    provider: P,
}

impl<P: GeocodeProvider> HttpResolver<P> {
    pub fn new(provider: P) -> Self {
        Self::with_client(reqwest::Client::new(), provider)
    }

    pub fn with_client(client: reqwest::Client, provider: P) -> Self {
        Self { client, provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: GeocodeProvider> LocationResolver for HttpResolver<P> {
    fn resolve<'a>(&'a self, address: &'a str) -> ResolveFuture<'a> {
        Box::pin(async move {
            let req = self.provider.request(address);
            debug!(
                "geocoding via {}: {} ({address})",
                self.provider.name(),
                req.url
            );

            let mut builder = self.client.get(&req.url).query(&req.query);
            for (name, value) in &req.headers {
                builder = builder.header(*name, value);
            }

            let resp = builder.send().await.map_err(|e| {
                warn!("geocode request failed: {e}");
                ResolveError::Transport(e.to_string())
            })?;

            let status = resp.status();
            if !status.is_success() {
                warn!("geocode provider returned HTTP {}", status.as_u16());
                return Err(ResolveError::Status {
                    status: format!("HTTP {}", status.as_u16()),
                    message: status.canonical_reason().map(str::to_string),
                });
            }

            let body = resp
                .text()
                .await
                .map_err(|e| ResolveError::Transport(e.to_string()))?;
            let candidates = self.provider.parse_response(&body)?;
            debug!("geocoding returned {} candidates", candidates.len());
            Ok(candidates)
        })
    }
}
