use geocoding::{GeocodeProvider, LocationResolver, ResolveError, ResolveFuture};
use gloo_net::http::Request;

/// Browser resolver: the same providers as native, over `fetch`.
#[derive(Debug, Clone)]
pub struct FetchResolver<P> {
    provider: P,
}

impl<P: GeocodeProvider> FetchResolver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

// Browsers refuse to let scripts set these.
const FORBIDDEN_HEADERS: [&str; 2] = ["User-Agent", "Referer"];

/// Provider headers a page script is allowed to send.
fn script_headers<'a>(headers: &'a [(&'static str, String)]) -> Vec<(&'static str, &'a str)> {
    headers
        .iter()
        .filter(|(name, _)| !FORBIDDEN_HEADERS.iter().any(|h| h.eq_ignore_ascii_case(name)))
        .map(|(name, value)| (*name, value.as_str()))
        .collect()
}

impl<P: GeocodeProvider> LocationResolver for FetchResolver<P> {
    fn resolve<'a>(&'a self, address: &'a str) -> ResolveFuture<'a> {
        Box::pin(async move {
            let req = self.provider.request(address);
            let mut builder = Request::get(&req.url)
                .query(req.query.iter().map(|(k, v)| (*k, v.as_str())));
            for (name, value) in script_headers(&req.headers) {
                builder = builder.header(name, value);
            }

            let resp = builder
                .send()
                .await
                .map_err(|e| ResolveError::Transport(e.to_string()))?;
            if !resp.ok() {
                return Err(ResolveError::Status {
                    status: format!("HTTP {}", resp.status()),
                    message: Some(resp.status_text()).filter(|s| !s.is_empty()),
                });
            }
            let body = resp
                .text()
                .await
                .map_err(|e| ResolveError::Transport(e.to_string()))?;
            self.provider.parse_response(&body)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::script_headers;
    use geocoding::{GeocodeProvider, NominatimProvider};
    use pretty_assertions::assert_eq;

    #[test]
    fn user_agent_is_left_to_the_browser() {
        let req = NominatimProvider::default().request("Oslo");
        assert!(req.headers.iter().any(|(k, _)| *k == "User-Agent"));
        assert_eq!(script_headers(&req.headers), Vec::<(&str, &str)>::new());
    }

    #[test]
    fn forbidden_names_match_any_case() {
        let headers = vec![
            ("user-agent", "x".to_string()),
            ("REFERER", "https://example.com".to_string()),
            ("Accept-Language", "nb".to_string()),
        ];
        assert_eq!(script_headers(&headers), vec![("Accept-Language", "nb")]);
    }
}
