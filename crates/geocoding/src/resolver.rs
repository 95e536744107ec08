use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use crate::candidate::Candidate;
use crate::error::ResolveError;

/// Boxed lookup future. Not `Send`: in the browser the transport lives on the
/// UI thread.
pub type ResolveFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<Candidate>, ResolveError>> + 'a>>;

/// Turns a free-text address into candidate coordinates.
///
/// Each call completes exactly once, with either candidates or an error.
/// Implementations may return `Ok(vec![])`; callers treat that the same as
/// [`ResolveError::ZeroResults`].
pub trait LocationResolver {
    fn resolve<'a>(&'a self, address: &'a str) -> ResolveFuture<'a>;
}

impl<T: LocationResolver + ?Sized> LocationResolver for Box<T> {
    fn resolve<'a>(&'a self, address: &'a str) -> ResolveFuture<'a> {
        (**self).resolve(address)
    }
}

impl<T: LocationResolver + ?Sized> LocationResolver for &T {
    fn resolve<'a>(&'a self, address: &'a str) -> ResolveFuture<'a> {
        (**self).resolve(address)
    }
}

/// Answers from a fixed table; unknown queries fall back to a default answer.
#[derive(Debug, Clone)]
pub struct StaticResolver {
    answers: HashMap<String, Result<Vec<Candidate>, ResolveError>>,
    fallback: Result<Vec<Candidate>, ResolveError>,
}

impl Default for StaticResolver {
    fn default() -> Self {
        Self {
            answers: HashMap::new(),
            fallback: Err(ResolveError::ZeroResults),
        }
    }
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every query yields `candidates`.
    pub fn always(candidates: Vec<Candidate>) -> Self {
        Self {
            answers: HashMap::new(),
            fallback: Ok(candidates),
        }
    }

    /// Every query fails with `err`.
    pub fn failing(err: ResolveError) -> Self {
        Self {
            answers: HashMap::new(),
            fallback: Err(err),
        }
    }

    pub fn with_answer(
        mut self,
        address: impl Into<String>,
        answer: Result<Vec<Candidate>, ResolveError>,
    ) -> Self {
        self.answers.insert(address.into(), answer);
        self
    }
}

impl LocationResolver for StaticResolver {
    fn resolve<'a>(&'a self, address: &'a str) -> ResolveFuture<'a> {
        let answer = self
            .answers
            .get(address)
            .unwrap_or(&self.fallback)
            .clone();
        Box::pin(async move { answer })
    }
}

#[cfg(test)]
mod tests {
    use super::{LocationResolver, StaticResolver};
    use crate::candidate::Candidate;
    use crate::error::ResolveError;
    use foundation::math::GeoPoint;

    #[test]
    fn static_resolver_prefers_table_entries() {
        let oslo = Candidate::new("Oslo, Norway", GeoPoint::new(59.91, 10.74));
        let resolver = StaticResolver::new().with_answer("oslo", Ok(vec![oslo.clone()]));

        let got = pollster::block_on(resolver.resolve("oslo")).unwrap();
        assert_eq!(got, vec![oslo]);

        let miss = pollster::block_on(resolver.resolve("atlantis"));
        assert_eq!(miss, Err(ResolveError::ZeroResults));
    }

    #[test]
    fn boxed_resolver_delegates() {
        let resolver: Box<dyn LocationResolver> =
            Box::new(StaticResolver::failing(ResolveError::Transport("offline".into())));
        let got = pollster::block_on(resolver.resolve("anything"));
        assert!(matches!(got, Err(ResolveError::Transport(_))));
    }
}
