#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The provider answered but found nothing.
    ZeroResults,
    /// The provider answered with a non-success status.
    Status {
        status: String,
        message: Option<String>,
    },
    /// Request never produced a response.
    Transport(String),
    /// Response body could not be understood.
    Decode(String),
}

impl ResolveError {
    /// Short, user-facing reason (the provider status where there is one).
    pub fn reason(&self) -> String {
        match self {
            ResolveError::ZeroResults => "ZERO_RESULTS".to_string(),
            ResolveError::Status {
                status,
                message: Some(msg),
            } => format!("{status} ({msg})"),
            ResolveError::Status {
                status,
                message: None,
            } => status.clone(),
            ResolveError::Transport(msg) => format!("network error: {msg}"),
            ResolveError::Decode(msg) => format!("unreadable response: {msg}"),
        }
    }
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::ZeroResults => write!(f, "no address found"),
            _ => write!(f, "geocoding failed: {}", self.reason()),
        }
    }
}

impl std::error::Error for ResolveError {}

#[cfg(test)]
mod tests {
    use super::ResolveError;

    #[test]
    fn reason_includes_provider_message() {
        let err = ResolveError::Status {
            status: "REQUEST_DENIED".into(),
            message: Some("The provided API key is invalid.".into()),
        };
        assert_eq!(
            err.reason(),
            "REQUEST_DENIED (The provided API key is invalid.)"
        );
        assert_eq!(
            err.to_string(),
            "geocoding failed: REQUEST_DENIED (The provided API key is invalid.)"
        );
    }
}
