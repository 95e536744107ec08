use geocoding::ResolveError;
use massing::ParameterError;
use scene::SceneError;

use crate::step::Step;

pub const MSG_NO_ADDRESS: &str = "No address found. Please try again.";
pub const MSG_GEOCODE_FAILED_PREFIX: &str = "Geocode was not successful for the following reason: ";
pub const MSG_EMPTY_ADDRESS: &str = "Please enter an address.";
pub const MSG_NO_SELECTION: &str = "Please select an address first.";

#[derive(Debug, Clone, PartialEq)]
pub enum WizardError {
    /// The resolver answered with no candidates.
    ResolverEmpty,
    /// The resolver failed; carries the provider's reason.
    ResolverFailed(String),
    InvalidParameter(ParameterError),
    EmptyAddress,
    NoSelection,
    UnknownCandidate(usize),
    UnknownMarker(String),
    /// `action` is not available on `step`.
    InvalidTransition { step: Step, action: &'static str },
    /// A lookup or parameter update is already in flight.
    Busy,
    /// The completion belongs to a search or update that was superseded by
    /// navigation or reset.
    Stale,
    Scene(SceneError),
}

impl WizardError {
    /// Text shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            WizardError::ResolverEmpty => MSG_NO_ADDRESS.to_string(),
            WizardError::ResolverFailed(reason) => format!("{MSG_GEOCODE_FAILED_PREFIX}{reason}"),
            WizardError::EmptyAddress => MSG_EMPTY_ADDRESS.to_string(),
            WizardError::NoSelection => MSG_NO_SELECTION.to_string(),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for WizardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WizardError::ResolverEmpty => write!(f, "no address found"),
            WizardError::ResolverFailed(reason) => write!(f, "geocoding failed: {reason}"),
            WizardError::InvalidParameter(e) => write!(f, "invalid parameter: {e}"),
            WizardError::EmptyAddress => write!(f, "address is empty"),
            WizardError::NoSelection => write!(f, "no address selected"),
            WizardError::UnknownCandidate(i) => write!(f, "no candidate at index {i}"),
            WizardError::UnknownMarker(label) => write!(f, "no marker labelled {label:?}"),
            WizardError::InvalidTransition { step, action } => {
                write!(f, "cannot {action} during {}", step.as_str())
            }
            WizardError::Busy => write!(f, "another request is in progress"),
            WizardError::Stale => write!(f, "request was superseded"),
            WizardError::Scene(e) => write!(f, "scene error: {e}"),
        }
    }
}

impl std::error::Error for WizardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WizardError::InvalidParameter(e) => Some(e),
            WizardError::Scene(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParameterError> for WizardError {
    fn from(e: ParameterError) -> Self {
        WizardError::InvalidParameter(e)
    }
}

impl From<SceneError> for WizardError {
    fn from(e: SceneError) -> Self {
        WizardError::Scene(e)
    }
}

impl From<ResolveError> for WizardError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::ZeroResults => WizardError::ResolverEmpty,
            other => WizardError::ResolverFailed(other.reason()),
        }
    }
}
