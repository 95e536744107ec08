use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    AddressEntry,
    AddressSelection,
    ModelView,
}

impl Step {
    pub const COUNT: u8 = 3;

    /// 1-based.
    pub fn number(&self) -> u8 {
        match self {
            Step::AddressEntry => 1,
            Step::AddressSelection => 2,
            Step::ModelView => 3,
        }
    }

    /// Progress bar fill, percent.
    pub fn progress_percent(&self) -> u8 {
        match self {
            Step::AddressEntry => 33,
            Step::AddressSelection => 66,
            Step::ModelView => 100,
        }
    }

    pub fn label(&self) -> String {
        format!("Step {} of {}", self.number(), Self::COUNT)
    }

    /// Step reached by the "back" button, if any.
    pub fn previous(&self) -> Option<Step> {
        match self {
            Step::AddressEntry => None,
            Step::AddressSelection => Some(Step::AddressEntry),
            Step::ModelView => Some(Step::AddressSelection),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::AddressEntry => "address-entry",
            Step::AddressSelection => "address-selection",
            Step::ModelView => "model-view",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Step;

    #[test]
    fn progress_matches_step() {
        assert_eq!(Step::AddressEntry.progress_percent(), 33);
        assert_eq!(Step::AddressSelection.label(), "Step 2 of 3");
        assert_eq!(Step::ModelView.progress_percent(), 100);
    }

    #[test]
    fn back_chain() {
        assert_eq!(Step::ModelView.previous(), Some(Step::AddressSelection));
        assert_eq!(Step::AddressSelection.previous(), Some(Step::AddressEntry));
        assert_eq!(Step::AddressEntry.previous(), None);
    }
}
