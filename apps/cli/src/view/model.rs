//! Screen state of the search page, made explicit so the workflow can be
//! driven and asserted on without a terminal attached.

/// Visibility of the fixed page regions. Everything starts hidden; the
/// session flips flags as the workflow progresses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panels {
    /// Spinner shown while a search request is in flight.
    pub loading: bool,
    /// Container holding the rendered job cards.
    pub results: bool,
    /// "No matches" block, mutually exclusive with `results`.
    pub no_results: bool,
    /// "Load more" affordance under the card list.
    pub load_more: bool,
}

/// The blocking notice currently on screen, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    Hidden,
    Error {
        message: String,
        tips: &'static [&'static str],
    },
    Success,
}

impl Modal {
    pub fn error(message: impl Into<String>, tips: &'static [&'static str]) -> Self {
        Modal::Error {
            message: message.into(),
            tips,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Modal::Error { .. })
    }
}

pub const APPLY_LABEL: &str = "Apply Now";
pub const APPLYING_LABEL: &str = "Applying...";

/// Per-card apply control. Disabled and relabeled while an application for
/// that job is outstanding; restored when the attempt completes, no matter
/// how it completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyButton {
    pub label: &'static str,
    pub enabled: bool,
}

impl Default for ApplyButton {
    fn default() -> Self {
        Self {
            label: APPLY_LABEL,
            enabled: true,
        }
    }
}

impl ApplyButton {
    pub fn pending() -> Self {
        Self {
            label: APPLYING_LABEL,
            enabled: false,
        }
    }
}
