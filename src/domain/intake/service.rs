//! The fixed set of service categories recognized during intake.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A support category the assistant can be scoped to.
///
/// The set is closed: selection is a case-insensitive, whitespace-trimmed
/// exact match against the canonical labels — no fuzzy or partial matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    DigitalMarketing,
    Brand,
    SoftwareDevelopment,
    WebsiteDesign,
}

impl ServiceCategory {
    /// All categories, in menu order.
    pub const ALL: [ServiceCategory; 4] = [
        Self::DigitalMarketing,
        Self::Brand,
        Self::SoftwareDevelopment,
        Self::WebsiteDesign,
    ];

    /// The canonical, originally-cased label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DigitalMarketing => "Digital Marketing",
            Self::Brand => "Brand",
            Self::SoftwareDevelopment => {
                "Custom Software Development/Mobile Application Development"
            }
            Self::WebsiteDesign => "Website Design",
        }
    }

    /// Matches user input against the canonical labels.
    ///
    /// Input is trimmed and case-folded before comparison; the match itself
    /// is exact. Returns `None` for anything outside the canonical set.
    pub fn match_input(input: &str) -> Option<Self> {
        let normalized = input.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|service| service.label().to_lowercase() == normalized)
    }

    /// The canonical labels, in menu order.
    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(|s| s.label().to_string()).collect()
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
