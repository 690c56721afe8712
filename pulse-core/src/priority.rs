//! Priority tags describing what kind of content an article carries.
//!
//! The set is closed; sources weight each tag differently.
//!
//! # Examples
//! ```
//! use pulse_core::PriorityTag;
//!
//! assert_eq!(PriorityTag::Business.as_str(), "business");
//! assert_eq!(PriorityTag::Implementation.to_string(), "implementation");
//! ```
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Content classification used to look up per-source weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PriorityTag {
    /// Business impact, strategy and market coverage.
    Business,
    /// Industry news and vendor announcements.
    Industry,
    /// Practical implementation guides and case studies.
    Implementation,
    /// Anything else.
    General,
}

impl PriorityTag {
    /// Every tag, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Business,
        Self::Industry,
        Self::Implementation,
        Self::General,
    ];

    /// Return the tag as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use pulse_core::PriorityTag;
    ///
    /// assert_eq!(PriorityTag::Industry.as_str(), "industry");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Industry => "industry",
            Self::Implementation => "implementation",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for PriorityTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PriorityTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "business" => Ok(Self::Business),
            "industry" => Ok(Self::Industry),
            "implementation" => Ok(Self::Implementation),
            "general" => Ok(Self::General),
            _ => Err(format!("unknown priority tag '{s}'")),
        }
    }
}
