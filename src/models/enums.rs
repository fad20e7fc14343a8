use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {field} value: {value}")]
pub struct UnknownVariant {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(UnknownVariant {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

str_enum!(
    /// Hospital-at-Home priority bucket. Declaration order follows score order.
    PriorityLabel {
        Ineligible => "ineligible",
        NeedsReview => "needs_review",
        Eligible => "eligible",
    }
);

impl PriorityLabel {
    /// All labels, highest priority first.
    pub const RANKED: [PriorityLabel; 3] = [Self::Eligible, Self::NeedsReview, Self::Ineligible];

    /// Integer rank key: higher means see the patient sooner.
    pub fn score(&self) -> u8 {
        match self {
            Self::Ineligible => 0,
            Self::NeedsReview => 1,
            Self::Eligible => 2,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ineligible => "Low Priority (Likely Ineligible)",
            Self::NeedsReview => "Medium Priority (Needs Review)",
            Self::Eligible => "High Priority (Likely Eligible)",
        }
    }
}

str_enum!(
    /// Which narrative analyzer backend a ranking pass talks to.
    AnalyzerBackend {
        Ollama => "ollama",
        OpenAi => "openai",
        Passthrough => "passthrough",
    }
);
