use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A string literal did not match any variant of the target taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {taxonomy} literal: {literal:?}")]
pub struct UnknownLiteral {
    pub taxonomy: &'static str,
    pub literal: String,
}

macro_rules! taxonomy {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// All variants, in prompt/documentation order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire literal used in prompts, model replies, and payloads.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownLiteral;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownLiteral {
                        taxonomy: $label,
                        literal: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

taxonomy! {
    /// How quickly the ticket needs a response.
    UrgencyLevel, "urgency" {
        Critical => "critical",
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

taxonomy! {
    /// What the customer is asking for.
    IntentType, "intent" {
        BugReport => "bug_report",
        FeatureRequest => "feature_request",
        AccountIssue => "account_issue",
        BillingInquiry => "billing_inquiry",
        HowTo => "how_to",
        Integration => "integration",
        Performance => "performance",
        Security => "security",
    }
}

taxonomy! {
    /// Which part of the product the ticket touches.
    ProductArea, "product" {
        Api => "api",
        Dashboard => "dashboard",
        MobileApp => "mobile_app",
        Integrations => "integrations",
        Billing => "billing",
        Authentication => "authentication",
        Analytics => "analytics",
        General => "general",
    }
}
