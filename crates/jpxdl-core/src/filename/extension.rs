//! Extension selection per feed.

use serde::{Deserialize, Serialize};

/// How a feed picks the saved file's extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtensionRule {
    /// Always use `ext`.
    Fixed { ext: String },
    /// Use `then` if the source URL contains `.{matches}` (case-insensitive),
    /// else `otherwise`.
    FromUrl {
        matches: String,
        then: String,
        otherwise: String,
    },
}

impl ExtensionRule {
    pub fn fixed(ext: &str) -> Self {
        ExtensionRule::Fixed {
            ext: ext.to_string(),
        }
    }

    pub fn from_url(matches: &str, then: &str, otherwise: &str) -> Self {
        ExtensionRule::FromUrl {
            matches: matches.to_string(),
            then: then.to_string(),
            otherwise: otherwise.to_string(),
        }
    }

    /// Extension (without the dot) to use for a file fetched from `url`.
    pub fn pick(&self, url: &str) -> &str {
        match self {
            ExtensionRule::Fixed { ext } => ext,
            ExtensionRule::FromUrl {
                matches,
                then,
                otherwise,
            } => {
                let needle = format!(".{}", matches.trim_start_matches('.').to_lowercase());
                if url.to_lowercase().contains(&needle) {
                    then
                } else {
                    otherwise
                }
            }
        }
    }
}
