//! Extra substitution tokens loaded from a TOML file.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::template::Substitutions;

/// Token configuration (TOML).
///
/// ```toml
/// strict = true
///
/// [tokens]
/// "@PACKAGE@" = "json-glib"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TokenConfig {
    /// Fail when the rendered output still contains `@NAME@` placeholders.
    pub strict: bool,

    /// Additional `(token, replacement)` pairs, applied after the base items.
    pub tokens: BTreeMap<String, String>,
}

impl TokenConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(token) = self.tokens.keys().find(|token| token.trim().is_empty()) {
            return Err(anyhow!("tokens: token name must be non-empty, got {token:?}"));
        }
        Ok(())
    }

    /// Append tokens not already present in `subs`. Returns how many were added.
    pub fn extend(&self, subs: &mut Substitutions) -> Result<usize> {
        let mut added = 0;
        for (token, value) in &self.tokens {
            if subs.insert_if_absent(token.as_str(), value.as_str())? {
                added += 1;
            } else {
                debug!(token = %token, "config token shadowed by command line");
            }
        }
        Ok(added)
    }
}

/// Load token config from a TOML file. The file must exist.
pub fn load_config(path: &Path) -> Result<TokenConfig> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: TokenConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate().with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}
