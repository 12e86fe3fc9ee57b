//! Literal token substitution for `*.in` templates.

use std::sync::LazyLock;

use anyhow::{Result, bail};
use regex::Regex;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([A-Za-z_][A-Za-z0-9_]*)@").expect("placeholder regex"));

/// Ordered `(token, replacement)` pairs.
///
/// Pairs are applied in insertion order, so a replacement that itself contains
/// a later token is expanded by that later pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    pairs: Vec<(String, String)>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pair. Re-inserting a known token updates its value in place.
    pub fn insert(
        &mut self,
        token: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Result<()> {
        let token = token.into();
        if token.is_empty() {
            bail!("substitution token must be non-empty");
        }
        let replacement = replacement.into();
        match self.pairs.iter_mut().find(|(existing, _)| *existing == token) {
            Some((_, value)) => *value = replacement,
            None => self.pairs.push((token, replacement)),
        }
        Ok(())
    }

    /// Add a pair only if the token is not already present.
    pub fn insert_if_absent(
        &mut self,
        token: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Result<bool> {
        let token = token.into();
        if self.contains(&token) {
            return Ok(false);
        }
        self.insert(token, replacement)?;
        Ok(true)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.pairs.iter().any(|(existing, _)| existing == token)
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == token)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(token, value)| (token.as_str(), value.as_str()))
    }

    /// Replace every literal occurrence of each token.
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (token, value) in &self.pairs {
            if out.contains(token.as_str()) {
                out = out.replace(token.as_str(), value);
            }
        }
        out
    }
}

/// Placeholders of the form `@NAME@` still present in `text`, first-seen order.
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_RE.captures_iter(text) {
        let whole = caps[0].to_string();
        if !found.contains(&whole) {
            found.push(whole);
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_leaves_text_unchanged() {
        let text = "prefix=@prefix@\nVersion: @VERSION@\n";
        assert_eq!(Substitutions::new().apply(text), text);
    }

    #[test]
    fn replaces_every_occurrence() {
        let mut subs = Substitutions::new();
        subs.insert("@prefix@", "/usr").expect("insert");
        let out = subs.apply("a=@prefix@ b=@prefix@/lib");
        assert_eq!(out, "a=/usr b=/usr/lib");
    }

    #[test]
    fn pairs_apply_in_insertion_order() {
        let mut subs = Substitutions::new();
        subs.insert("@libdir@", "@exec_prefix@/lib").expect("insert");
        subs.insert("@exec_prefix@", "/opt").expect("insert");
        assert_eq!(subs.apply("@libdir@"), "/opt/lib");

        let mut reversed = Substitutions::new();
        reversed.insert("@exec_prefix@", "/opt").expect("insert");
        reversed.insert("@libdir@", "@exec_prefix@/lib").expect("insert");
        assert_eq!(reversed.apply("@libdir@"), "@exec_prefix@/lib");
    }

    #[test]
    fn reinsert_updates_value_in_place() {
        let mut subs = Substitutions::new();
        subs.insert("@A@", "1").expect("insert");
        subs.insert("@B@", "2").expect("insert");
        subs.insert("@A@", "3").expect("insert");
        let tokens: Vec<&str> = subs.iter().map(|(token, _)| token).collect();
        assert_eq!(tokens, vec!["@A@", "@B@"]);
        assert_eq!(subs.get("@A@"), Some("3"));
    }

    #[test]
    fn insert_if_absent_keeps_existing() {
        let mut subs = Substitutions::new();
        subs.insert("@A@", "cli").expect("insert");
        assert!(!subs.insert_if_absent("@A@", "config").expect("insert"));
        assert!(subs.insert_if_absent("@B@", "config").expect("insert"));
        assert_eq!(subs.get("@A@"), Some("cli"));
        assert_eq!(subs.len(), 2);
    }

    #[test]
    fn empty_token_is_rejected() {
        let mut subs = Substitutions::new();
        assert!(subs.insert("", "x").is_err());
        assert!(subs.is_empty());
    }

    #[test]
    fn apply_is_deterministic() {
        let mut subs = Substitutions::new();
        subs.insert("@VERSION@", "1.6.2").expect("insert");
        let text = "Version: @VERSION@\n";
        assert_eq!(subs.apply(text), subs.apply(text));
    }

    #[test]
    fn unresolved_placeholders_are_deduplicated() {
        let text = "@prefix@ @LIBS@ user@example.com @prefix@ @@";
        assert_eq!(unresolved_placeholders(text), vec!["@prefix@", "@LIBS@"]);
    }

    #[test]
    fn pkg_config_variables_are_not_placeholders() {
        assert!(unresolved_placeholders("libdir=${exec_prefix}/lib\n").is_empty());
    }
}
