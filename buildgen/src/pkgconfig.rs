//! Base substitution items for pkg-config `.pc.in` templates.

use anyhow::{Result, bail};
use tracing::debug;

use crate::template::Substitutions;

pub const TOKEN_VERSION: &str = "@VERSION@";
pub const TOKEN_PREFIX: &str = "@prefix@";
pub const TOKEN_EXEC_PREFIX: &str = "@exec_prefix@";
pub const TOKEN_LIBDIR: &str = "@libdir@";
pub const TOKEN_INCLUDEDIR: &str = "@includedir@";

const DEFAULT_EXEC_PREFIX: &str = "${prefix}";
const DEFAULT_LIBDIR: &str = "${exec_prefix}/lib";
const DEFAULT_INCLUDEDIR: &str = "${prefix}/include";

/// Install locations as supplied by the build environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PcOptions {
    pub prefix: String,
    pub version: String,
    pub exec_prefix: Option<String>,
    pub libdir: Option<String>,
    pub includedir: Option<String>,
}

/// Resolved values written into the `.pc` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcItems {
    pub prefix: String,
    pub version: String,
    pub exec_prefix: String,
    pub libdir: String,
    pub includedir: String,
}

impl PcItems {
    /// Resolve defaults and make explicit directories relative to `${prefix}`.
    pub fn resolve(options: &PcOptions) -> Result<Self> {
        let prefix = normalize_separators(options.prefix.trim());
        let version = options.version.trim().to_string();
        if prefix.is_empty() {
            bail!("prefix must be non-empty");
        }
        if version.is_empty() {
            bail!("version must be non-empty");
        }
        let prefix = trim_trailing_slash(&prefix).to_string();

        let resolve_dir = |value: &Option<String>, default: &str| -> String {
            match value {
                Some(dir) => relative_to_prefix(&prefix, &normalize_separators(dir)),
                None => default.to_string(),
            }
        };
        let items = Self {
            exec_prefix: resolve_dir(&options.exec_prefix, DEFAULT_EXEC_PREFIX),
            libdir: resolve_dir(&options.libdir, DEFAULT_LIBDIR),
            includedir: resolve_dir(&options.includedir, DEFAULT_INCLUDEDIR),
            prefix,
            version,
        };
        debug!(
            prefix = %items.prefix,
            exec_prefix = %items.exec_prefix,
            libdir = %items.libdir,
            includedir = %items.includedir,
            version = %items.version,
            "resolved pkg-config items"
        );
        Ok(items)
    }

    /// Base token set, in the order it is applied.
    pub fn substitutions(&self) -> Result<Substitutions> {
        let mut subs = Substitutions::new();
        subs.insert(TOKEN_VERSION, &self.version)?;
        subs.insert(TOKEN_PREFIX, &self.prefix)?;
        subs.insert(TOKEN_EXEC_PREFIX, &self.exec_prefix)?;
        subs.insert(TOKEN_LIBDIR, &self.libdir)?;
        subs.insert(TOKEN_INCLUDEDIR, &self.includedir)?;
        Ok(subs)
    }
}

/// pkg-config reads `\` as an escape, so paths always use `/`.
fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

fn trim_trailing_slash(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { path } else { trimmed }
}

/// Rewrite `dir` as `${prefix}/...` when it lies under `prefix`.
fn relative_to_prefix(prefix: &str, dir: &str) -> String {
    let dir = trim_trailing_slash(dir);
    if dir == prefix {
        return DEFAULT_EXEC_PREFIX.to_string();
    }
    let base = if prefix.ends_with('/') {
        prefix.to_string()
    } else {
        format!("{prefix}/")
    };
    match dir.strip_prefix(&base) {
        Some(rest) => format!("${{prefix}}/{rest}"),
        None => dir.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(prefix: &str, version: &str) -> PcOptions {
        PcOptions {
            prefix: prefix.to_string(),
            version: version.to_string(),
            ..PcOptions::default()
        }
    }

    #[test]
    fn defaults_are_relative_to_prefix() {
        let items = PcItems::resolve(&options("/usr/local", "1.6.2")).expect("resolve");
        assert_eq!(items.prefix, "/usr/local");
        assert_eq!(items.exec_prefix, "${prefix}");
        assert_eq!(items.libdir, "${exec_prefix}/lib");
        assert_eq!(items.includedir, "${prefix}/include");
        assert_eq!(items.version, "1.6.2");
    }

    #[test]
    fn explicit_dirs_under_prefix_are_relocated() {
        let opts = PcOptions {
            libdir: Some("/opt/json/lib64".to_string()),
            includedir: Some("/opt/json/include/".to_string()),
            exec_prefix: Some("/opt/json".to_string()),
            ..options("/opt/json/", "1.0")
        };
        let items = PcItems::resolve(&opts).expect("resolve");
        assert_eq!(items.prefix, "/opt/json");
        assert_eq!(items.libdir, "${prefix}/lib64");
        assert_eq!(items.includedir, "${prefix}/include");
        assert_eq!(items.exec_prefix, "${prefix}");
    }

    #[test]
    fn explicit_dirs_outside_prefix_are_kept() {
        let opts = PcOptions {
            libdir: Some("/usr/lib/x86_64-linux-gnu".to_string()),
            includedir: Some("/opt/jsonx/include".to_string()),
            ..options("/opt/json", "1.0")
        };
        let items = PcItems::resolve(&opts).expect("resolve");
        assert_eq!(items.libdir, "/usr/lib/x86_64-linux-gnu");
        assert_eq!(items.includedir, "/opt/jsonx/include");
    }

    #[test]
    fn windows_separators_are_normalized() {
        let opts = PcOptions {
            libdir: Some(r"C:\vs14\x64\lib".to_string()),
            ..options(r"C:\vs14\x64", "1.2")
        };
        let items = PcItems::resolve(&opts).expect("resolve");
        assert_eq!(items.prefix, "C:/vs14/x64");
        assert_eq!(items.libdir, "${prefix}/lib");
    }

    #[test]
    fn root_prefix_is_preserved() {
        let items = PcItems::resolve(&PcOptions {
            libdir: Some("/lib".to_string()),
            ..options("/", "1.0")
        })
        .expect("resolve");
        assert_eq!(items.prefix, "/");
        assert_eq!(items.libdir, "${prefix}/lib");
    }

    #[test]
    fn missing_prefix_or_version_fails() {
        assert!(PcItems::resolve(&options("", "1.0")).is_err());
        assert!(PcItems::resolve(&options("/usr", "  ")).is_err());
    }

    #[test]
    fn substitutions_cover_base_tokens_in_order() {
        let items = PcItems::resolve(&options("/usr", "1.0")).expect("resolve");
        let subs = items.substitutions().expect("subs");
        let tokens: Vec<&str> = subs.iter().map(|(token, _)| token).collect();
        assert_eq!(
            tokens,
            vec![
                TOKEN_VERSION,
                TOKEN_PREFIX,
                TOKEN_EXEC_PREFIX,
                TOKEN_LIBDIR,
                TOKEN_INCLUDEDIR
            ]
        );
        let rendered = subs.apply("prefix=@prefix@\nlibdir=@libdir@\nVersion: @VERSION@\n");
        assert_eq!(
            rendered,
            "prefix=/usr\nlibdir=${exec_prefix}/lib\nVersion: 1.0\n"
        );
    }
}
