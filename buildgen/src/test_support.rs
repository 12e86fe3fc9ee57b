//! Test-only helpers for generator fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// A `.pc.in` template shaped like the ones shipped with GLib-style libraries.
pub const SAMPLE_PC_TEMPLATE: &str = "\
prefix=@prefix@
exec_prefix=@exec_prefix@
libdir=@libdir@
includedir=@includedir@

Name: JSON-GLib
Description: JSON Parser for GLib
Version: @VERSION@
Libs: -L${libdir} -ljson-glib-1.0
Cflags: -I${includedir}/json-glib-1.0
";

/// Scratch source tree laid out as `<top>/<name>/<name>.pc.in`.
pub struct SourceTree {
    temp: TempDir,
}

impl SourceTree {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        Ok(Self { temp })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Write `contents` as the `.pc.in` template for `name`.
    pub fn write_pc_template(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let dir = self.path().join(name);
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        let path = dir.join(format!("{name}.pc.in"));
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Create (if needed) and return a subdirectory.
    pub fn dir(&self, rel: &str) -> Result<PathBuf> {
        let dir = self.path().join(rel);
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        Ok(dir)
    }
}
