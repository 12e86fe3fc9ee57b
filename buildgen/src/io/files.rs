//! Template and descriptor file writers.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::descriptor::InstalledTest;
use crate::template::Substitutions;

/// Read `src`, apply every pair in `subs`, write the result to `dst`.
pub fn replace_multi(src: &Path, dst: &Path, subs: &Substitutions) -> Result<()> {
    let rendered = render_template(src, subs)?;
    write_atomic(dst, &rendered)?;
    info!(
        src = %src.display(),
        dst = %dst.display(),
        pairs = subs.len(),
        "wrote substituted template"
    );
    Ok(())
}

/// Single-pair form of [`replace_multi`].
pub fn replace_one(src: &Path, dst: &Path, token: &str, replacement: &str) -> Result<()> {
    let mut subs = Substitutions::new();
    subs.insert(token, replacement)?;
    replace_multi(src, dst, &subs)
}

/// Read `src` and apply `subs` without writing anything.
pub fn render_template(src: &Path, subs: &Substitutions) -> Result<String> {
    let template =
        fs::read_to_string(src).with_context(|| format!("read template {}", src.display()))?;
    debug!(src = %src.display(), bytes = template.len(), "read template");
    Ok(subs.apply(&template))
}

/// Write the rendered descriptor to `outdir/outfile`.
///
/// `outdir` must already exist.
pub fn write_descriptor(outdir: &Path, outfile: &str, test: &InstalledTest) -> Result<PathBuf> {
    if outfile.is_empty() {
        bail!("output file name must be non-empty");
    }
    let path = outdir.join(outfile);
    let contents = test.render()?;
    write_atomic(&path, &contents)?;
    info!(path = %path.display(), exec = %test.exec_path(), "wrote installed-test descriptor");
    Ok(path)
}

/// Replace `path` with `contents` via a sibling temp file and rename.
///
/// A symlinked `path` is written through: the link stays and its target is
/// replaced. The parent directory is not created; a missing parent is an error.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let target = resolve_symlink(path)?;
    let tmp_path = tmp_sibling(&target)?;
    if let Err(err) = fs::write(&tmp_path, contents) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err).with_context(|| format!("write {}", target.display()));
    }
    if let Err(err) = fs::rename(&tmp_path, &target) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err).with_context(|| format!("replace {}", target.display()));
    }
    Ok(())
}

/// Follow `path` to the file it names when it is a symlink.
fn resolve_symlink(path: &Path) -> Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            if let Ok(resolved) = fs::canonicalize(path) {
                debug!(
                    link = %path.display(),
                    target = %resolved.display(),
                    "writing through symlink"
                );
                return Ok(resolved);
            }
            // Dangling link: create the file it points at.
            let link = fs::read_link(path)
                .with_context(|| format!("read symlink {}", path.display()))?;
            let parent = path.parent().unwrap_or_else(|| Path::new(""));
            Ok(parent.join(link))
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn tmp_sibling(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .with_context(|| format!("output path missing file name {}", path.display()))?;
    let mut tmp_name = OsString::from(".");
    tmp_name.push(name);
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}
