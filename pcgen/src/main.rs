//! pkg-config file generator.
//!
//! Substitutes install locations and the library version into a `.pc.in`
//! template. Paths are given either directly (`--template`/`--output`) or
//! through the conventional source layout (`--top-srcdir`/`--srcdir`).

use std::path::PathBuf;

use anyhow::{Result, bail};
use buildgen::exit_codes;
use buildgen::io::config::load_config;
use buildgen::io::files::{render_template, write_atomic};
use buildgen::logging;
use buildgen::pkgconfig::{PcItems, PcOptions};
use buildgen::template::unresolved_placeholders;
use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use tracing::{debug, info, warn};

const DEFAULT_NAME: &str = "json-glib";

#[derive(Parser, Debug)]
#[command(
    name = "pcgen",
    about = "Generate a pkg-config file from a .pc.in template"
)]
struct Cli {
    /// Installation prefix.
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    prefix: String,

    /// Library version written to `Version:`.
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    version: String,

    /// Executable prefix (default `${prefix}`).
    #[arg(long)]
    exec_prefix: Option<String>,

    /// Library directory (default `${exec_prefix}/lib`).
    #[arg(long)]
    libdir: Option<String>,

    /// Header directory (default `${prefix}/include`).
    #[arg(long)]
    includedir: Option<String>,

    /// TOML file with extra `[tokens]`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail if any `@NAME@` placeholder is left unreplaced.
    #[arg(long)]
    strict: bool,

    /// Template file to read.
    #[arg(
        long,
        requires = "output",
        conflicts_with_all = ["top_srcdir", "srcdir", "name"],
        required_unless_present = "top_srcdir"
    )]
    template: Option<PathBuf>,

    /// File to write.
    #[arg(long, requires = "template")]
    output: Option<PathBuf>,

    /// Top of the source tree; the template is `<top-srcdir>/<name>/<name>.pc.in`.
    #[arg(long, requires = "srcdir")]
    top_srcdir: Option<PathBuf>,

    /// Directory receiving `<name>.pc`.
    #[arg(long, requires = "top_srcdir")]
    srcdir: Option<PathBuf>,

    /// Package name for the conventional layout (default `json-glib`).
    #[arg(
        long,
        requires = "top_srcdir",
        value_parser = NonEmptyStringValueParser::new()
    )]
    name: Option<String>,
}

impl Cli {
    fn pc_options(&self) -> PcOptions {
        PcOptions {
            prefix: self.prefix.clone(),
            version: self.version.clone(),
            exec_prefix: self.exec_prefix.clone(),
            libdir: self.libdir.clone(),
            includedir: self.includedir.clone(),
        }
    }

    /// Resolve `(template, output)` from either form of the arguments.
    fn paths(&self) -> Result<(PathBuf, PathBuf)> {
        if let (Some(template), Some(output)) = (&self.template, &self.output) {
            return Ok((template.clone(), output.clone()));
        }
        let (Some(top_srcdir), Some(srcdir)) = (&self.top_srcdir, &self.srcdir) else {
            bail!("either --template/--output or --top-srcdir/--srcdir is required");
        };
        let name = self.name.as_deref().unwrap_or(DEFAULT_NAME);
        if name.is_empty() {
            bail!("--name must be non-empty");
        }
        let template = top_srcdir.join(name).join(format!("{name}.pc.in"));
        let output = srcdir.join(format!("{name}.pc"));
        Ok((template, output))
    }
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::FAILURE);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let (template, output) = cli.paths()?;
    let items = PcItems::resolve(&cli.pc_options())?;
    let mut subs = items.substitutions()?;

    let mut strict = cli.strict;
    if let Some(path) = &cli.config {
        let cfg = load_config(path)?;
        let added = cfg.extend(&mut subs)?;
        debug!(config = %path.display(), added, "loaded extra tokens");
        strict |= cfg.strict;
    }

    let rendered = render_template(&template, &subs)?;
    let unresolved = unresolved_placeholders(&rendered);
    if !unresolved.is_empty() {
        if strict {
            bail!(
                "unresolved placeholders in {}: {}",
                template.display(),
                unresolved.join(", ")
            );
        }
        warn!(
            template = %template.display(),
            placeholders = %unresolved.join(", "),
            "template has unresolved placeholders"
        );
    }

    write_atomic(&output, &rendered)?;
    info!(output = %output.display(), "wrote pkg-config file");
    Ok(())
}
