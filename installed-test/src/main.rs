//! Installed-test descriptor generator.
//!
//! Writes `<outdir>/<outfile>` describing how a session test runner should
//! launch `<testdir>/<testname>`.

use std::path::PathBuf;

use anyhow::Result;
use buildgen::descriptor::InstalledTest;
use buildgen::exit_codes;
use buildgen::io::files::write_descriptor;
use buildgen::logging;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "gen-installed-test",
    version,
    about = "Generate installed-test data"
)]
struct Cli {
    /// Installed test directory.
    #[arg(long, value_name = "DIR")]
    testdir: String,

    /// Installed test name.
    #[arg(long, value_name = "NAME")]
    testname: String,

    /// Output file.
    #[arg(long, value_name = "FILE")]
    outfile: String,

    /// Output directory.
    #[arg(long, value_name = "DIR")]
    outdir: PathBuf,
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
    let test = InstalledTest::new(&cli.testdir, &cli.testname);
    write_descriptor(&cli.outdir, &cli.outfile, &test)?;
    Ok(())
}
