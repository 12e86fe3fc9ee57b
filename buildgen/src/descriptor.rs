//! Installed-test descriptors for session test runners.

use std::path::Path;

use anyhow::{Context, Result};
use minijinja::{AutoEscape, Environment, context};

const DESCRIPTOR_TEMPLATE: &str = include_str!("templates/installed-test.in");

/// An installed test binary: `testdir/testname`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledTest {
    pub testdir: String,
    pub testname: String,
}

impl InstalledTest {
    pub fn new(testdir: impl Into<String>, testname: impl Into<String>) -> Self {
        Self {
            testdir: testdir.into(),
            testname: testname.into(),
        }
    }

    /// Path of the test binary. An absolute `testname` replaces `testdir`.
    pub fn exec_path(&self) -> String {
        Path::new(&self.testdir)
            .join(&self.testname)
            .to_string_lossy()
            .into_owned()
    }

    /// Render the descriptor text.
    pub fn render(&self) -> Result<String> {
        DescriptorEngine::new()?.render(&self.exec_path())
    }
}

struct DescriptorEngine {
    env: Environment<'static>,
}

impl DescriptorEngine {
    fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_template("installed-test", DESCRIPTOR_TEMPLATE)
            .context("parse installed-test template")?;
        Ok(Self { env })
    }

    fn render(&self, exec: &str) -> Result<String> {
        let template = self.env.get_template("installed-test")?;
        let rendered = template
            .render(context! { exec => exec })
            .context("render installed-test template")?;
        Ok(rendered)
    }
}
