//! Build-time file generators.
//!
//! Two one-shot transforms invoked by a build orchestrator:
//!
//! - **pkg-config generation**: [`pkgconfig`] resolves install locations into
//!   a [`template::Substitutions`] set that is applied to a `.pc.in` template.
//! - **Installed-test descriptors**: [`descriptor`] renders the small
//!   `[Test]` file a session test runner uses to find a test binary.
//!
//! Pure transforms ([`template`], [`pkgconfig`], [`descriptor`]) do no I/O.
//! Filesystem access lives in [`io`].

pub mod descriptor;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod pkgconfig;
pub mod template;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
