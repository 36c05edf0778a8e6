//! Downstream artifacts of an extraction.
//!
//! - [`render_manifest`]: `package.json` or `deno.json` for the runtime
//! - [`render_report`]: `DEPENDENCIES.md`
//! - [`OutputWriter`]: mirrors output modules under an output root

mod manifest;
mod report;
mod writer;

pub use manifest::{Manifest, PACKAGE_NAME, PACKAGE_VERSION, render_manifest};
pub use report::{REPORT_FILE, render_report};
pub use writer::OutputWriter;
