//! The flattened findings report.
//!
//! One line per model with findings, one indented line per LOD with
//! findings, one doubly-indented `name=message` line per finding. Clean
//! models and clean LODs never appear.

use std::fmt::Write as _;
use std::io;

use p3dcheck_format::Model;

/// Renders the report for every model that carries at least one diagnostic.
#[must_use]
pub fn render_report(models: &[Model]) -> String {
    let mut text = String::new();
    for model in models {
        if !model.has_diagnostics() {
            continue;
        }
        let _ = writeln!(text, "{}", model.path().display());
        for (resolution, lod) in model.lods().iter() {
            if lod.diagnostics().is_empty() {
                continue;
            }
            let _ = writeln!(text, "    {resolution}");
            for diagnostic in lod.diagnostics() {
                let _ = writeln!(text, "        {}={}", diagnostic.property, diagnostic.message);
            }
        }
    }
    text
}

/// Writes the rendered report to a stream.
pub fn write_report(writer: &mut impl io::Write, models: &[Model]) -> io::Result<()> {
    writer.write_all(render_report(models).as_bytes())
}
