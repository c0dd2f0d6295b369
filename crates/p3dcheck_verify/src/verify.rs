//! The verification pass over a decoded model.
//!
//! Findings are collected against a shared borrow of the model first and
//! attached afterwards, so no condition can ever observe another property's
//! outcome, only raw tables.

use p3dcheck_format::{Diagnostic, Model};

use crate::condition::CheckContext;
use crate::registry::Registry;

/// Checks every property on every LOD and attaches the findings.
///
/// Unknown property names get a single warning and no further checks. Known
/// names run their full condition chain in registration order; one property
/// may accumulate several findings.
pub fn verify_model(model: &mut Model, registry: &Registry) {
    let mut collected: Vec<(usize, Vec<Diagnostic>)> = Vec::new();
    for (lod_index, (resolution, lod)) in model.lods().iter().enumerate() {
        let mut findings = Vec::new();
        for (name, property) in lod.properties() {
            let Some(chain) = registry.rule(name) else {
                findings.push(Diagnostic::warning(name, "Unknown Property"));
                continue;
            };
            let ctx = CheckContext {
                model,
                lod,
                resolution: *resolution,
                lod_index,
                name,
                value: &property.value,
            };
            for condition in chain {
                if let Some(finding) = condition.evaluate(&ctx) {
                    findings.push(Diagnostic {
                        property: name.to_string(),
                        message: finding.message,
                        severity: finding.severity,
                    });
                }
            }
        }
        if !findings.is_empty() {
            collected.push((lod_index, findings));
        }
    }

    let total: usize = collected.iter().map(|(_, f)| f.len()).sum();
    if total > 0 {
        tracing::debug!(
            "{} finding(s) across {} LOD(s) in {}",
            total,
            collected.len(),
            model.path().display()
        );
    }

    for (lod_index, findings) in collected {
        if let Some((_, lod)) = model.lods_mut().iter_mut().nth(lod_index) {
            for diagnostic in findings {
                lod.push_diagnostic(diagnostic);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use p3dcheck_format::{Lod, LodResolution, Severity};

    fn model_with(lods: &[(f32, &[(&str, &str)])]) -> Model {
        let mut model = Model::new("test.p3d");
        for &(resolution, properties) in lods {
            let mut lod = Lod::new();
            for &(name, value) in properties {
                lod.insert_property(name, value.to_string(), 0);
            }
            model.insert_lod(LodResolution::new(resolution), lod);
        }
        model
    }

    fn diagnostics_at(model: &Model, index: usize) -> &[Diagnostic] {
        model.lods().iter().nth(index).unwrap().1.diagnostics()
    }

    #[test]
    fn test_clean_single_lod_model_verifies_clean() {
        // A lone LOD stands in for the geometry LOD, so mass belongs there.
        let mut model = model_with(&[(1.0, &[("mass", "100")])]);
        verify_model(&mut model, &Registry::standard());
        assert!(!model.has_diagnostics());
    }

    #[test]
    fn test_unknown_property_warns_once() {
        let mut model = model_with(&[(1e13, &[("steamengine", "1")])]);
        verify_model(&mut model, &Registry::standard());
        let diagnostics = diagnostics_at(&model, 0);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].property, "steamengine");
        assert_eq!(diagnostics[0].message, "Unknown Property");
        assert_eq!(diagnostics[0].severity, Severity::Warning);
    }

    #[test]
    fn test_failures_accumulate_without_short_circuit() {
        // Empty mass on a non-first visual LOD trips all three conditions.
        let mut model = model_with(&[(1.0, &[]), (2.0, &[("mass", "")])]);
        verify_model(&mut model, &Registry::standard());
        let messages: Vec<&str> = diagnostics_at(&model, 1)
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(
            messages,
            [
                "Property value is empty.",
                "Property is not in Geometry LOD",
                "Property is not a number."
            ]
        );
    }

    #[test]
    fn test_decode_diagnostics_survive_verification() {
        let mut model = Model::new("test.p3d");
        let mut lod = Lod::new();
        lod.insert_property("mass", "100".to_string(), 0);
        lod.insert_property("mass", "200".to_string(), 64);
        model.insert_lod(LodResolution::new(1e13), lod);

        verify_model(&mut model, &Registry::standard());
        let diagnostics = diagnostics_at(&model, 0);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "Duplicate property definition. First value is kept"
        );
    }

    #[test]
    fn test_boolean_out_of_range_warns_instead_of_failing_parse() {
        let mut model = model_with(&[(1e13, &[("canocclude", "2")])]);
        verify_model(&mut model, &Registry::standard());
        let diagnostics = diagnostics_at(&model, 0);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert_eq!(
            diagnostics[0].message,
            "Property is outside of range for boolean. Only 0/1 values are allowed"
        );
    }

    #[test]
    fn test_shadow_conflicts_with_sbsource_on_the_same_lod() {
        let mut model = model_with(&[(
            1e13,
            &[("shadow", "hybrid"), ("sbsource", "visual")],
        )]);
        verify_model(&mut model, &Registry::standard());
        let diagnostics = diagnostics_at(&model, 0);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].property, "shadow");
        assert_eq!(
            diagnostics[0].message,
            "Property is only valid if property \"sbsource\" doesn't exist"
        );
    }

    #[test]
    fn test_lodnoshadow_belongs_on_visual_lods() {
        let mut model = model_with(&[
            (1.0, &[("lodnoshadow", "1")]),
            (1e13, &[("lodnoshadow", "1")]),
        ]);
        verify_model(&mut model, &Registry::standard());
        assert!(diagnostics_at(&model, 0).is_empty());
        let diagnostics = diagnostics_at(&model, 1);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "Property is not in Resolution LOD");
    }

    #[test]
    fn test_shadowvolumelod_reference_resolves_across_lods() {
        let mut model = model_with(&[
            (1e13, &[("shadowvolumelod", "0")]),
            (10000.0, &[]),
        ]);
        verify_model(&mut model, &Registry::standard());
        assert!(!model.has_diagnostics());

        let mut broken = model_with(&[(1e13, &[("shadowvolumelod", "3")])]);
        verify_model(&mut broken, &Registry::standard());
        let diagnostics = diagnostics_at(&broken, 0);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "Property does not match a existing lod. Couldn't find lod 3 or 10003"
        );
    }
}
