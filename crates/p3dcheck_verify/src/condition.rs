//! Property check conditions.
//!
//! Each [`Condition`] inspects one property value in its LOD context and
//! either passes or yields a [`Finding`] with a fixed message. Conditions see
//! the whole model for cross-LOD lookups and the current LOD for sibling
//! properties, but never another property's findings.

use p3dcheck_format::{Lod, LodResolution, Model, Severity};

/// A failed check: the message to attach and how bad it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Human-readable message.
    pub message: String,
    /// Finding severity.
    pub severity: Severity,
}

impl Finding {
    fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

/// Everything a condition may look at while checking one property.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    /// The whole model, for resolution lookups across LODs.
    pub model: &'a Model,
    /// The LOD the property lives on, for sibling property lookups.
    pub lod: &'a Lod,
    /// Resolution of that LOD.
    pub resolution: LodResolution,
    /// Zero-based decode position of that LOD within the model.
    pub lod_index: usize,
    /// Lower-cased property name under check.
    pub name: &'a str,
    /// Raw property value as stored in the file.
    pub value: &'a str,
}

/// One check in a property's condition chain.
///
/// Variants carry their configuration; the registry wires them to property
/// names. Failure messages are stable output consumed by report tooling, so
/// they are not reworded here.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Value must be non-blank.
    NotEmpty,
    /// Value must parse as a number.
    IsNumber,
    /// Value must be literally `"0"` or `"1"`; other numerics only warn.
    IsBoolean,
    /// Lower-cased value must be in the closed set.
    IsEnum(&'static [&'static str]),
    /// Property must sit on the geometry LOD; a model without one accepts
    /// the first decoded LOD in its place.
    OnGeometryLod,
    /// Property must sit on a visual detail LOD (resolution below 901).
    OnVisualLod,
    /// Value names another LOD by index; `offset` maps the index into the
    /// resolution band it refers to. With `required` the shifted resolution
    /// must exist; otherwise the literal value is also accepted when it
    /// already names an existing LOD.
    LodIndexRef {
        /// Resolution band base added to the parsed value.
        offset: f32,
        /// Whether only the shifted resolution counts.
        required: bool,
    },
    /// A sibling property must exist on the same LOD.
    PropertyExists(&'static str),
    /// A sibling property must be absent from the same LOD.
    PropertyAbsent(&'static str),
    /// A sibling property must exist and hold the expected value.
    PropertyEquals(&'static str, &'static str),
    /// Value matching this literal (case-insensitively) is deprecated.
    ObsoleteValue(&'static str),
    /// Passes when either side passes; both failures merge into one finding.
    Either(Box<Condition>, Box<Condition>),
}

impl Condition {
    /// Runs the check. `None` is a pass.
    #[must_use]
    pub fn evaluate(&self, ctx: &CheckContext<'_>) -> Option<Finding> {
        match self {
            Self::NotEmpty => check_not_empty(ctx),
            Self::IsNumber => check_is_number(ctx),
            Self::IsBoolean => check_is_boolean(ctx),
            Self::IsEnum(values) => check_is_enum(ctx, values),
            Self::OnGeometryLod => check_on_geometry_lod(ctx),
            Self::OnVisualLod => check_on_visual_lod(ctx),
            Self::LodIndexRef { offset, required } => {
                check_lod_index_ref(ctx, *offset, *required)
            }
            Self::PropertyExists(name) => check_property_exists(ctx, name),
            Self::PropertyAbsent(name) => check_property_absent(ctx, name),
            Self::PropertyEquals(name, expected) => check_property_equals(ctx, name, expected),
            Self::ObsoleteValue(literal) => check_obsolete_value(ctx, literal),
            Self::Either(first, second) => check_either(ctx, first, second),
        }
    }
}

fn check_not_empty(ctx: &CheckContext<'_>) -> Option<Finding> {
    if ctx.value.trim().is_empty() {
        Some(Finding::error("Property value is empty."))
    } else {
        None
    }
}

fn check_is_number(ctx: &CheckContext<'_>) -> Option<Finding> {
    if ctx.value.trim().parse::<f32>().is_ok() {
        None
    } else {
        Some(Finding::error("Property is not a number."))
    }
}

fn check_is_boolean(ctx: &CheckContext<'_>) -> Option<Finding> {
    match ctx.value {
        "0" | "1" => None,
        other if other.trim().parse::<f32>().is_ok() => Some(Finding::warning(
            "Property is outside of range for boolean. Only 0/1 values are allowed",
        )),
        _ => Some(Finding::error(
            "Property is not a boolean. Only 0/1 values are allowed",
        )),
    }
}

fn check_is_enum(ctx: &CheckContext<'_>, values: &[&str]) -> Option<Finding> {
    let lowered = ctx.value.to_lowercase();
    if values.contains(&lowered.as_str()) {
        None
    } else {
        Some(Finding::error(format!(
            "Property does not match Enum. Value \"{}\" is not valid",
            ctx.value
        )))
    }
}

fn check_on_geometry_lod(ctx: &CheckContext<'_>) -> Option<Finding> {
    if ctx.resolution.is_geometry() {
        return None;
    }
    let model_has_geometry = ctx.model.lods().iter().any(|(r, _)| r.is_geometry());
    // Without a geometry LOD the first decoded LOD stands in for it.
    if !model_has_geometry && ctx.lod_index == 0 {
        return None;
    }
    Some(Finding::error("Property is not in Geometry LOD"))
}

fn check_on_visual_lod(ctx: &CheckContext<'_>) -> Option<Finding> {
    if ctx.resolution.is_visual() {
        None
    } else {
        Some(Finding::error("Property is not in Resolution LOD"))
    }
}

fn check_lod_index_ref(ctx: &CheckContext<'_>, offset: f32, required: bool) -> Option<Finding> {
    // Parse failures keep the zero default, matching the established
    // behavior for malformed index values.
    let n = ctx.value.trim().parse::<f32>().unwrap_or(0.0);
    let shifted = n + offset;
    if !required && ctx.model.lods().contains(LodResolution::new(n)) {
        return None;
    }
    if ctx.model.lods().contains(LodResolution::new(shifted)) {
        return None;
    }
    let message = if required {
        format!("Property does not match a existing lod. Couldn't find lod {shifted}")
    } else {
        format!("Property does not match a existing lod. Couldn't find lod {n} or {shifted}")
    };
    Some(Finding::error(message))
}

fn check_property_exists(ctx: &CheckContext<'_>, name: &str) -> Option<Finding> {
    if ctx.lod.property(name).is_some() {
        None
    } else {
        Some(Finding::error(format!(
            "Property is only valid if property \"{name}\" exists"
        )))
    }
}

fn check_property_absent(ctx: &CheckContext<'_>, name: &str) -> Option<Finding> {
    if ctx.lod.property(name).is_some() {
        Some(Finding::error(format!(
            "Property is only valid if property \"{name}\" doesn't exist"
        )))
    } else {
        None
    }
}

fn check_property_equals(ctx: &CheckContext<'_>, name: &str, expected: &str) -> Option<Finding> {
    match ctx.lod.property(name) {
        Some(sibling) if sibling.value.eq_ignore_ascii_case(expected) => None,
        Some(sibling) => Some(Finding::error(format!(
            "Property is only valid if property \"{name}\" is set to value \"{expected}\". \
             Current value is \"{}\"",
            sibling.value
        ))),
        None => Some(Finding::error(format!(
            "Property is only valid if property \"{name}\" exists"
        ))),
    }
}

fn check_obsolete_value(ctx: &CheckContext<'_>, literal: &str) -> Option<Finding> {
    if ctx.value.eq_ignore_ascii_case(literal) {
        Some(Finding::warning(format!(
            "Property value \"{}\" is obsolete",
            ctx.value
        )))
    } else {
        None
    }
}

fn check_either(ctx: &CheckContext<'_>, first: &Condition, second: &Condition) -> Option<Finding> {
    let first_failure = first.evaluate(ctx)?;
    let second_failure = second.evaluate(ctx)?;
    let severity = match (first_failure.severity, second_failure.severity) {
        (Severity::Warning, Severity::Warning) => Severity::Warning,
        _ => Severity::Error,
    };
    Some(Finding {
        message: format!(
            "Or Condition failed. Either: {} or {}",
            first_failure.message, second_failure.message
        ),
        severity,
    })
}
