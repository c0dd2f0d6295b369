//! LOD resolution value type and category classification.
//!
//! A LOD is keyed by a floating resolution whose magnitude doubles as a
//! category tag: small values are visual detail levels, large sentinel
//! values mark non-visual LODs (geometry, memory points, shadow volumes).
//! Encoder rounding differs across tool versions, so comparing two
//! resolutions uses a relative tolerance.

use std::fmt;

/// Relative equality tolerance (0.1%), scaled by the right-hand value.
const TOLERANCE: f32 = 1e-3;

/// Threshold below which a resolution is an ordinary visual detail level.
const VISUAL_LIMIT: f32 = 901.0;

/// Sentinel resolution of the geometry LOD.
const GEOMETRY: f32 = 1e13;

/// A LOD's resolution value with tolerance-aware equality.
#[derive(Debug, Clone, Copy)]
pub struct LodResolution(f32);

impl LodResolution {
    /// Wraps a raw resolution value.
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(value)
    }

    /// The raw resolution value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.0
    }

    /// Whether this resolution denotes an ordinary visual detail level.
    #[must_use]
    pub fn is_visual(&self) -> bool {
        self.0 < VISUAL_LIMIT
    }

    /// Whether this resolution denotes the geometry LOD.
    #[must_use]
    pub fn is_geometry(&self) -> bool {
        *self == Self(GEOMETRY)
    }

    /// Classifies the value into its named category.
    #[must_use]
    pub fn category(&self) -> LodCategory {
        let v = self.0;
        if v < VISUAL_LIMIT {
            return LodCategory::Resolution;
        }
        if *self == Self(1e3) {
            return LodCategory::ViewGunner;
        }
        if *self == Self(1.1e3) {
            return LodCategory::ViewPilot;
        }
        if *self == Self(1.2e3) {
            return LodCategory::ViewCargo;
        }
        if (1e4..1.1e4).contains(&v) {
            return LodCategory::ShadowVolume(v - 1e4);
        }
        if (1.1e4..1.2e4).contains(&v) {
            return LodCategory::ShadowBuffer(v - 1.1e4);
        }
        if *self == Self(GEOMETRY) {
            return LodCategory::Geometry;
        }
        if *self == Self(1e15) {
            return LodCategory::Memory;
        }
        if *self == Self(2e15) {
            return LodCategory::LandContact;
        }
        if *self == Self(3e15) {
            return LodCategory::Roadway;
        }
        if *self == Self(4e15) {
            return LodCategory::Paths;
        }
        if *self == Self(5e15) {
            return LodCategory::HitPoints;
        }
        if *self == Self(6e15) {
            return LodCategory::ViewGeometry;
        }
        if *self == Self(7e15) {
            return LodCategory::FireGeometry;
        }
        LodCategory::Unknown
    }
}

impl PartialEq for LodResolution {
    /// `|a - b| <= b * 0.001`; the right-hand value sets the scale.
    fn eq(&self, other: &Self) -> bool {
        (self.0 - other.0).abs() <= other.0 * TOLERANCE
    }
}

impl fmt::Display for LodResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category() {
            LodCategory::Resolution => write!(f, "Resolution {}", self.0),
            LodCategory::ViewGunner => write!(f, "View Gunner"),
            LodCategory::ViewPilot => write!(f, "View Pilot"),
            LodCategory::ViewCargo => write!(f, "View Cargo"),
            LodCategory::ShadowVolume(n) => write!(f, "ShadowVolume {n}"),
            LodCategory::ShadowBuffer(n) => write!(f, "ShadowBuffer {n}"),
            LodCategory::Geometry => write!(f, "Geometry"),
            LodCategory::Memory => write!(f, "Memory"),
            LodCategory::LandContact => write!(f, "LandContact"),
            LodCategory::Roadway => write!(f, "Roadway"),
            LodCategory::Paths => write!(f, "Paths"),
            LodCategory::HitPoints => write!(f, "HitPoints"),
            LodCategory::ViewGeometry => write!(f, "View Geometry"),
            LodCategory::FireGeometry => write!(f, "Fire Geometry"),
            LodCategory::Unknown => write!(f, "Unknown Resolution {}", self.0),
        }
    }
}

/// Named resolution category, used for display and LOD-context checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LodCategory {
    /// Ordinary visual detail level.
    Resolution,
    /// Gunner view.
    ViewGunner,
    /// Pilot view.
    ViewPilot,
    /// Cargo view.
    ViewCargo,
    /// Shadow volume at the carried detail index.
    ShadowVolume(f32),
    /// Shadow buffer at the carried detail index.
    ShadowBuffer(f32),
    /// Collision geometry.
    Geometry,
    /// Memory points.
    Memory,
    /// Land contact points.
    LandContact,
    /// Roadway surface.
    Roadway,
    /// AI path finding.
    Paths,
    /// Hit point volumes.
    HitPoints,
    /// View geometry.
    ViewGeometry,
    /// Fire geometry.
    FireGeometry,
    /// No known band matched.
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_within_tolerance() {
        for r in [1.0f32, 901.0, 1e4, 1e13, 7e15] {
            assert_eq!(LodResolution::new(r), LodResolution::new(r * 1.0009));
            assert_eq!(LodResolution::new(r), LodResolution::new(r * 0.9991));
        }
    }

    #[test]
    fn test_equality_outside_tolerance() {
        for r in [1.0f32, 901.0, 1e4, 1e13, 7e15] {
            assert_ne!(LodResolution::new(r), LodResolution::new(r * 1.01));
        }
    }

    #[test]
    fn test_zero_only_equals_zero() {
        assert_eq!(LodResolution::new(0.0), LodResolution::new(0.0));
        assert_ne!(LodResolution::new(1e-3), LodResolution::new(0.0));
    }

    #[test]
    fn test_category_bands() {
        assert_eq!(LodResolution::new(0.0).category(), LodCategory::Resolution);
        assert_eq!(LodResolution::new(12.5).category(), LodCategory::Resolution);
        assert_eq!(LodResolution::new(1e3).category(), LodCategory::ViewGunner);
        assert_eq!(LodResolution::new(1.1e3).category(), LodCategory::ViewPilot);
        assert_eq!(LodResolution::new(1.2e3).category(), LodCategory::ViewCargo);
        assert_eq!(
            LodResolution::new(10000.0).category(),
            LodCategory::ShadowVolume(0.0)
        );
        assert_eq!(
            LodResolution::new(11010.0).category(),
            LodCategory::ShadowBuffer(10.0)
        );
        assert_eq!(LodResolution::new(1e13).category(), LodCategory::Geometry);
        assert_eq!(LodResolution::new(1e15).category(), LodCategory::Memory);
        assert_eq!(
            LodResolution::new(2e15).category(),
            LodCategory::LandContact
        );
        assert_eq!(LodResolution::new(3e15).category(), LodCategory::Roadway);
        assert_eq!(LodResolution::new(4e15).category(), LodCategory::Paths);
        assert_eq!(LodResolution::new(5e15).category(), LodCategory::HitPoints);
        assert_eq!(
            LodResolution::new(6e15).category(),
            LodCategory::ViewGeometry
        );
        assert_eq!(
            LodResolution::new(7e15).category(),
            LodCategory::FireGeometry
        );
        assert_eq!(LodResolution::new(8.8e15).category(), LodCategory::Unknown);
    }

    #[test]
    fn test_geometry_helpers() {
        assert!(LodResolution::new(1e13).is_geometry());
        assert!(!LodResolution::new(1e15).is_geometry());
        assert!(LodResolution::new(0.0).is_visual());
        assert!(LodResolution::new(900.0).is_visual());
        assert!(!LodResolution::new(1e3).is_visual());
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(LodResolution::new(1.0).to_string(), "Resolution 1");
        assert_eq!(LodResolution::new(1e3).to_string(), "View Gunner");
        assert_eq!(LodResolution::new(10000.0).to_string(), "ShadowVolume 0");
        assert_eq!(LodResolution::new(1e13).to_string(), "Geometry");
        assert_eq!(LodResolution::new(5e15).to_string(), "HitPoints");
    }
}
