//! Attribute identifiers and the name <-> id registries.
//!
//! Setters are keyed by a numeric [`AttributeId`]; the symbolic names are only
//! used for attribute-presence listing, spline lookup and diagnostics. Ids are
//! grouped in two namespaces that mirror the two keyframe kinds:
//! - attribute ids (`3xx`) for [`crate::AttributeKeyframe`]
//! - position ids (`5xx`) for [`crate::PositionKeyframe`]
//!
//! plus the shared keyframe ids (`1xx`) understood by every kind.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct AttributeId(pub u16);

impl AttributeId {
    pub const FRAME_POSITION: AttributeId = AttributeId(100);
    pub const TARGET: AttributeId = AttributeId(101);

    pub const CURVE_FIT: AttributeId = AttributeId(301);
    pub const VISIBILITY: AttributeId = AttributeId(302);
    pub const ALPHA: AttributeId = AttributeId(303);
    pub const TRANSLATION_X: AttributeId = AttributeId(304);
    pub const TRANSLATION_Y: AttributeId = AttributeId(305);
    pub const TRANSLATION_Z: AttributeId = AttributeId(306);
    pub const ELEVATION: AttributeId = AttributeId(307);
    pub const ROTATION_X: AttributeId = AttributeId(308);
    pub const ROTATION_Y: AttributeId = AttributeId(309);
    pub const ROTATION_Z: AttributeId = AttributeId(310);
    pub const SCALE_X: AttributeId = AttributeId(311);
    pub const SCALE_Y: AttributeId = AttributeId(312);
    pub const PIVOT_X: AttributeId = AttributeId(313);
    pub const PIVOT_Y: AttributeId = AttributeId(314);
    pub const PROGRESS: AttributeId = AttributeId(315);
    pub const PATH_ROTATE: AttributeId = AttributeId(316);
    pub const EASING: AttributeId = AttributeId(317);
    pub const PIVOT_TARGET: AttributeId = AttributeId(318);

    pub const TRANSITION_EASING: AttributeId = AttributeId(501);
    pub const DRAW_PATH: AttributeId = AttributeId(502);
    pub const PERCENT_WIDTH: AttributeId = AttributeId(503);
    pub const PERCENT_HEIGHT: AttributeId = AttributeId(504);
    pub const SIZE_PERCENT: AttributeId = AttributeId(505);
    pub const PERCENT_X: AttributeId = AttributeId(506);
    pub const PERCENT_Y: AttributeId = AttributeId(507);
    pub const POSITION_CURVE_FIT: AttributeId = AttributeId(508);
    pub const PATH_MOTION_ARC: AttributeId = AttributeId(509);
    pub const POSITION_TYPE: AttributeId = AttributeId(510);
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Prefix of custom-variable attribute names (`"CUSTOM,<variable>"`).
pub const CUSTOM_PREFIX: &str = "CUSTOM";

/// Attribute name under which a custom variable is listed and looked up.
pub fn custom_attribute_name(variable: &str) -> String {
    format!("{CUSTOM_PREFIX},{variable}")
}

/// Split `"CUSTOM,<variable>"` into the variable name.
pub fn custom_variable_name(attribute: &str) -> Option<&str> {
    attribute
        .strip_prefix(CUSTOM_PREFIX)
        .and_then(|rest| rest.strip_prefix(','))
}

/// The fixed scalar slots of an attribute keyframe, in enumeration order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ScalarSlot {
    Alpha,
    Elevation,
    RotationZ,
    RotationX,
    RotationY,
    PivotX,
    PivotY,
    TranslationX,
    TranslationY,
    TranslationZ,
    PathRotate,
    ScaleX,
    ScaleY,
    Progress,
}

impl ScalarSlot {
    /// Listing order used by attribute-presence queries and curve-fit maps.
    pub const ALL: [ScalarSlot; 14] = [
        ScalarSlot::Alpha,
        ScalarSlot::Elevation,
        ScalarSlot::RotationZ,
        ScalarSlot::RotationX,
        ScalarSlot::RotationY,
        ScalarSlot::PivotX,
        ScalarSlot::PivotY,
        ScalarSlot::TranslationX,
        ScalarSlot::TranslationY,
        ScalarSlot::TranslationZ,
        ScalarSlot::PathRotate,
        ScalarSlot::ScaleX,
        ScalarSlot::ScaleY,
        ScalarSlot::Progress,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScalarSlot::Alpha => "ALPHA",
            ScalarSlot::Elevation => "ELEVATION",
            ScalarSlot::RotationZ => "ROTATION_Z",
            ScalarSlot::RotationX => "ROTATION_X",
            ScalarSlot::RotationY => "ROTATION_Y",
            ScalarSlot::PivotX => "PIVOT_X",
            ScalarSlot::PivotY => "PIVOT_Y",
            ScalarSlot::TranslationX => "TRANSLATION_X",
            ScalarSlot::TranslationY => "TRANSLATION_Y",
            ScalarSlot::TranslationZ => "TRANSLATION_Z",
            ScalarSlot::PathRotate => "PATH_ROTATE",
            ScalarSlot::ScaleX => "SCALE_X",
            ScalarSlot::ScaleY => "SCALE_Y",
            ScalarSlot::Progress => "PROGRESS",
        }
    }

    pub fn id(self) -> AttributeId {
        match self {
            ScalarSlot::Alpha => AttributeId::ALPHA,
            ScalarSlot::Elevation => AttributeId::ELEVATION,
            ScalarSlot::RotationZ => AttributeId::ROTATION_Z,
            ScalarSlot::RotationX => AttributeId::ROTATION_X,
            ScalarSlot::RotationY => AttributeId::ROTATION_Y,
            ScalarSlot::PivotX => AttributeId::PIVOT_X,
            ScalarSlot::PivotY => AttributeId::PIVOT_Y,
            ScalarSlot::TranslationX => AttributeId::TRANSLATION_X,
            ScalarSlot::TranslationY => AttributeId::TRANSLATION_Y,
            ScalarSlot::TranslationZ => AttributeId::TRANSLATION_Z,
            ScalarSlot::PathRotate => AttributeId::PATH_ROTATE,
            ScalarSlot::ScaleX => AttributeId::SCALE_X,
            ScalarSlot::ScaleY => AttributeId::SCALE_Y,
            ScalarSlot::Progress => AttributeId::PROGRESS,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.name() == name)
    }

    pub fn from_id(id: AttributeId) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.id() == id)
    }
}

/// Maps symbolic attribute names to numeric ids and back.
pub trait AttributeRegistry {
    fn id_of(&self, name: &str) -> Option<AttributeId>;
    fn name_of(&self, id: AttributeId) -> Option<&'static str>;
}

const KEYFRAME_NAMES: [(&str, AttributeId); 2] = [
    ("frame", AttributeId::FRAME_POSITION),
    ("target", AttributeId::TARGET),
];

const ATTRIBUTE_EXTRA_NAMES: [(&str, AttributeId); 4] = [
    ("curveFit", AttributeId::CURVE_FIT),
    ("visibility", AttributeId::VISIBILITY),
    ("easing", AttributeId::EASING),
    ("pivotTarget", AttributeId::PIVOT_TARGET),
];

const POSITION_NAMES: [(&str, AttributeId); 10] = [
    ("transitionEasing", AttributeId::TRANSITION_EASING),
    ("drawPath", AttributeId::DRAW_PATH),
    ("percentWidth", AttributeId::PERCENT_WIDTH),
    ("percentHeight", AttributeId::PERCENT_HEIGHT),
    ("sizePercent", AttributeId::SIZE_PERCENT),
    ("percentX", AttributeId::PERCENT_X),
    ("percentY", AttributeId::PERCENT_Y),
    ("curveFit", AttributeId::POSITION_CURVE_FIT),
    ("pathMotionArc", AttributeId::PATH_MOTION_ARC),
    ("positionType", AttributeId::POSITION_TYPE),
];

fn lookup_id(table: &[(&'static str, AttributeId)], name: &str) -> Option<AttributeId> {
    table.iter().find(|(n, _)| *n == name).map(|(_, id)| *id)
}

fn lookup_name(table: &[(&'static str, AttributeId)], id: AttributeId) -> Option<&'static str> {
    table.iter().find(|(_, i)| *i == id).map(|(n, _)| *n)
}

/// Registry for the attribute-keyframe namespace (scalar slots and their
/// keyframe-level companions).
#[derive(Copy, Clone, Debug, Default)]
pub struct AttributeNames;

impl AttributeRegistry for AttributeNames {
    fn id_of(&self, name: &str) -> Option<AttributeId> {
        ScalarSlot::from_name(name)
            .map(ScalarSlot::id)
            .or_else(|| lookup_id(&ATTRIBUTE_EXTRA_NAMES, name))
            .or_else(|| lookup_id(&KEYFRAME_NAMES, name))
    }

    fn name_of(&self, id: AttributeId) -> Option<&'static str> {
        ScalarSlot::from_id(id)
            .map(ScalarSlot::name)
            .or_else(|| lookup_name(&ATTRIBUTE_EXTRA_NAMES, id))
            .or_else(|| lookup_name(&KEYFRAME_NAMES, id))
    }
}

/// Registry for the position-keyframe namespace.
#[derive(Copy, Clone, Debug, Default)]
pub struct PositionNames;

impl AttributeRegistry for PositionNames {
    fn id_of(&self, name: &str) -> Option<AttributeId> {
        lookup_id(&POSITION_NAMES, name).or_else(|| lookup_id(&KEYFRAME_NAMES, name))
    }

    fn name_of(&self, id: AttributeId) -> Option<&'static str> {
        lookup_name(&POSITION_NAMES, id).or_else(|| lookup_name(&KEYFRAME_NAMES, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_names_round_trip_through_registry() {
        let registry = AttributeNames;
        for slot in ScalarSlot::ALL {
            assert_eq!(registry.id_of(slot.name()), Some(slot.id()));
            assert_eq!(registry.name_of(slot.id()), Some(slot.name()));
        }
    }

    #[test]
    fn curve_fit_name_is_namespaced() {
        assert_eq!(AttributeNames.id_of("curveFit"), Some(AttributeId::CURVE_FIT));
        assert_eq!(
            PositionNames.id_of("curveFit"),
            Some(AttributeId::POSITION_CURVE_FIT)
        );
        assert_eq!(PositionNames.id_of("ALPHA"), None);
    }

    #[test]
    fn custom_names() {
        assert_eq!(custom_attribute_name("foo"), "CUSTOM,foo");
        assert_eq!(custom_variable_name("CUSTOM,foo"), Some("foo"));
        assert_eq!(custom_variable_name("CUSTOMfoo"), None);
        assert_eq!(custom_variable_name("ALPHA"), None);
    }
}
