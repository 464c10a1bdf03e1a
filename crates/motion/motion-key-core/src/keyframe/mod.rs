//! Keyframe data model.
//!
//! A keyframe is an authored point on a transition timeline. Every kind shares
//! a [`KeyframeBase`] (frame position, target, curve fit, easing) and answers
//! the [`MotionKey`] capability set; [`Keyframe`] is the closed set of kinds a
//! driver stores per animated target.

pub mod attributes;
pub mod position;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;
use crate::error::{KeyError, KeyResult};
use crate::ids::AttributeId;
use crate::spline::{InterpolationMap, SplineMap, SplineSink};
use crate::value::CurveFit;

pub use attributes::AttributeKeyframe;
pub use position::{PercentAxis, PositionAttributes, PositionKeyframe, PositionModel};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyframeKind {
    Attributes,
    Position,
}

/// Fields shared by every keyframe kind.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyframeBase {
    /// Position on the transition timeline (typically 0..=100).
    #[serde(rename = "frame")]
    pub frame_position: i32,
    /// Identifier of the animated entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve_fit: Option<CurveFit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
}

impl KeyframeBase {
    pub fn new(frame_position: i32) -> Self {
        Self {
            frame_position,
            ..Self::default()
        }
    }

    /// Fallback for integer setters: only the frame position is shared.
    pub fn set_int(&mut self, kind: KeyframeKind, id: AttributeId, value: i32) -> KeyResult<()> {
        match id {
            AttributeId::FRAME_POSITION => self.frame_position = value,
            _ => return Err(KeyError::UnsupportedAttribute { id, kind }),
        }
        Ok(())
    }

    /// Fallback for float setters. Frame positions are whole frames; the
    /// fractional part is dropped.
    pub fn set_float(&mut self, kind: KeyframeKind, id: AttributeId, value: f32) -> KeyResult<()> {
        match id {
            AttributeId::FRAME_POSITION => self.frame_position = frame_from_float(id, value)?,
            _ => return Err(KeyError::UnsupportedAttribute { id, kind }),
        }
        Ok(())
    }

    pub fn set_string(
        &mut self,
        kind: KeyframeKind,
        id: AttributeId,
        value: &str,
    ) -> KeyResult<()> {
        match id {
            AttributeId::TARGET => self.target = Some(value.to_string()),
            _ => return Err(KeyError::UnsupportedAttribute { id, kind }),
        }
        Ok(())
    }
}

/// Capabilities every keyframe kind provides to the timeline driver.
pub trait MotionKey {
    fn kind(&self) -> KeyframeKind;
    fn base(&self) -> &KeyframeBase;
    fn base_mut(&mut self) -> &mut KeyframeBase;

    fn frame_position(&self) -> i32 {
        self.base().frame_position
    }

    fn curve_fit(&self) -> Option<CurveFit> {
        self.base().curve_fit
    }

    /// Add the name of every attribute this keyframe carries a value for.
    fn attribute_names(&self, attributes: &mut IndexSet<String>);

    /// Push this keyframe's samples into the sinks registered under the
    /// attribute names it carries.
    fn add_values<S: SplineSink>(
        &self,
        splines: &mut SplineMap<S>,
        diagnostics: &mut dyn Diagnostics,
    );

    /// Record this keyframe's curve fit under every attribute it carries.
    fn set_interpolation(&self, _interpolation: &mut InterpolationMap) {}

    fn set_int(&mut self, id: AttributeId, value: i32) -> KeyResult<()>;
    fn set_float(&mut self, id: AttributeId, value: f32) -> KeyResult<()>;
    fn set_string(&mut self, id: AttributeId, value: &str) -> KeyResult<()>;

    /// Resolve a name in this kind's attribute namespace.
    fn id_of(&self, name: &str) -> Option<AttributeId>;
}

/// Truncates toward zero; NaN, infinities and values outside `i32` are rejected.
fn frame_from_float(id: AttributeId, value: f32) -> KeyResult<i32> {
    if value.is_finite() && value >= i32::MIN as f32 && value < i32::MAX as f32 {
        Ok(value as i32)
    } else {
        Err(KeyError::InvalidValue { id, value })
    }
}

/// Closed set of keyframe kinds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Keyframe {
    Attributes(AttributeKeyframe),
    Position(PositionKeyframe),
}

impl Keyframe {
    /// Field-wise copy from a keyframe of the same kind.
    pub fn copy_from(&mut self, src: &Keyframe) -> KeyResult<()> {
        match (self, src) {
            (Keyframe::Attributes(dst), Keyframe::Attributes(s)) => dst.copy_from(s),
            (Keyframe::Position(dst), Keyframe::Position(s)) => dst.copy_from(s),
            (dst, s) => {
                return Err(KeyError::KindMismatch {
                    expected: dst.kind(),
                    actual: s.kind(),
                })
            }
        }
        Ok(())
    }

    pub fn as_attributes(&self) -> Option<&AttributeKeyframe> {
        match self {
            Keyframe::Attributes(k) => Some(k),
            Keyframe::Position(_) => None,
        }
    }

    pub fn as_position(&self) -> Option<&PositionKeyframe> {
        match self {
            Keyframe::Position(k) => Some(k),
            Keyframe::Attributes(_) => None,
        }
    }

    pub fn as_position_mut(&mut self) -> Option<&mut PositionKeyframe> {
        match self {
            Keyframe::Position(k) => Some(k),
            Keyframe::Attributes(_) => None,
        }
    }
}

impl From<AttributeKeyframe> for Keyframe {
    fn from(k: AttributeKeyframe) -> Self {
        Keyframe::Attributes(k)
    }
}

impl From<PositionKeyframe> for Keyframe {
    fn from(k: PositionKeyframe) -> Self {
        Keyframe::Position(k)
    }
}

impl MotionKey for Keyframe {
    fn kind(&self) -> KeyframeKind {
        match self {
            Keyframe::Attributes(_) => KeyframeKind::Attributes,
            Keyframe::Position(_) => KeyframeKind::Position,
        }
    }

    fn base(&self) -> &KeyframeBase {
        match self {
            Keyframe::Attributes(k) => k.base(),
            Keyframe::Position(k) => k.base(),
        }
    }

    fn base_mut(&mut self) -> &mut KeyframeBase {
        match self {
            Keyframe::Attributes(k) => k.base_mut(),
            Keyframe::Position(k) => k.base_mut(),
        }
    }

    fn attribute_names(&self, attributes: &mut IndexSet<String>) {
        match self {
            Keyframe::Attributes(k) => k.attribute_names(attributes),
            Keyframe::Position(k) => k.attribute_names(attributes),
        }
    }

    fn add_values<S: SplineSink>(
        &self,
        splines: &mut SplineMap<S>,
        diagnostics: &mut dyn Diagnostics,
    ) {
        match self {
            Keyframe::Attributes(k) => k.add_values(splines, diagnostics),
            Keyframe::Position(k) => k.add_values(splines, diagnostics),
        }
    }

    fn set_interpolation(&self, interpolation: &mut InterpolationMap) {
        match self {
            Keyframe::Attributes(k) => k.set_interpolation(interpolation),
            Keyframe::Position(k) => k.set_interpolation(interpolation),
        }
    }

    fn set_int(&mut self, id: AttributeId, value: i32) -> KeyResult<()> {
        match self {
            Keyframe::Attributes(k) => k.set_int(id, value),
            Keyframe::Position(k) => k.set_int(id, value),
        }
    }

    fn set_float(&mut self, id: AttributeId, value: f32) -> KeyResult<()> {
        match self {
            Keyframe::Attributes(k) => k.set_float(id, value),
            Keyframe::Position(k) => k.set_float(id, value),
        }
    }

    fn set_string(&mut self, id: AttributeId, value: &str) -> KeyResult<()> {
        match self {
            Keyframe::Attributes(k) => k.set_string(id, value),
            Keyframe::Position(k) => k.set_string(id, value),
        }
    }

    fn id_of(&self, name: &str) -> Option<AttributeId> {
        match self {
            Keyframe::Attributes(k) => k.id_of(name),
            Keyframe::Position(k) => k.id_of(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_recognizes_only_shared_ids() {
        let mut base = KeyframeBase::new(0);
        assert!(base
            .set_int(KeyframeKind::Attributes, AttributeId::FRAME_POSITION, 40)
            .is_ok());
        assert_eq!(base.frame_position, 40);
        assert!(base
            .set_string(KeyframeKind::Attributes, AttributeId::TARGET, "button")
            .is_ok());
        assert_eq!(base.target.as_deref(), Some("button"));
        assert_eq!(
            base.set_int(KeyframeKind::Position, AttributeId::ALPHA, 1),
            Err(KeyError::UnsupportedAttribute {
                id: AttributeId::ALPHA,
                kind: KeyframeKind::Position
            })
        );
    }

    #[test]
    fn float_frame_position_rejects_non_finite_values() {
        let mut base = KeyframeBase::new(12);
        for value in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, 3.0e9, -3.0e9] {
            let err = base
                .set_float(KeyframeKind::Attributes, AttributeId::FRAME_POSITION, value)
                .unwrap_err();
            assert!(
                matches!(
                    err,
                    KeyError::InvalidValue { id, .. } if id == AttributeId::FRAME_POSITION
                ),
                "{value}"
            );
            assert_eq!(base.frame_position, 12);
        }
        base.set_float(KeyframeKind::Attributes, AttributeId::FRAME_POSITION, -7.8)
            .unwrap();
        assert_eq!(base.frame_position, -7);
    }

    #[test]
    fn copy_between_kinds_is_rejected() {
        let mut dst = Keyframe::from(AttributeKeyframe::new(10));
        let src = Keyframe::from(PositionKeyframe::new(20));
        let err = dst.copy_from(&src).unwrap_err();
        assert_eq!(
            err,
            KeyError::KindMismatch {
                expected: KeyframeKind::Attributes,
                actual: KeyframeKind::Position
            }
        );
        assert_eq!(dst.frame_position(), 10);
    }

    #[test]
    fn kind_is_fixed_by_variant() {
        let k = Keyframe::from(PositionKeyframe::new(5));
        assert_eq!(k.kind(), KeyframeKind::Position);
        assert!(k.as_attributes().is_none());
        assert!(k.as_position().is_some());
    }
}
