//! Position keyframes: a 2D waypoint for the animated target.
//!
//! The waypoint is stored as normalized offsets whose meaning depends on the
//! [`PositionModel`]; absolute coordinates only exist transiently (and in the
//! `calculated` cache) after a [`crate::PositionResolver`] call.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;
use crate::error::KeyResult;
use crate::geometry::{ContainerSize, FloatRect, LayoutContainer};
use crate::ids::{AttributeId, AttributeRegistry, PositionNames};
use crate::keyframe::{KeyframeBase, KeyframeKind, MotionKey};
use crate::resolver::PositionResolver;
use crate::spline::{SplineMap, SplineSink};
use crate::value::CurveFit;

/// Coordinate model for interpreting `percent_x` / `percent_y`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionModel {
    /// Offsets along the start -> end center vector, per axis.
    #[default]
    Cartesian,
    /// Offsets along and perpendicular to the start -> end path.
    Path,
    /// Fractions of the container size.
    Screen,
}

impl PositionModel {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(PositionModel::Cartesian),
            1 => Some(PositionModel::Path),
            2 => Some(PositionModel::Screen),
            _ => None,
        }
    }

    pub fn raw(self) -> i32 {
        match self {
            PositionModel::Cartesian => 0,
            PositionModel::Path => 1,
            PositionModel::Screen => 2,
        }
    }
}

/// Normalized axis names an inverse conversion can write to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PercentAxis {
    PercentX,
    PercentY,
}

impl PercentAxis {
    pub fn name(self) -> &'static str {
        match self {
            PercentAxis::PercentX => "percentX",
            PercentAxis::PercentY => "percentY",
        }
    }

    pub fn id(self) -> AttributeId {
        match self {
            PercentAxis::PercentX => AttributeId::PERCENT_X,
            PercentAxis::PercentY => AttributeId::PERCENT_Y,
        }
    }
}

/// Result of an inverse conversion: two axis names and their values, ordered
/// so that `axes[0]` is the axis the caller asked for first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PositionAttributes {
    pub axes: [PercentAxis; 2],
    pub values: [f32; 2],
}

impl PositionAttributes {
    /// Order `(x_ratio, y_ratio)` by the caller's hint; `None` means x first.
    pub(crate) fn ordered(hint: Option<PercentAxis>, x_ratio: f32, y_ratio: f32) -> Self {
        match hint {
            Some(PercentAxis::PercentY) => Self {
                axes: [PercentAxis::PercentY, PercentAxis::PercentX],
                values: [y_ratio, x_ratio],
            },
            Some(PercentAxis::PercentX) | None => Self {
                axes: [PercentAxis::PercentX, PercentAxis::PercentY],
                values: [x_ratio, y_ratio],
            },
        }
    }

    pub fn get(&self, axis: PercentAxis) -> f32 {
        if self.axes[0] == axis {
            self.values[0]
        } else {
            self.values[1]
        }
    }

    /// Write the values back into a keyframe through its float setter.
    pub fn apply_to(&self, key: &mut PositionKeyframe) -> KeyResult<()> {
        for (axis, value) in self.axes.iter().zip(self.values) {
            key.set_float(axis.id(), value)?;
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionKeyframe {
    #[serde(flatten)]
    pub base: KeyframeBase,
    #[serde(default)]
    pub position_model: PositionModel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_motion_arc: Option<i32>,
    #[serde(default)]
    pub draw_path: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_y: Option<f32>,
    /// Cross-axis term: x contribution of the vector's y component (Cartesian only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_percent_x: Option<f32>,
    /// Cross-axis term: y contribution of the vector's x component (Cartesian only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_percent_y: Option<f32>,
    #[serde(skip)]
    calculated: Option<(f32, f32)>,
}

impl Default for PositionKeyframe {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Clones go through [`PositionKeyframe::copy_from`], so `percent_height`
/// is not carried over.
impl Clone for PositionKeyframe {
    fn clone(&self) -> Self {
        let mut key = PositionKeyframe::new(self.base.frame_position);
        key.copy_from(self);
        key
    }
}

impl PositionKeyframe {
    pub fn new(frame_position: i32) -> Self {
        Self {
            base: KeyframeBase::new(frame_position),
            position_model: PositionModel::Cartesian,
            path_motion_arc: None,
            draw_path: 0,
            percent_width: None,
            percent_height: None,
            percent_x: None,
            percent_y: None,
            alt_percent_x: None,
            alt_percent_y: None,
            calculated: None,
        }
    }

    pub fn with_model(mut self, model: PositionModel) -> Self {
        self.position_model = model;
        self
    }

    pub fn with_percent(mut self, x: f32, y: f32) -> Self {
        self.percent_x = Some(x);
        self.percent_y = Some(y);
        self
    }

    /// Absolute position from the last resolution, if any.
    pub fn position(&self) -> Option<(f32, f32)> {
        self.calculated
    }

    pub(crate) fn set_calculated(&mut self, x: f32, y: f32) {
        self.calculated = Some((x, y));
    }

    /// Field-wise copy from `src`. `percent_height` is reset to unset rather
    /// than copied; the cached position is copied.
    pub fn copy_from(&mut self, src: &PositionKeyframe) {
        self.base.clone_from(&src.base);
        self.position_model = src.position_model;
        self.path_motion_arc = src.path_motion_arc;
        self.draw_path = src.draw_path;
        self.percent_width = src.percent_width;
        self.percent_height = None;
        self.percent_x = src.percent_x;
        self.percent_y = src.percent_y;
        self.alt_percent_x = src.alt_percent_x;
        self.alt_percent_y = src.alt_percent_y;
        self.calculated = src.calculated;
    }

    /// Resolve and cache the absolute position from box centers.
    pub fn calc_position(
        &mut self,
        layout_width: i32,
        layout_height: i32,
        start: (f32, f32),
        end: (f32, f32),
    ) -> (f32, f32) {
        PositionResolver::default().calc_position(
            self,
            &ContainerSize::new(layout_width, layout_height),
            start,
            end,
        )
    }

    /// Convert a pointer location into normalized offsets for this model.
    #[allow(clippy::too_many_arguments)]
    pub fn position_attributes(
        &self,
        container: &dyn LayoutContainer,
        start: &FloatRect,
        end: &FloatRect,
        x: f32,
        y: f32,
        hint: Option<PercentAxis>,
        diagnostics: &mut dyn Diagnostics,
    ) -> KeyResult<PositionAttributes> {
        PositionResolver::default()
            .position_attributes(self, container, start, end, x, y, hint, diagnostics)
    }

    /// Hit test with the default selection slope.
    #[allow(clippy::too_many_arguments)]
    pub fn intersects(
        &mut self,
        layout_width: i32,
        layout_height: i32,
        start: &FloatRect,
        end: &FloatRect,
        x: f32,
        y: f32,
    ) -> bool {
        PositionResolver::default().intersects(self, layout_width, layout_height, start, end, x, y)
    }
}

impl MotionKey for PositionKeyframe {
    fn kind(&self) -> KeyframeKind {
        KeyframeKind::Position
    }

    fn base(&self) -> &KeyframeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut KeyframeBase {
        &mut self.base
    }

    /// Position keyframes feed the motion path, not attribute splines.
    fn attribute_names(&self, _attributes: &mut IndexSet<String>) {}

    fn add_values<S: SplineSink>(
        &self,
        _splines: &mut SplineMap<S>,
        _diagnostics: &mut dyn Diagnostics,
    ) {
    }

    fn set_int(&mut self, id: AttributeId, value: i32) -> KeyResult<()> {
        match id {
            // Unknown model codes resolve as Cartesian.
            AttributeId::POSITION_TYPE => {
                self.position_model = PositionModel::from_raw(value).unwrap_or_default()
            }
            AttributeId::FRAME_POSITION => self.base.frame_position = value,
            AttributeId::POSITION_CURVE_FIT => self.base.curve_fit = CurveFit::from_raw(value),
            AttributeId::PATH_MOTION_ARC => self.path_motion_arc = (value >= 0).then_some(value),
            AttributeId::DRAW_PATH => self.draw_path = value,
            _ => return self.base.set_int(KeyframeKind::Position, id, value),
        }
        Ok(())
    }

    fn set_float(&mut self, id: AttributeId, value: f32) -> KeyResult<()> {
        match id {
            AttributeId::PERCENT_WIDTH => self.percent_width = Some(value),
            AttributeId::PERCENT_HEIGHT => self.percent_height = Some(value),
            AttributeId::SIZE_PERCENT => {
                self.percent_width = Some(value);
                self.percent_height = Some(value);
            }
            AttributeId::PERCENT_X => self.percent_x = Some(value),
            AttributeId::PERCENT_Y => self.percent_y = Some(value),
            _ => return self.base.set_float(KeyframeKind::Position, id, value),
        }
        Ok(())
    }

    fn set_string(&mut self, id: AttributeId, value: &str) -> KeyResult<()> {
        match id {
            AttributeId::TRANSITION_EASING => self.base.easing = Some(value.to_string()),
            _ => return self.base.set_string(KeyframeKind::Position, id, value),
        }
        Ok(())
    }

    fn id_of(&self, name: &str) -> Option<AttributeId> {
        PositionNames.id_of(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KeyError;

    #[test]
    fn setters_cover_position_ids() {
        let mut key = PositionKeyframe::new(0);
        key.set_int(AttributeId::POSITION_TYPE, 1).unwrap();
        key.set_int(AttributeId::POSITION_CURVE_FIT, 0).unwrap();
        key.set_int(AttributeId::FRAME_POSITION, 30).unwrap();
        key.set_float(AttributeId::PERCENT_X, 0.2).unwrap();
        key.set_float(AttributeId::PERCENT_Y, -0.1).unwrap();
        key.set_string(AttributeId::TRANSITION_EASING, "linear").unwrap();

        assert_eq!(key.position_model, PositionModel::Path);
        assert_eq!(key.curve_fit(), Some(CurveFit::SPLINE));
        assert_eq!(key.frame_position(), 30);
        assert_eq!(key.percent_x, Some(0.2));
        assert_eq!(key.percent_y, Some(-0.1));
        assert_eq!(key.base.easing.as_deref(), Some("linear"));
    }

    #[test]
    fn size_percent_sets_both_extents() {
        let mut key = PositionKeyframe::new(0);
        key.set_float(AttributeId::SIZE_PERCENT, 0.4).unwrap();
        assert_eq!(key.percent_width, Some(0.4));
        assert_eq!(key.percent_height, Some(0.4));
    }

    #[test]
    fn attribute_ids_are_rejected() {
        let mut key = PositionKeyframe::new(0);
        assert_eq!(
            key.set_float(AttributeId::ALPHA, 1.0),
            Err(KeyError::UnsupportedAttribute {
                id: AttributeId::ALPHA,
                kind: KeyframeKind::Position
            })
        );
        assert!(key.set_string(AttributeId::EASING, "x").is_err());
        assert!(key.set_string(AttributeId::TARGET, "view").is_ok());
    }

    #[test]
    fn unknown_model_code_is_cartesian() {
        let mut key = PositionKeyframe::new(0).with_model(PositionModel::Screen);
        key.set_int(AttributeId::POSITION_TYPE, 7).unwrap();
        assert_eq!(key.position_model, PositionModel::Cartesian);
    }

    #[test]
    fn name_lookup_uses_position_namespace() {
        let key = PositionKeyframe::new(0);
        assert_eq!(key.id_of("percentX"), Some(AttributeId::PERCENT_X));
        assert_eq!(key.id_of("curveFit"), Some(AttributeId::POSITION_CURVE_FIT));
        assert_eq!(key.id_of("ALPHA"), None);
    }

    #[test]
    fn hinted_attributes_swap_order() {
        let attrs = PositionAttributes::ordered(Some(PercentAxis::PercentY), 0.1, 0.9);
        assert_eq!(attrs.axes[0], PercentAxis::PercentY);
        assert_eq!(attrs.values[0], 0.9);
        assert_eq!(attrs.get(PercentAxis::PercentX), 0.1);
    }

    #[test]
    fn calculated_position_is_not_serialized() {
        let mut key = PositionKeyframe::new(50).with_percent(0.5, 0.5);
        key.set_calculated(10.0, 20.0);
        let json = serde_json::to_value(&key).unwrap();
        assert!(json.get("calculated").is_none());
        let back: PositionKeyframe = serde_json::from_value(json).unwrap();
        assert_eq!(back.position(), None);
        assert_eq!(back.percent_x, Some(0.5));
    }
}
