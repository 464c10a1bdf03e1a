//! Spline sinks: the per-attribute accumulators keyframes push samples into.
//!
//! The curve evaluation itself lives downstream; this module only defines the
//! contract plus [`KeySpline`], a recording sink drivers can hand to keyframes
//! and evaluate later with their own curve fitting.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::value::{CustomKind, CustomValue, CustomVariable};

/// Receives ordered `(frame_position, value)` samples for one attribute.
pub trait SplineSink {
    fn set_point(&mut self, frame_position: i32, value: f32);

    /// Custom-variable sinks return themselves here; scalar sinks do not.
    fn as_custom(&mut self) -> Option<&mut dyn CustomSplineSink> {
        None
    }
}

/// Sink variant for custom variables; knows the declared variable type.
pub trait CustomSplineSink {
    fn declared_kind(&self) -> CustomKind;
    fn set_custom_point(&mut self, frame_position: i32, variable: &CustomVariable);
}

impl<T: SplineSink + ?Sized> SplineSink for Box<T> {
    fn set_point(&mut self, frame_position: i32, value: f32) {
        (**self).set_point(frame_position, value)
    }

    fn as_custom(&mut self) -> Option<&mut dyn CustomSplineSink> {
        (**self).as_custom()
    }
}

/// Attribute name -> sink. `None` entries mean nobody listens to that name.
pub type SplineMap<S> = HashMap<String, Option<S>>;

/// Attribute name -> curve fit (`None` = global default).
pub type InterpolationMap = HashMap<String, Option<crate::value::CurveFit>>;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SplinePoint {
    pub frame: i32,
    pub value: f32,
}

/// Exact custom-variable sample; colors keep their packed value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomSplinePoint {
    pub frame: i32,
    pub value: CustomValue,
}

/// Recording sink. Points are kept in push order; [`KeySpline::sorted_points`]
/// orders them by frame for curve fitting.
///
/// Custom splines record every variable in `custom_points`, and additionally
/// in `points` when the variable reduces to one scalar (everything but colors).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeySpline {
    /// `Some` for custom-variable splines.
    pub custom_kind: Option<CustomKind>,
    pub points: Vec<SplinePoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_points: Vec<CustomSplinePoint>,
}

impl KeySpline {
    pub fn scalar() -> Self {
        Self::default()
    }

    pub fn custom(kind: CustomKind) -> Self {
        Self {
            custom_kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.custom_points.is_empty()
    }

    pub fn sorted_points(&self) -> Vec<SplinePoint> {
        let mut pts = self.points.clone();
        pts.sort_by_key(|p| p.frame);
        pts
    }
}

impl SplineSink for KeySpline {
    fn set_point(&mut self, frame_position: i32, value: f32) {
        self.points.push(SplinePoint {
            frame: frame_position,
            value,
        });
    }

    fn as_custom(&mut self) -> Option<&mut dyn CustomSplineSink> {
        if self.custom_kind.is_some() {
            Some(self)
        } else {
            None
        }
    }
}

impl CustomSplineSink for KeySpline {
    fn declared_kind(&self) -> CustomKind {
        self.custom_kind.unwrap_or(CustomKind::Float)
    }

    fn set_custom_point(&mut self, frame_position: i32, variable: &CustomVariable) {
        self.custom_points.push(CustomSplinePoint {
            frame: frame_position,
            value: variable.value,
        });
        if let Some(value) = variable.value_to_interpolate() {
            self.points.push(SplinePoint {
                frame: frame_position,
                value,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CustomValue;

    #[test]
    fn scalar_spline_is_not_custom() {
        let mut s = KeySpline::scalar();
        assert!(s.as_custom().is_none());
        s.set_point(50, 1.0);
        s.set_point(10, 0.5);
        let sorted = s.sorted_points();
        assert_eq!(sorted[0].frame, 10);
        assert_eq!(sorted[1].frame, 50);
    }

    #[test]
    fn custom_spline_records_scalar_of_variable() {
        let mut s = KeySpline::custom(CustomKind::Int);
        let var = CustomVariable::new("count", CustomValue::Int(4));
        let custom = s.as_custom().expect("custom sink");
        assert_eq!(custom.declared_kind(), CustomKind::Int);
        custom.set_custom_point(20, &var);
        assert_eq!(s.points, vec![SplinePoint { frame: 20, value: 4.0 }]);
        assert_eq!(s.custom_points[0].value, CustomValue::Int(4));
    }

    #[test]
    fn color_points_keep_every_bit() {
        let mut s = KeySpline::custom(CustomKind::Color);
        let custom = s.as_custom().expect("custom sink");
        custom.set_custom_point(0, &CustomVariable::new("tint", CustomValue::Color(0xff00_ff00)));
        custom.set_custom_point(10, &CustomVariable::new("tint", CustomValue::Color(0xff00_ff01)));
        assert!(s.points.is_empty());
        assert!(!s.is_empty());
        let colors: Vec<CustomValue> = s.custom_points.iter().map(|p| p.value).collect();
        assert_eq!(
            colors,
            vec![CustomValue::Color(0xff00_ff00), CustomValue::Color(0xff00_ff01)]
        );
    }

    #[test]
    fn boxed_sinks_forward() {
        let mut boxed: Box<dyn SplineSink> = Box::new(KeySpline::custom(CustomKind::Float));
        assert!(boxed.as_custom().is_some());
        boxed.set_point(0, 1.0);
    }
}
