//! Typed values carried by keyframes: custom variables and curve-fit modes.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CustomKind {
    Int,
    Float,
    Color,
    Boolean,
    Dimension,
}

/// Payload of a custom variable. Colors interpolate per channel; every other
/// kind reduces to one scalar.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum CustomValue {
    Int(i32),
    Float(f32),
    /// Packed ARGB color
    Color(u32),
    Boolean(bool),
    Dimension(f32),
}

impl CustomValue {
    #[inline]
    pub fn kind(&self) -> CustomKind {
        match self {
            CustomValue::Int(_) => CustomKind::Int,
            CustomValue::Float(_) => CustomKind::Float,
            CustomValue::Color(_) => CustomKind::Color,
            CustomValue::Boolean(_) => CustomKind::Boolean,
            CustomValue::Dimension(_) => CustomKind::Dimension,
        }
    }

    /// `[a, r, g, b]` of a color value.
    pub fn color_channels(&self) -> Option<[u8; 4]> {
        match *self {
            CustomValue::Color(argb) => Some(argb.to_be_bytes()),
            _ => None,
        }
    }
}

impl std::fmt::Display for CustomValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CustomValue::Int(v) => write!(f, "{v}"),
            CustomValue::Float(v) | CustomValue::Dimension(v) => write!(f, "{v}"),
            CustomValue::Color(argb) => write!(f, "#{argb:08x}"),
            CustomValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// A named custom attribute attached to a keyframe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CustomVariable {
    pub name: String,
    pub value: CustomValue,
}

impl CustomVariable {
    pub fn new(name: impl Into<String>, value: CustomValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    #[inline]
    pub fn kind(&self) -> CustomKind {
        self.value.kind()
    }

    /// Scalar fed to a spline, or `None` for colors: a packed ARGB value does
    /// not fit an `f32` mantissa, use [`CustomVariable::values_to_interpolate`].
    pub fn value_to_interpolate(&self) -> Option<f32> {
        match self.value {
            CustomValue::Int(v) => Some(v as f32),
            CustomValue::Float(v) | CustomValue::Dimension(v) => Some(v),
            CustomValue::Color(_) => None,
            CustomValue::Boolean(b) => Some(if b { 1.0 } else { 0.0 }),
        }
    }

    /// Interpolation channels: `[a, r, g, b]` in `0..=255` for colors, one
    /// scalar otherwise. Every channel is exact in `f32`.
    pub fn values_to_interpolate(&self) -> Vec<f32> {
        match self.value.color_channels() {
            Some(channels) => channels.iter().map(|&c| f32::from(c)).collect(),
            None => self.value_to_interpolate().into_iter().collect(),
        }
    }
}

/// Interpolation family applied between samples of one attribute.
/// Unset is modelled as `Option::<CurveFit>::None` ("use the global default").
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurveFit(pub i32);

impl CurveFit {
    pub const SPLINE: CurveFit = CurveFit(0);
    pub const LINEAR: CurveFit = CurveFit(1);

    /// Integer setters use -1 for "unset".
    pub fn from_raw(raw: i32) -> Option<CurveFit> {
        (raw >= 0).then_some(CurveFit(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolated_scalars() {
        assert_eq!(
            CustomVariable::new("a", CustomValue::Int(3)).value_to_interpolate(),
            Some(3.0)
        );
        assert_eq!(
            CustomVariable::new("b", CustomValue::Boolean(true)).value_to_interpolate(),
            Some(1.0)
        );
        assert_eq!(
            CustomVariable::new("c", CustomValue::Dimension(2.5)).kind(),
            CustomKind::Dimension
        );
    }

    #[test]
    fn colors_interpolate_per_channel() {
        let near = CustomVariable::new("tint", CustomValue::Color(0xff00_ff00));
        let far = CustomVariable::new("tint", CustomValue::Color(0xff00_ff01));
        assert_eq!(near.value_to_interpolate(), None);
        assert_eq!(near.values_to_interpolate(), vec![255.0, 0.0, 255.0, 0.0]);
        assert_eq!(far.values_to_interpolate(), vec![255.0, 0.0, 255.0, 1.0]);
        assert_eq!(far.value.to_string(), "#ff00ff01");
        assert_eq!(
            CustomVariable::new("w", CustomValue::Dimension(4.0)).values_to_interpolate(),
            vec![4.0]
        );
    }

    #[test]
    fn curve_fit_raw_sentinel() {
        assert_eq!(CurveFit::from_raw(-1), None);
        assert_eq!(CurveFit::from_raw(1), Some(CurveFit::LINEAR));
    }

    #[test]
    fn custom_value_json_shape() {
        let json = serde_json::to_value(CustomValue::Float(0.5)).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "float", "data": 0.5 }));
    }
}
