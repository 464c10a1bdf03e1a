//! Attribute keyframes: sparse scalar attribute values at one frame position.
//!
//! Each of the fourteen [`ScalarSlot`]s is either unset or holds a value, and
//! any number of named custom variables can ride along. An attribute is
//! "present" exactly when its slot holds a value; the listing, push and
//! curve-fit operations all go through the same presence test.

use indexmap::{IndexMap, IndexSet};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::diagnostics::Diagnostics;
use crate::error::KeyResult;
use crate::ids::{
    custom_attribute_name, custom_variable_name, AttributeId, AttributeNames, AttributeRegistry,
    ScalarSlot,
};
use crate::keyframe::{KeyframeBase, KeyframeKind, MotionKey};
use crate::spline::{InterpolationMap, SplineMap, SplineSink};
use crate::value::{CurveFit, CustomValue, CustomVariable};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeKeyframe {
    #[serde(flatten)]
    pub base: KeyframeBase,
    #[serde(default)]
    pub visibility: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_z: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot_y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation_y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation_z: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_rotate: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f32>,
    /// Custom variables by name, in insertion order. Keys match `CustomVariable::name`.
    #[serde(
        default,
        skip_serializing_if = "IndexMap::is_empty",
        deserialize_with = "custom_by_name"
    )]
    pub custom: IndexMap<String, CustomVariable>,
}

fn custom_by_name<'de, D>(deserializer: D) -> Result<IndexMap<String, CustomVariable>, D::Error>
where
    D: Deserializer<'de>,
{
    let custom = IndexMap::<String, CustomVariable>::deserialize(deserializer)?;
    if let Some((key, variable)) = custom.iter().find(|(key, v)| **key != v.name) {
        return Err(de::Error::custom(format!(
            "custom variable under '{key}' is named '{}'",
            variable.name
        )));
    }
    Ok(custom)
}

impl AttributeKeyframe {
    /// Empty keyframe: every slot unset, no custom variables.
    pub fn new(frame_position: i32) -> Self {
        Self {
            base: KeyframeBase::new(frame_position),
            ..Self::default()
        }
    }

    pub fn slot(&self, slot: ScalarSlot) -> Option<f32> {
        match slot {
            ScalarSlot::Alpha => self.alpha,
            ScalarSlot::Elevation => self.elevation,
            ScalarSlot::RotationZ => self.rotation_z,
            ScalarSlot::RotationX => self.rotation_x,
            ScalarSlot::RotationY => self.rotation_y,
            ScalarSlot::PivotX => self.pivot_x,
            ScalarSlot::PivotY => self.pivot_y,
            ScalarSlot::TranslationX => self.translation_x,
            ScalarSlot::TranslationY => self.translation_y,
            ScalarSlot::TranslationZ => self.translation_z,
            ScalarSlot::PathRotate => self.path_rotate,
            ScalarSlot::ScaleX => self.scale_x,
            ScalarSlot::ScaleY => self.scale_y,
            ScalarSlot::Progress => self.progress,
        }
    }

    fn slot_mut(&mut self, slot: ScalarSlot) -> &mut Option<f32> {
        match slot {
            ScalarSlot::Alpha => &mut self.alpha,
            ScalarSlot::Elevation => &mut self.elevation,
            ScalarSlot::RotationZ => &mut self.rotation_z,
            ScalarSlot::RotationX => &mut self.rotation_x,
            ScalarSlot::RotationY => &mut self.rotation_y,
            ScalarSlot::PivotX => &mut self.pivot_x,
            ScalarSlot::PivotY => &mut self.pivot_y,
            ScalarSlot::TranslationX => &mut self.translation_x,
            ScalarSlot::TranslationY => &mut self.translation_y,
            ScalarSlot::TranslationZ => &mut self.translation_z,
            ScalarSlot::PathRotate => &mut self.path_rotate,
            ScalarSlot::ScaleX => &mut self.scale_x,
            ScalarSlot::ScaleY => &mut self.scale_y,
            ScalarSlot::Progress => &mut self.progress,
        }
    }

    pub fn set_slot(&mut self, slot: ScalarSlot, value: f32) {
        *self.slot_mut(slot) = Some(value);
    }

    pub fn clear_slot(&mut self, slot: ScalarSlot) {
        *self.slot_mut(slot) = None;
    }

    /// Slots currently holding a value, in enumeration order.
    pub fn present_slots(&self) -> impl Iterator<Item = (ScalarSlot, f32)> + '_ {
        ScalarSlot::ALL
            .into_iter()
            .filter_map(|slot| self.slot(slot).map(|v| (slot, v)))
    }

    pub fn visibility(&self) -> i32 {
        self.visibility
    }

    pub fn custom(&self, name: &str) -> Option<&CustomVariable> {
        self.custom.get(name)
    }

    /// Insert or replace a custom variable.
    pub fn set_custom_attribute(&mut self, name: impl Into<String>, value: CustomValue) {
        let name = name.into();
        self.custom
            .insert(name.clone(), CustomVariable::new(name, value));
    }

    /// Scalar stored under an attribute id; frame position included.
    pub fn float_value(&self, id: AttributeId) -> Option<f32> {
        if id == AttributeId::FRAME_POSITION {
            return Some(self.base.frame_position as f32);
        }
        ScalarSlot::from_id(id).and_then(|slot| self.slot(slot))
    }

    pub fn copy_from(&mut self, src: &AttributeKeyframe) {
        self.clone_from(src);
    }

    /// Debug dump of every present attribute and its value.
    pub fn print_attributes(
        &self,
        registry: &dyn AttributeRegistry,
        diagnostics: &mut dyn Diagnostics,
    ) {
        let mut names = IndexSet::new();
        self.attribute_names(&mut names);

        diagnostics.debug(&format!(
            " ------------- {} -------------",
            self.base.frame_position
        ));
        for name in &names {
            let value = match custom_variable_name(name) {
                Some(var) => self.custom.get(var).map(|v| v.value.to_string()),
                None => registry
                    .id_of(name)
                    .and_then(|id| self.float_value(id))
                    .map(|v| v.to_string()),
            };
            match value {
                Some(v) => diagnostics.debug(&format!("{name}:{v}")),
                None => diagnostics.debug(&format!("{name}:NaN")),
            }
        }
    }
}

impl MotionKey for AttributeKeyframe {
    fn kind(&self) -> KeyframeKind {
        KeyframeKind::Attributes
    }

    fn base(&self) -> &KeyframeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut KeyframeBase {
        &mut self.base
    }

    fn attribute_names(&self, attributes: &mut IndexSet<String>) {
        for (slot, _) in self.present_slots() {
            attributes.insert(slot.name().to_string());
        }
        for name in self.custom.keys() {
            attributes.insert(custom_attribute_name(name));
        }
    }

    fn add_values<S: SplineSink>(
        &self,
        splines: &mut SplineMap<S>,
        diagnostics: &mut dyn Diagnostics,
    ) {
        let frame = self.base.frame_position;
        for (name, sink) in splines.iter_mut() {
            let Some(sink) = sink.as_mut() else {
                continue;
            };
            if let Some(var_name) = custom_variable_name(name) {
                let Some(variable) = self.custom.get(var_name) else {
                    continue;
                };
                match sink.as_custom() {
                    Some(custom) if custom.declared_kind() == variable.kind() => {
                        custom.set_custom_point(frame, variable)
                    }
                    Some(custom) => diagnostics.warn(&format!(
                        "spline for {name} expects {:?} values, got {:?}",
                        custom.declared_kind(),
                        variable.kind()
                    )),
                    None => diagnostics.warn(&format!("spline for {name} is not a custom spline")),
                }
                continue;
            }
            match ScalarSlot::from_name(name) {
                Some(slot) => {
                    if let Some(value) = self.slot(slot) {
                        sink.set_point(frame, value);
                    }
                }
                None => diagnostics.warn(&format!("not supported by attribute keyframes: {name}")),
            }
        }
    }

    fn set_interpolation(&self, interpolation: &mut InterpolationMap) {
        let curve_fit = self.base.curve_fit;
        for (slot, _) in self.present_slots() {
            interpolation.insert(slot.name().to_string(), curve_fit);
        }
        for name in self.custom.keys() {
            interpolation.insert(custom_attribute_name(name), curve_fit);
        }
    }

    fn set_int(&mut self, id: AttributeId, value: i32) -> KeyResult<()> {
        match id {
            AttributeId::VISIBILITY => self.visibility = value,
            AttributeId::CURVE_FIT => self.base.curve_fit = CurveFit::from_raw(value),
            AttributeId::FRAME_POSITION => self.base.frame_position = value,
            _ => return self.base.set_int(KeyframeKind::Attributes, id, value),
        }
        Ok(())
    }

    fn set_float(&mut self, id: AttributeId, value: f32) -> KeyResult<()> {
        match ScalarSlot::from_id(id) {
            Some(slot) => {
                self.set_slot(slot, value);
                Ok(())
            }
            None => self.base.set_float(KeyframeKind::Attributes, id, value),
        }
    }

    fn set_string(&mut self, id: AttributeId, value: &str) -> KeyResult<()> {
        match id {
            AttributeId::EASING => self.base.easing = Some(value.to_string()),
            AttributeId::TARGET => self.base.target = Some(value.to_string()),
            _ => return self.base.set_string(KeyframeKind::Attributes, id, value),
        }
        Ok(())
    }

    fn id_of(&self, name: &str) -> Option<AttributeId> {
        AttributeNames.id_of(name)
    }
}
