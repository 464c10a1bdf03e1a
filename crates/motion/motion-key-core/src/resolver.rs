//! Forward and inverse position conversion for [`PositionKeyframe`]s.
//!
//! Model summary (start/end are the target's boxes at the transition ends,
//! `v = end_center - start_center`):
//! - Cartesian: `abs = start + v.x * (percent_x, alt_percent_y) + v.y * (alt_percent_x, percent_y)`
//! - Path: `abs = start + v * percent_x + perp(v) * percent_y`, `perp(v) = (-v.y, v.x)`
//! - Screen: `abs = (percent_x * width, percent_y * height)` of the container
//!
//! Forward conversions treat unset offsets as 0. Inverse conversions report
//! zero-length reference axes as [`KeyError::DegenerateAxis`], except for the
//! path model whose near-zero path resolves to `(0, 0)`.

use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::error::{Axis, KeyError, KeyResult};
use crate::geometry::{ContainerSize, FloatRect, LayoutContainer};
use crate::keyframe::{PercentAxis, PositionAttributes, PositionKeyframe, PositionModel};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PositionResolver {
    pub config: Config,
}

#[inline]
fn or_zero(v: Option<f32>) -> f32 {
    v.unwrap_or(0.0)
}

fn cartesian_position(key: &PositionKeyframe, start: (f32, f32), end: (f32, f32)) -> (f32, f32) {
    let vx = end.0 - start.0;
    let vy = end.1 - start.1;
    let dxdx = or_zero(key.percent_x);
    let dydx = or_zero(key.alt_percent_y);
    let dydy = or_zero(key.percent_y);
    let dxdy = or_zero(key.alt_percent_x);
    (start.0 + vx * dxdx + vy * dxdy, start.1 + vx * dydx + vy * dydy)
}

fn path_position(key: &PositionKeyframe, start: (f32, f32), end: (f32, f32)) -> (f32, f32) {
    let vx = end.0 - start.0;
    let vy = end.1 - start.1;
    let along = or_zero(key.percent_x);
    let perp = or_zero(key.percent_y);
    (start.0 + vx * along - vy * perp, start.1 + vy * along + vx * perp)
}

fn screen_position(key: &PositionKeyframe, container: &dyn LayoutContainer) -> (f32, f32) {
    (
        container.width() as f32 * or_zero(key.percent_x),
        container.height() as f32 * or_zero(key.percent_y),
    )
}

impl PositionResolver {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Forward conversion from box centers; caches the result on the keyframe.
    pub fn calc_position(
        &self,
        key: &mut PositionKeyframe,
        container: &dyn LayoutContainer,
        start: (f32, f32),
        end: (f32, f32),
    ) -> (f32, f32) {
        let (x, y) = match key.position_model {
            PositionModel::Cartesian => cartesian_position(key, start, end),
            PositionModel::Path => path_position(key, start, end),
            PositionModel::Screen => screen_position(key, container),
        };
        key.set_calculated(x, y);
        (x, y)
    }

    /// Forward conversion from the start/end boxes.
    pub fn resolve(
        &self,
        key: &mut PositionKeyframe,
        container: &dyn LayoutContainer,
        start: &FloatRect,
        end: &FloatRect,
    ) -> (f32, f32) {
        self.calc_position(
            key,
            container,
            (start.center_x(), start.center_y()),
            (end.center_x(), end.center_y()),
        )
    }

    /// Inverse conversion: the normalized offsets that would place `key` at `(x, y)`.
    #[allow(clippy::too_many_arguments)]
    pub fn position_attributes(
        &self,
        key: &PositionKeyframe,
        container: &dyn LayoutContainer,
        start: &FloatRect,
        end: &FloatRect,
        x: f32,
        y: f32,
        hint: Option<PercentAxis>,
        diagnostics: &mut dyn Diagnostics,
    ) -> KeyResult<PositionAttributes> {
        match key.position_model {
            PositionModel::Cartesian => self.cartesian_attributes(start, end, x, y, hint),
            PositionModel::Path => Ok(self.path_attributes(start, end, x, y, hint, diagnostics)),
            PositionModel::Screen => self.screen_attributes(container, x, y, hint),
        }
    }

    pub fn cartesian_attributes(
        &self,
        start: &FloatRect,
        end: &FloatRect,
        x: f32,
        y: f32,
        hint: Option<PercentAxis>,
    ) -> KeyResult<PositionAttributes> {
        let start_cx = start.center_x();
        let start_cy = start.center_y();
        let vx = end.center_x() - start_cx;
        let vy = end.center_y() - start_cy;
        if vx == 0.0 {
            return Err(KeyError::DegenerateAxis { axis: Axis::X });
        }
        if vy == 0.0 {
            return Err(KeyError::DegenerateAxis { axis: Axis::Y });
        }
        Ok(PositionAttributes::ordered(
            hint,
            (x - start_cx) / vx,
            (y - start_cy) / vy,
        ))
    }

    pub fn path_attributes(
        &self,
        start: &FloatRect,
        end: &FloatRect,
        x: f32,
        y: f32,
        hint: Option<PercentAxis>,
        diagnostics: &mut dyn Diagnostics,
    ) -> PositionAttributes {
        let start_cx = start.center_x();
        let start_cy = start.center_y();
        let vx = end.center_x() - start_cx;
        let vy = end.center_y() - start_cy;
        let distance = vx.hypot(vy);
        if distance < self.config.min_path_distance {
            diagnostics.debug("distance ~ 0");
            return PositionAttributes::ordered(hint, 0.0, 0.0);
        }

        let dx = vx / distance;
        let dy = vy / distance;
        let along = (dx * (x - start_cx) + dy * (y - start_cy)) / distance;
        let perpendicular = (dx * (y - start_cy) - (x - start_cx) * dy) / distance;
        PositionAttributes::ordered(hint, along, perpendicular)
    }

    pub fn screen_attributes(
        &self,
        container: &dyn LayoutContainer,
        x: f32,
        y: f32,
        hint: Option<PercentAxis>,
    ) -> KeyResult<PositionAttributes> {
        let width = container.width();
        let height = container.height();
        if width == 0 {
            return Err(KeyError::DegenerateAxis { axis: Axis::X });
        }
        if height == 0 {
            return Err(KeyError::DegenerateAxis { axis: Axis::Y });
        }
        Ok(PositionAttributes::ordered(
            hint,
            x / width as f32,
            y / height as f32,
        ))
    }

    /// True when `(x, y)` lies within the selection slope of the keyframe's
    /// resolved position on both axes. Resolves (and caches) first.
    #[allow(clippy::too_many_arguments)]
    pub fn intersects(
        &self,
        key: &mut PositionKeyframe,
        layout_width: i32,
        layout_height: i32,
        start: &FloatRect,
        end: &FloatRect,
        x: f32,
        y: f32,
    ) -> bool {
        let container = ContainerSize::new(layout_width, layout_height);
        let (px, py) = self.resolve(key, &container, start, end);
        let slope = self.config.selection_slope;
        (x - px).abs() < slope && (y - py).abs() < slope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{NullDiagnostics, RecordingDiagnostics};

    fn boxes() -> (FloatRect, FloatRect) {
        (
            FloatRect::centered(100.0, 100.0, 40.0, 40.0),
            FloatRect::centered(300.0, 200.0, 40.0, 40.0),
        )
    }

    #[test]
    fn cartesian_cross_terms() {
        let mut key = PositionKeyframe::new(50).with_percent(0.5, 0.25);
        key.alt_percent_x = Some(1.0);
        key.alt_percent_y = Some(-0.5);
        let (start, end) = boxes();
        // v = (200, 100)
        let pos =
            PositionResolver::default().resolve(&mut key, &ContainerSize::default(), &start, &end);
        assert_eq!(pos, (100.0 + 100.0 + 100.0, 100.0 - 100.0 + 25.0));
        assert_eq!(key.position(), Some(pos));
    }

    #[test]
    fn path_perpendicular_is_left_of_travel() {
        let mut key = PositionKeyframe::new(50)
            .with_model(PositionModel::Path)
            .with_percent(0.0, 0.5);
        let start = FloatRect::centered(0.0, 0.0, 10.0, 10.0);
        let end = FloatRect::centered(100.0, 0.0, 10.0, 10.0);
        let pos =
            PositionResolver::default().resolve(&mut key, &ContainerSize::default(), &start, &end);
        assert_eq!(pos, (0.0, 50.0));
    }

    #[test]
    fn path_inverse_matches_forward() {
        let (start, end) = boxes();
        let resolver = PositionResolver::default();
        let mut key = PositionKeyframe::new(50)
            .with_model(PositionModel::Path)
            .with_percent(0.3, -0.2);
        let (x, y) = resolver.resolve(&mut key, &ContainerSize::default(), &start, &end);
        let attrs = resolver.path_attributes(&start, &end, x, y, None, &mut NullDiagnostics);
        assert!((attrs.get(PercentAxis::PercentX) - 0.3).abs() < 1e-5);
        assert!((attrs.get(PercentAxis::PercentY) + 0.2).abs() < 1e-5);
    }

    #[test]
    fn degenerate_path_reports_zero() {
        let start = FloatRect::centered(10.0, 10.0, 4.0, 4.0);
        let mut diag = RecordingDiagnostics::new();
        let attrs = PositionResolver::default()
            .path_attributes(&start, &start, 50.0, 70.0, None, &mut diag);
        assert_eq!(attrs.values, [0.0, 0.0]);
        assert_eq!(diag.debug, vec!["distance ~ 0".to_string()]);
    }

    #[test]
    fn cartesian_inverse_rejects_flat_vector() {
        let start = FloatRect::centered(0.0, 0.0, 10.0, 10.0);
        let end = FloatRect::centered(100.0, 0.0, 10.0, 10.0);
        let err = PositionResolver::default()
            .cartesian_attributes(&start, &end, 50.0, 10.0, None)
            .unwrap_err();
        assert_eq!(err, KeyError::DegenerateAxis { axis: Axis::Y });
    }

    #[test]
    fn screen_inverse_rejects_empty_container() {
        let err = PositionResolver::default()
            .screen_attributes(&ContainerSize::new(0, 100), 1.0, 1.0, None)
            .unwrap_err();
        assert_eq!(err, KeyError::DegenerateAxis { axis: Axis::X });
    }

    #[test]
    fn custom_slope() {
        let resolver = PositionResolver::new(Config {
            selection_slope: 5.0,
            ..Config::default()
        });
        let (start, end) = boxes();
        let mut key = PositionKeyframe::new(50).with_percent(0.5, 0.5);
        // resolves to (200, 150)
        assert!(resolver.intersects(&mut key, 0, 0, &start, &end, 204.0, 146.0));
        assert!(!resolver.intersects(&mut key, 0, 0, &start, &end, 206.0, 150.0));
    }
}
