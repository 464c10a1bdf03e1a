//! Motion Key Core
//!
//! Keyframe data model for constraint-based motion layouts. Drivers hold the
//! keyframes of each animated target and use this crate to:
//! - list which attributes a keyframe touches and push its samples into
//!   per-attribute spline sinks,
//! - propagate a keyframe's curve fit to every attribute it carries,
//! - resolve position keyframes to absolute coordinates (and back) under the
//!   Cartesian, path-relative and screen-relative models.
//!
//! Curve fitting, layout measurement and keyframe loading are left to the host.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod keyframe;
pub mod resolver;
pub mod spline;
pub mod value;

// Re-exports for drivers
pub use config::Config;
pub use diagnostics::{Diagnostics, LogDiagnostics, NullDiagnostics, RecordingDiagnostics};
pub use error::{Axis, KeyError, KeyResult};
pub use geometry::{ContainerSize, FloatRect, LayoutContainer};
pub use ids::{AttributeId, AttributeNames, AttributeRegistry, PositionNames, ScalarSlot};
pub use keyframe::{
    AttributeKeyframe, Keyframe, KeyframeBase, KeyframeKind, MotionKey, PercentAxis,
    PositionAttributes, PositionKeyframe, PositionModel,
};
pub use resolver::PositionResolver;
pub use spline::{
    CustomSplinePoint, CustomSplineSink, InterpolationMap, KeySpline, SplineMap, SplinePoint,
    SplineSink,
};
pub use value::{CurveFit, CustomKind, CustomValue, CustomVariable};
