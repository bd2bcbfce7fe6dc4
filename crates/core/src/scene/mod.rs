use serde::{Deserialize, Serialize};

use crate::{Color, Geometry, Result, Timeline};

/// A named polygon with its resting geometry/color and an optional
/// animation. The base state is never written to during playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: String,
    pub geometry: Geometry,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
}

impl Shape {
    pub fn new(id: impl Into<String>, geometry: impl Into<Geometry>) -> Self {
        Self {
            id: id.into(),
            geometry: geometry.into(),
            color: Color::default(),
            timeline: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_timeline(mut self, timeline: Timeline) -> Self {
        self.timeline = Some(timeline);
        self
    }

    /// Geometry/color at scene time `now`, or `None` when the shape has no
    /// timeline or `now` lies outside its active window.
    pub fn resolve_at(&self, now: f64) -> Result<Option<(Geometry, Color)>> {
        match &self.timeline {
            Some(timeline) if timeline.is_active_at(now) => timeline
                .resolve(&self.geometry, self.color, now - timeline.start_time())
                .map(Some),
            _ => Ok(None),
        }
    }
}

/// The set of shapes handed to one playback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Shapes that carry a timeline, paired with it.
    pub fn animated(&self) -> impl Iterator<Item = (&Shape, &Timeline)> {
        self.shapes
            .iter()
            .filter_map(|shape| shape.timeline.as_ref().map(|timeline| (shape, timeline)))
    }

    /// Latest end time across all timelines, `None` if nothing is animated.
    pub fn global_end(&self) -> Option<f64> {
        self.animated()
            .map(|(_, timeline)| timeline.end_time())
            .reduce(f64::max)
    }
}

impl From<Vec<Shape>> for Scene {
    fn from(shapes: Vec<Shape>) -> Self {
        Self::new(shapes)
    }
}
