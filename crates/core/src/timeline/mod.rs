use serde::{Deserialize, Serialize};

use crate::{AnimationError, Color, Geometry, Result, Step};

/// A step paired with the number of seconds it takes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedStep {
    pub step: Step,
    pub duration: f64,
}

/// Ordered, time-weighted sequence of steps that begins `start_time` seconds
/// after scene playback starts.
///
/// Timelines are assembled up front, either fluently:
///
/// ```
/// use shape_timeline_core::Timeline;
///
/// let timeline = Timeline::starting_at(0.5)
///     .recolor_to(220, 1.0)
///     .translate(-80.0, 40.0, 1.0)
///     .scale(0.9, 1.0);
/// assert_eq!(timeline.end_time(), 3.5);
/// ```
///
/// or from parallel step/duration lists with [`Timeline::from_parts`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    start_time: f64,
    entries: Vec<TimedStep>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(start_time: f64) -> Self {
        Self {
            start_time,
            entries: Vec::new(),
        }
    }

    /// Pairs `steps[i]` with `durations[i]`. Both lists must have the same
    /// length.
    pub fn from_parts(start_time: f64, steps: Vec<Step>, durations: Vec<f64>) -> Result<Self> {
        if steps.len() != durations.len() {
            return Err(AnimationError::MismatchedTimeline {
                steps: steps.len(),
                durations: durations.len(),
            });
        }

        let entries = steps
            .into_iter()
            .zip(durations)
            .map(|(step, duration)| TimedStep { step, duration })
            .collect();
        Ok(Self {
            start_time,
            entries,
        })
    }

    /// Appends `step` lasting `duration` seconds. A non-positive duration
    /// makes the step an instantaneous no-op.
    pub fn then(mut self, step: Step, duration: f64) -> Self {
        self.entries.push(TimedStep { step, duration });
        self
    }

    pub fn translate(self, dx: f64, dy: f64, duration: f64) -> Self {
        self.then(Step::Translate { dx, dy }, duration)
    }

    pub fn rotate(self, degrees: f64, duration: f64) -> Self {
        self.then(Step::Rotate { degrees }, duration)
    }

    pub fn scale(self, factor: f64, duration: f64) -> Self {
        self.then(Step::Scale { factor }, duration)
    }

    pub fn recolor_to(self, brightness: u8, duration: f64) -> Self {
        self.then(Step::Recolor { brightness }, duration)
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn steps(&self) -> &[TimedStep] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all positive durations.
    pub fn total_duration(&self) -> f64 {
        self.entries
            .iter()
            .map(|entry| entry.duration)
            .filter(|duration| *duration > 0.0)
            .sum()
    }

    pub fn end_time(&self) -> f64 {
        self.start_time + self.total_duration()
    }

    /// Inclusive window test against scene time.
    pub fn is_active_at(&self, now: f64) -> bool {
        self.start_time <= now && now <= self.end_time()
    }

    /// Replays the steps from `geometry`/`color` up to `local_time` seconds
    /// into the timeline. Finished steps are applied in full, the step in
    /// progress partially, and later steps not at all.
    pub fn resolve(&self, geometry: &Geometry, color: Color, local_time: f64) -> Result<(Geometry, Color)> {
        let mut current = (geometry.clone(), color);
        let mut cursor = 0.0;

        for entry in &self.entries {
            if entry.duration <= 0.0 {
                continue;
            }

            let progress = ((local_time - cursor) / entry.duration).clamp(0.0, 1.0);
            tracing::trace!(step = entry.step.kind(), progress, "apply step");
            current = entry.step.apply(&current.0, current.1, progress)?;

            if progress < 1.0 {
                break;
            }
            cursor += entry.duration;
        }

        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;

    fn square() -> Geometry {
        Geometry::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)])
    }

    fn xs(geometry: &Geometry) -> Vec<f64> {
        geometry.points().iter().map(|p| p.x).collect()
    }

    #[test]
    fn fluent_appends_keep_order_and_durations() {
        let timeline = Timeline::starting_at(2.0)
            .rotate(60.0, 1.0)
            .translate(200.0, 0.0, 1.0)
            .recolor_to(200, 0.8);

        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.steps()[0].step, Step::Rotate { degrees: 60.0 });
        assert_eq!(timeline.steps()[2].duration, 0.8);
        assert!((timeline.total_duration() - 2.8).abs() < 1e-12);
        assert!((timeline.end_time() - 4.8).abs() < 1e-12);
    }

    #[test]
    fn from_parts_rejects_mismatched_lengths() {
        let err = Timeline::from_parts(0.0, vec![Step::Scale { factor: 2.0 }], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            AnimationError::MismatchedTimeline {
                steps: 1,
                durations: 2
            }
        ));

        let ok = Timeline::from_parts(0.0, vec![Step::Scale { factor: 2.0 }], vec![1.5]).unwrap();
        assert_eq!(ok, Timeline::new().scale(2.0, 1.5));
    }

    #[test]
    fn non_positive_durations_add_no_length() {
        let timeline = Timeline::new()
            .translate(5.0, 0.0, 0.0)
            .translate(5.0, 0.0, -2.0)
            .translate(10.0, 0.0, 1.0);
        assert_eq!(timeline.total_duration(), 1.0);

        let (g, _) = timeline.resolve(&square(), Color::default(), 1.0).unwrap();
        assert_eq!(xs(&g), vec![10.0, 20.0, 20.0, 10.0]);
    }

    #[test]
    fn resolves_single_translate() {
        let timeline = Timeline::new().translate(10.0, 0.0, 1.0);

        let (half, _) = timeline.resolve(&square(), Color::default(), 0.5).unwrap();
        assert_eq!(xs(&half), vec![5.0, 15.0, 15.0, 5.0]);
        let (end, _) = timeline.resolve(&square(), Color::default(), 1.0).unwrap();
        assert_eq!(xs(&end), vec![10.0, 20.0, 20.0, 10.0]);
    }

    #[test]
    fn start_of_timeline_is_base_state() {
        let timeline = Timeline::new().rotate(45.0, 1.0).recolor_to(0, 1.0);
        let (g, c) = timeline.resolve(&square(), Color::gray(90), 0.0).unwrap();
        assert_eq!(c, Color::gray(90));
        for (a, b) in g.points().iter().zip(square().points()) {
            assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9);
        }
    }

    #[test]
    fn later_steps_are_not_reached() {
        let timeline = Timeline::new().translate(10.0, 0.0, 1.0).recolor_to(0, 1.0);
        let (_, c) = timeline.resolve(&square(), Color::gray(255), 0.99).unwrap();
        assert_eq!(c, Color::gray(255));
    }

    #[test]
    fn step_boundaries_are_continuous() {
        let timeline = Timeline::new()
            .translate(10.0, 0.0, 1.0)
            .scale(2.0, 1.0)
            .recolor_to(0, 1.0);

        let (end_first, _) = timeline.resolve(&square(), Color::gray(200), 1.0).unwrap();
        let (just_after, _) = timeline.resolve(&square(), Color::gray(200), 1.0 + 1e-9).unwrap();
        for (a, b) in end_first.points().iter().zip(just_after.points()) {
            assert!((a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6);
        }

        let (_, c_end_second) = timeline.resolve(&square(), Color::gray(200), 2.0).unwrap();
        assert_eq!(c_end_second, Color::gray(200));
    }

    #[test]
    fn end_of_timeline_composes_every_step() {
        let timeline = Timeline::new()
            .translate(10.0, 0.0, 1.0)
            .scale(2.0, 0.5)
            .recolor_to(10, 0.25);
        let (g, c) = timeline
            .resolve(&square(), Color::gray(250), timeline.total_duration())
            .unwrap();

        assert_eq!(
            g.points(),
            &[
                Point::new(5.0, -5.0),
                Point::new(25.0, -5.0),
                Point::new(25.0, 15.0),
                Point::new(5.0, 15.0)
            ]
        );
        assert_eq!(c, Color::gray(10));

        let (past_end, _) = timeline.resolve(&square(), Color::gray(250), 99.0).unwrap();
        assert_eq!(past_end, g);
    }

    #[test]
    fn resolution_is_deterministic() {
        let timeline = Timeline::new().rotate(33.0, 0.7).scale(1.7, 0.4).translate(3.0, 4.0, 1.1);
        let first = timeline.resolve(&square(), Color::gray(1), 0.93).unwrap();
        let second = timeline.resolve(&square(), Color::gray(1), 0.93).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn active_window_is_inclusive() {
        let timeline = Timeline::starting_at(1.0).translate(1.0, 1.0, 2.0);
        assert!(!timeline.is_active_at(0.999));
        assert!(timeline.is_active_at(1.0));
        assert!(timeline.is_active_at(3.0));
        assert!(!timeline.is_active_at(3.001));
    }
}
