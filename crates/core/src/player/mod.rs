//! Per-frame driver that polls a clock and renders every active shape.
//!
//! Each frame is computed from elapsed time and the shapes' untouched base
//! state, so a late or dropped frame never compounds into the next one.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{
    AnimationError, Clock, PlaybackClock, PlayerConfig, Renderer, Result, Scene, ShapeFrame,
};

/// Shared flag that stops a running playback at its next poll.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// What a completed playback did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlaybackSummary {
    /// Number of clock polls.
    pub frames: usize,
    /// Number of render calls across all shapes.
    pub renders: usize,
    /// Scene time of the last poll, in seconds.
    pub elapsed: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ScenePlayer {
    config: PlayerConfig,
    cancel: Option<CancelToken>,
}

impl ScenePlayer {
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Plays `scene` against the wall clock, blocking until every timeline
    /// has finished.
    pub fn play_scene<R>(&self, scene: &Scene, renderer: &mut R) -> Result<PlaybackSummary>
    where
        R: Renderer + ?Sized,
    {
        self.play_scene_with_clock(scene, renderer, &PlaybackClock::start())
    }

    /// Plays `scene` with an explicit time source. The clock is read once up
    /// front and every later reading is taken relative to it.
    ///
    /// The loop ends on the first poll where no timeline is active and the
    /// latest end time has been reached, so pauses between shapes do not stop
    /// playback early.
    pub fn play_scene_with_clock<R, C>(
        &self,
        scene: &Scene,
        renderer: &mut R,
        clock: &C,
    ) -> Result<PlaybackSummary>
    where
        R: Renderer + ?Sized,
        C: Clock + ?Sized,
    {
        let animated: Vec<_> = scene.animated().collect();
        let Some(global_end) = scene.global_end() else {
            tracing::debug!("scene has no animated shapes, nothing to play");
            return Ok(PlaybackSummary::default());
        };

        // Resolving the end pose touches every step, which surfaces invalid
        // shapes before anything is drawn.
        for (shape, timeline) in &animated {
            timeline
                .resolve(&shape.geometry, shape.color, timeline.total_duration())
                .map_err(|err| {
                    tracing::error!(shape = %shape.id, %err, "shape cannot be animated");
                    err
                })?;
        }

        tracing::debug!(
            shapes = animated.len(),
            global_end,
            poll_ms = self.config.poll_interval_ms,
            "starting playback"
        );

        let interval = self.config.poll_interval();
        let origin = clock.elapsed();
        let mut final_pose_rendered = vec![false; animated.len()];
        let mut summary = PlaybackSummary::default();

        loop {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                tracing::debug!(elapsed = summary.elapsed, "playback cancelled");
                return Err(AnimationError::Cancelled);
            }

            let now = clock.elapsed().saturating_sub(origin).as_secs_f64();
            let mut any_active = false;
            summary.frames += 1;
            summary.elapsed = now;

            for (index, (shape, timeline)) in animated.iter().enumerate() {
                let end = timeline.end_time();
                let at = if timeline.is_active_at(now) {
                    any_active = true;
                    if now >= end {
                        final_pose_rendered[index] = true;
                    }
                    now
                } else if self.config.render_final_pose
                    && timeline.total_duration() > 0.0
                    && now > end
                    && !final_pose_rendered[index]
                {
                    final_pose_rendered[index] = true;
                    end
                } else {
                    continue;
                };

                let (geometry, color) =
                    timeline.resolve(&shape.geometry, shape.color, at - timeline.start_time())?;
                renderer.render(&ShapeFrame {
                    shape_id: &shape.id,
                    time: at,
                    geometry: &geometry,
                    color,
                })?;
                summary.renders += 1;
            }

            tracing::trace!(now, any_active, "frame");

            if !any_active && now >= global_end {
                break;
            }
            clock.sleep(interval);
        }

        tracing::debug!(
            frames = summary.frames,
            renders = summary.renders,
            elapsed = summary.elapsed,
            "playback finished"
        );
        Ok(summary)
    }
}

/// Plays `scene` with the default player configuration.
pub fn play_scene<R>(scene: &Scene, renderer: &mut R) -> Result<PlaybackSummary>
where
    R: Renderer + ?Sized,
{
    ScenePlayer::default().play_scene(scene, renderer)
}
