//! Gesture sampling loop.
//!
//! Each cycle reads the session state, interprets the current hand pose for
//! that state, and on a confirmed gesture queues the intent and moves the
//! session to `AwaitingServerResponse`. Gestures seen while a response is
//! pending are dropped, never queued.

use crate::cooldown::Cooldown;
use crate::frames::{Frame, FrameError, FrameSource};
use crate::hover::HoverTracker;
use crate::overlay::{Overlay, OverlayView};
use crate::pose::HandPose;
use crate::queue::{IntentSender, StopHandle};
use crate::session::SharedSession;
use handcue_core::{Intent, Point, SessionState, Zone, ZoneId, zone_at};
use std::time::{Duration, Instant};

/// Per-cycle decision logic, free of I/O and clocks.
#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    zones: Vec<Zone>,
    hover: HoverTracker,
    cooldown: Cooldown,
    pointer: Option<Point>,
}

impl GestureInterpreter {
    /// Interpreter over `zones` with the given dwell and trigger timings.
    pub fn new(zones: Vec<Zone>, hover_time: Duration, fist_cooldown: Duration) -> Self {
        Self {
            zones,
            hover: HoverTracker::new(hover_time),
            cooldown: Cooldown::new(fist_cooldown),
            pointer: None,
        }
    }

    /// Zones in hit-test order.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Zone currently being dwelt on.
    pub fn hovered(&self) -> Option<&ZoneId> {
        self.hover.current()
    }

    /// Fingertip from the last sample.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Interpret one sample under `state`. `pose` is `None` when no hand is
    /// in view.
    pub fn interpret(
        &mut self,
        state: SessionState,
        pose: Option<&HandPose>,
        now: Instant,
    ) -> Option<Intent> {
        self.pointer = pose.and_then(|p| p.fingertip);
        if state != SessionState::AwaitingChoice {
            // A dwell only counts within one choice round.
            self.hover.reset();
        }

        match state {
            SessionState::AwaitingTrigger => {
                let pose = pose?;
                self.cooldown
                    .try_fire(pose.fist, now)
                    .then_some(Intent::TriggerRequest)
            }
            SessionState::AwaitingChoice => {
                let target = self
                    .pointer
                    .and_then(|p| zone_at(&self.zones, p))
                    .map(|zone| &zone.id);
                let choice = self.hover.update(target, now)?;
                self.hover.reset();
                Some(Intent::ChoiceSubmission { choice })
            }
            SessionState::AwaitingServerResponse => None,
        }
    }
}

/// Drives a `GestureInterpreter` from a frame source until the source ends,
/// fails for good, or a stop is requested. Always finishes by queueing the
/// shutdown sentinel.
pub struct GestureLoop<F, O> {
    interpreter: GestureInterpreter,
    session: SharedSession,
    queue: IntentSender,
    stop: StopHandle,
    frames: F,
    overlay: O,
    frame_interval: Duration,
    max_frame_errors: u32,
}

impl<F: FrameSource, O: Overlay> GestureLoop<F, O> {
    pub fn new(
        interpreter: GestureInterpreter,
        session: SharedSession,
        queue: IntentSender,
        stop: StopHandle,
        frames: F,
        overlay: O,
    ) -> Self {
        Self {
            interpreter,
            session,
            queue,
            stop,
            frames,
            overlay,
            frame_interval: Duration::from_millis(10),
            max_frame_errors: 100,
        }
    }

    /// Pause between cycles.
    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Consecutive transient frame errors tolerated before giving up.
    pub fn max_frame_errors(mut self, max: u32) -> Self {
        self.max_frame_errors = max;
        self
    }

    /// One cycle. Returns the intent queued, if any.
    pub fn process(&mut self, pose: Option<&HandPose>, now: Instant) -> Option<Intent> {
        let state = self.session.get();
        let intent = self.interpreter.interpret(state, pose, now);

        let mut shown = state;
        if let Some(intent) = &intent {
            tracing::info!(?intent, from = %state, "gesture confirmed");
            self.queue.push(intent.clone());
            self.session.set(SessionState::AwaitingServerResponse);
            shown = SessionState::AwaitingServerResponse;
        }

        let view = OverlayView {
            state: shown,
            zones: self.interpreter.zones(),
            hovered: self.interpreter.hovered(),
            pointer: self.interpreter.pointer(),
        };
        if let Err(error) = self.overlay.render(&view) {
            tracing::warn!(%error, "overlay render failed");
        }
        intent
    }

    /// Blocking loop; run it on its own thread.
    pub fn run(mut self) {
        let mut consecutive_errors = 0u32;
        while !self.stop.is_stopped() {
            match self.frames.next_frame() {
                Ok(Frame::Hand(pose)) => {
                    consecutive_errors = 0;
                    self.process(Some(&pose), Instant::now());
                }
                Ok(Frame::NoHand) => {
                    consecutive_errors = 0;
                    self.process(None, Instant::now());
                }
                Ok(Frame::End) => {
                    tracing::info!("frame source exhausted");
                    break;
                }
                Err(FrameError::Transient(error)) => {
                    consecutive_errors += 1;
                    tracing::debug!(%error, consecutive_errors, "skipping frame");
                    if consecutive_errors > self.max_frame_errors {
                        tracing::error!(consecutive_errors, "frame source keeps failing, stopping");
                        break;
                    }
                }
                Err(error @ FrameError::Fatal(_)) => {
                    tracing::error!(%error, "stopping gesture loop");
                    break;
                }
            }
            if !self.frame_interval.is_zero() {
                std::thread::sleep(self.frame_interval);
            }
        }
        self.stop.stop();
    }
}
