use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, warn};
use tokio::task::JoinHandle;

use crate::render::surface::Surface;
use crate::slots::Slide;

use super::session::RotationSession;

/// Drives the carousels: owns one [`RotationSession`] per container and
/// the timers that advance them.
///
/// Session state lives behind a mutex that is never held across an
/// await, and every state change arms its timer under a fresh
/// generation, so a timer fire racing a manual selection resolves to
/// exactly one winner.
pub struct Rotator<S: Surface> {
    surface: Arc<S>,
    sessions: Mutex<HashMap<String, RotationSession>>,
    generations: AtomicU64,
}

impl<S: Surface + 'static> Rotator<S> {
    pub fn new(surface: Arc<S>) -> Arc<Self> {
        Arc::new(Self {
            surface,
            sessions: Mutex::new(HashMap::new()),
            generations: AtomicU64::new(0),
        })
    }

    /// Begin rotating `slides` inside the container, replacing any
    /// previous session. Slide 0 becomes visible immediately and the
    /// first timer is armed for its duration.
    pub fn start(self: &Arc<Self>, container_id: &str, slides: Vec<Slide>) {
        if slides.is_empty() {
            warn!("refusing to start rotation with no slides in #{container_id}");
            return;
        }

        let mut sessions = self.sessions.lock().unwrap();
        // Dropping the previous session aborts its timer.
        sessions.remove(container_id);

        let generation = self.next_generation();
        let mut session = RotationSession::new(slides.into(), generation);
        self.show(container_id, &mut session, 0);
        let delay = session.slides[0].duration;
        session.rearm(self.schedule(container_id, generation, delay));
        sessions.insert(container_id.to_string(), session);

        debug!("rotation started in #{container_id}");
    }

    /// Jump to a manually selected slide. The automatic cadence restarts
    /// from this slide; the interrupted countdown is not resumed.
    pub fn select(self: &Arc<Self>, container_id: &str, index: usize) {
        let mut sessions = self.sessions.lock().unwrap();
        let Some(session) = sessions.get_mut(container_id) else {
            warn!("select on #{container_id} with no active session");
            return;
        };
        if index >= session.slides.len() {
            warn!("indicator index {index} out of range in #{container_id}");
            return;
        }

        let generation = self.next_generation();
        session.generation = generation;
        self.show(container_id, session, index);
        let delay = session.slides[index].duration;
        session.rearm(self.schedule(container_id, generation, delay));
    }

    /// Discard the container's session, cancelling its timer.
    pub fn stop(&self, container_id: &str) {
        if self.sessions.lock().unwrap().remove(container_id).is_some() {
            debug!("stopped rotation in #{container_id}");
        }
    }

    pub fn current_index(&self, container_id: &str) -> Option<usize> {
        self.sessions
            .lock()
            .unwrap()
            .get(container_id)
            .map(RotationSession::current)
    }

    /// Timer fire: advance to the next slide, wrapping after the last.
    /// A single-slide session keeps cycling onto index 0.
    fn advance(self: &Arc<Self>, container_id: &str, generation: u64) {
        let mut sessions = self.sessions.lock().unwrap();
        let Some(session) = sessions.get_mut(container_id) else {
            return;
        };
        if session.generation != generation {
            // A manual selection or re-initialization superseded this timer.
            return;
        }

        let next = (session.current + 1) % session.slides.len();
        let fresh = self.next_generation();
        session.generation = fresh;
        self.show(container_id, session, next);
        let delay = session.slides[next].duration;
        session.rearm(self.schedule(container_id, fresh, delay));
    }

    /// Arm a one-shot timer that advances the container after `delay`.
    fn schedule(
        self: &Arc<Self>,
        container_id: &str,
        generation: u64,
        delay: Duration,
    ) -> JoinHandle<()> {
        let rotator = Arc::clone(self);
        let container_id = container_id.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            rotator.advance(&container_id, generation);
        })
    }

    fn show(&self, container_id: &str, session: &mut RotationSession, index: usize) {
        session.current = index;
        self.surface.set_track_offset(container_id, index);
        self.surface.set_active_indicator(container_id, index);
    }

    fn next_generation(&self) -> u64 {
        self.generations.fetch_add(1, Ordering::Relaxed) + 1
    }
}
