use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::slots::Slide;

/// Live state of one carousel bound to one container.
///
/// `generation` identifies the currently armed timer: every arm mints a
/// fresh value, and a timer that fires with a stale generation must not
/// touch the session. At most one timer is armed at a time; `rearm`
/// cancels the previous one before installing its successor, and
/// dropping the session cancels whatever is left.
pub struct RotationSession {
    pub(crate) slides: Arc<[Slide]>,
    pub(crate) current: usize,
    pub(crate) generation: u64,
    pub(crate) timer: Option<JoinHandle<()>>,
}

impl RotationSession {
    pub(crate) fn new(slides: Arc<[Slide]>, generation: u64) -> Self {
        Self {
            slides,
            current: 0,
            generation,
            timer: None,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Install a newly armed timer, cancelling the previous one.
    pub(crate) fn rearm(&mut self, handle: JoinHandle<()>) {
        if let Some(prev) = self.timer.replace(handle) {
            prev.abort();
        }
    }

    pub(crate) fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for RotationSession {
    fn drop(&mut self) {
        self.cancel();
    }
}
