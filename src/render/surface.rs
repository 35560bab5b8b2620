use std::collections::HashMap;
use std::sync::Mutex;

/// The mutations the engine performs on the host page.
///
/// Containers are addressed by identifier on every call; implementations
/// resolve them at call time, so no element reference outlives a
/// re-render.
pub trait Surface: Send + Sync {
    /// Replace the entire markup content of the container.
    fn replace_content(&self, container_id: &str, markup: &str);

    /// Slide the track so the slide at `index` fills the container.
    /// DOM-backed implementations apply
    /// [`crate::render::view::track_transform`] to the `.br-wrapper`
    /// element.
    fn set_track_offset(&self, container_id: &str, index: usize);

    /// Mark the indicator at `index` active, clearing the others.
    fn set_active_indicator(&self, container_id: &str, index: usize);
}

/// Recorded surface mutation, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    Replace { container: String },
    Offset { container: String, index: usize },
    Indicator { container: String, index: usize },
}

/// Headless surface keeping the latest state per container plus an
/// ordered operation log. Backs tests and server-side hosts.
#[derive(Default)]
pub struct MemorySurface {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    content: HashMap<String, String>,
    offset: HashMap<String, usize>,
    indicator: HashMap<String, usize>,
    ops: Vec<SurfaceOp>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self, container_id: &str) -> Option<String> {
        self.state.lock().unwrap().content.get(container_id).cloned()
    }

    pub fn offset(&self, container_id: &str) -> Option<usize> {
        self.state.lock().unwrap().offset.get(container_id).copied()
    }

    pub fn indicator(&self, container_id: &str) -> Option<usize> {
        self.state.lock().unwrap().indicator.get(container_id).copied()
    }

    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.state.lock().unwrap().ops.clone()
    }

    /// Number of track movements applied to a container so far.
    pub fn offset_changes(&self, container_id: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Offset { container, .. } if container == container_id))
            .count()
    }
}

impl Surface for MemorySurface {
    fn replace_content(&self, container_id: &str, markup: &str) {
        let mut state = self.state.lock().unwrap();
        state
            .content
            .insert(container_id.to_string(), markup.to_string());
        state.ops.push(SurfaceOp::Replace {
            container: container_id.to_string(),
        });
    }

    fn set_track_offset(&self, container_id: &str, index: usize) {
        let mut state = self.state.lock().unwrap();
        state.offset.insert(container_id.to_string(), index);
        state.ops.push(SurfaceOp::Offset {
            container: container_id.to_string(),
            index,
        });
    }

    fn set_active_indicator(&self, container_id: &str, index: usize) {
        let mut state = self.state.lock().unwrap();
        state.indicator.insert(container_id.to_string(), index);
        state.ops.push(SurfaceOp::Indicator {
            container: container_id.to_string(),
            index,
        });
    }
}
