use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Local;
use log::{debug, info, warn};

use crate::dataset::ConfigSource;
use crate::render::surface::Surface;
use crate::render::view;
use crate::rotation::controller::Rotator;
use crate::slots::filter::select_slides;

/// Ties the pieces together for a host page: fetch the configuration,
/// select the slides and hand them to the rotator, or render the
/// empty/warning states instead.
pub struct BannerWidget<C, S: Surface> {
    source: C,
    surface: Arc<S>,
    rotator: Arc<Rotator<S>>,
    epochs: Mutex<HashMap<String, u64>>,
    epoch_counter: AtomicU64,
}

impl<C: ConfigSource, S: Surface + 'static> BannerWidget<C, S> {
    pub fn new(source: C, surface: Arc<S>) -> Self {
        Self {
            source,
            rotator: Rotator::new(surface.clone()),
            surface,
            epochs: Mutex::new(HashMap::new()),
            epoch_counter: AtomicU64::new(0),
        }
    }

    /// Initialize (or re-initialize) the banner inside a container.
    ///
    /// Every outcome replaces the loading placeholder: a rotating
    /// carousel, an informational notice when no slot qualifies, or a
    /// warning carrying the failure cause. A response that arrives after
    /// the container was re-initialized or torn down is discarded.
    pub async fn init(&self, container_id: &str, widget_id: &str) {
        info!("initializing banner '{widget_id}' in #{container_id}");

        self.rotator.stop(container_id);
        self.surface
            .replace_content(container_id, &view::loading_markup());
        let epoch = self.begin_epoch(container_id);

        let outcome = self.source.fetch(widget_id).await;

        if !self.epoch_is_current(container_id, epoch) {
            debug!("discarding stale configuration response for #{container_id}");
            return;
        }

        match outcome {
            Ok(record) => {
                let slides = select_slides(&record, Local::now());
                if slides.is_empty() {
                    info!("no banner qualifies for '{widget_id}'");
                    self.surface
                        .replace_content(container_id, &view::empty_markup(widget_id));
                    return;
                }

                debug!("rendering {} slides in #{container_id}", slides.len());
                self.surface
                    .replace_content(container_id, &view::carousel_markup(container_id, &slides));
                self.rotator.start(container_id, slides);
            }
            Err(err) => {
                warn!("banner initialization failed: {err}");
                self.surface
                    .replace_content(container_id, &view::warning_markup(&err.to_string()));
            }
        }
    }

    /// Indicator activation from the host page.
    pub fn select(&self, container_id: &str, index: usize) {
        self.rotator.select(container_id, index);
    }

    /// Stop rotating and invalidate any in-flight fetch for the container.
    pub fn teardown(&self, container_id: &str) {
        self.begin_epoch(container_id);
        self.rotator.stop(container_id);
    }

    pub fn rotator(&self) -> &Arc<Rotator<S>> {
        &self.rotator
    }

    fn begin_epoch(&self, container_id: &str) -> u64 {
        let epoch = self.epoch_counter.fetch_add(1, Ordering::Relaxed) + 1;
        self.epochs
            .lock()
            .unwrap()
            .insert(container_id.to_string(), epoch);
        epoch
    }

    fn epoch_is_current(&self, container_id: &str, epoch: u64) -> bool {
        self.epochs.lock().unwrap().get(container_id) == Some(&epoch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::dataset::ConfigRecord;
    use crate::error::{BannerError, Result};
    use crate::render::surface::MemorySurface;

    struct StubSource(Result<ConfigRecord>);

    #[async_trait]
    impl ConfigSource for StubSource {
        async fn fetch(&self, _widget_id: &str) -> Result<ConfigRecord> {
            self.0.clone()
        }
    }

    /// Resolves with the record only after a simulated delay.
    struct SlowSource {
        delay: Duration,
        record: ConfigRecord,
    }

    #[async_trait]
    impl ConfigSource for SlowSource {
        async fn fetch(&self, _widget_id: &str) -> Result<ConfigRecord> {
            tokio::time::sleep(self.delay).await;
            Ok(self.record.clone())
        }
    }

    fn two_slide_record() -> ConfigRecord {
        let mut r = ConfigRecord::default();
        r.set("ATIVO_1", "Sim")
            .set("URLIMAGEM_1", "http://x/a.png")
            .set("TEMPO_1", "2")
            .set("ATIVO_2", "Sim")
            .set("URLIMAGEM_2", "http://x/b.png")
            .set("TEMPO_2", "4");
        r
    }

    #[tokio::test(start_paused = true)]
    async fn test_init_renders_and_rotates_end_to_end() {
        let _ = env_logger::builder().is_test(true).try_init();

        let surface = Arc::new(MemorySurface::new());
        let widget = BannerWidget::new(StubSource(Ok(two_slide_record())), surface.clone());

        widget.init("c", "banner-home").await;

        let html = surface.content("c").unwrap();
        assert!(html.contains("br-wrapper"));
        assert!(html.contains("http://x/a.png"));
        assert!(html.contains("http://x/b.png"));
        assert_eq!(widget.rotator().current_index("c"), Some(0));

        // Durations [2s, 4s]: slide 1 after 2s, back to slide 0 after 4 more.
        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert_eq!(widget.rotator().current_index("c"), Some(1));

        tokio::time::sleep(Duration::from_millis(4000)).await;
        assert_eq!(widget.rotator().current_index("c"), Some(0));

        // Indicator activation routes through the widget.
        widget.select("c", 1);
        assert_eq!(widget.rotator().current_index("c"), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_found_renders_warning() {
        let surface = Arc::new(MemorySurface::new());
        let widget = BannerWidget::new(
            StubSource(Err(BannerError::NotFound("banner-home".to_string()))),
            surface.clone(),
        );

        widget.init("c", "banner-home").await;

        let html = surface.content("c").unwrap();
        assert!(html.contains("alert-warning"));
        assert!(html.contains("banner-home"));
        assert_eq!(widget.rotator().current_index("c"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_failure_renders_warning_with_cause() {
        let surface = Arc::new(MemorySurface::new());
        let widget = BannerWidget::new(
            StubSource(Err(BannerError::QueryFailed("HTTP 500".to_string()))),
            surface.clone(),
        );

        widget.init("c", "banner-home").await;

        let html = surface.content("c").unwrap();
        assert!(html.contains("alert-warning"));
        assert!(html.contains("HTTP 500"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_qualifying_slots_renders_notice() {
        let mut record = ConfigRecord::default();
        record.set("ATIVO_1", "Nao").set("ATIVO_2", "Nao");

        let surface = Arc::new(MemorySurface::new());
        let widget = BannerWidget::new(StubSource(Ok(record)), surface.clone());

        widget.init("c", "banner-home").await;

        let html = surface.content("c").unwrap();
        assert!(html.contains("alert-info"));
        assert!(!html.contains("alert-warning"));
        assert_eq!(widget.rotator().current_index("c"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_fetch_response_is_discarded() {
        let surface = Arc::new(MemorySurface::new());
        let widget = Arc::new(BannerWidget::new(
            SlowSource {
                delay: Duration::from_secs(10),
                record: two_slide_record(),
            },
            surface.clone(),
        ));

        let slow = Arc::clone(&widget);
        let init = tokio::spawn(async move { slow.init("c", "banner-home").await });

        // Tear the container down while the fetch is still in flight.
        tokio::time::sleep(Duration::from_millis(100)).await;
        widget.teardown("c");

        init.await.unwrap();

        // The late response must not have re-rendered or started rotation.
        assert!(surface.content("c").unwrap().contains("br-loading"));
        assert_eq!(widget.rotator().current_index("c"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reinit_cancels_previous_rotation() {
        let surface = Arc::new(MemorySurface::new());
        let widget = BannerWidget::new(StubSource(Ok(two_slide_record())), surface.clone());

        widget.init("c", "banner-home").await;
        widget.init("c", "banner-home").await;

        // One armed timer total: a single advance happens at the 2s mark.
        let before = surface.offset_changes("c");
        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert_eq!(surface.offset_changes("c"), before + 1);
        assert_eq!(widget.rotator().current_index("c"), Some(1));
    }
}
