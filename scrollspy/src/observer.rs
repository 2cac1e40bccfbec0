use crate::layout::{LayoutResult, Rect};

/// One observed target's intersection state at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    /// Id of the observed element.
    pub target: String,
    /// Whether the element overlaps the viewport.
    pub is_intersecting: bool,
    /// The element's rect in document coordinates at delivery time.
    pub bounding: Rect,
    /// Milliseconds since the observation source was created.
    pub time: f64,
}

/// Observation capability. The tracker registers and releases targets
/// through this seam, so tests can substitute a recording fake for the
/// real viewport computation.
pub trait IntersectionSource {
    fn observe(&mut self, target: &str);
    fn unobserve(&mut self, target: &str);
}

#[derive(Debug)]
struct Observed {
    target: String,
    /// Last delivered flag. None until the initial delivery.
    was_intersecting: Option<bool>,
}

/// Computes viewport intersection for observed targets.
///
/// The root is the full viewport with zero margin and zero threshold: a
/// target intersects when its layout rect overlaps the viewport rect by a
/// non-empty area. Each `update` returns one batch with an entry per target
/// whose state changed since the last delivery; a newly observed target
/// always gets an initial entry, whatever its state. Batches are returned to
/// the host loop, never dispatched from here.
#[derive(Debug, Default)]
pub struct ViewportObserver {
    observed: Vec<Observed>,
}

impl ViewportObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently observed targets.
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    pub fn is_observed(&self, target: &str) -> bool {
        self.observed.iter().any(|o| o.target == target)
    }

    /// Recompute intersections against the viewport.
    ///
    /// `viewport` is the visible window in document coordinates (its `y` is
    /// the scroll offset). `now_ms` stamps the produced entries; the caller
    /// supplies it so playback stays deterministic. Targets missing from the
    /// layout are held back until a rect shows up for them.
    pub fn update(
        &mut self,
        layout: &LayoutResult,
        viewport: Rect,
        now_ms: f64,
    ) -> Vec<IntersectionEntry> {
        let mut batch = Vec::new();

        for observed in &mut self.observed {
            let Some(bounding) = layout.get(&observed.target).copied() else {
                continue;
            };
            let is_intersecting = bounding.intersect(&viewport).is_some();
            if observed.was_intersecting != Some(is_intersecting) {
                observed.was_intersecting = Some(is_intersecting);
                batch.push(IntersectionEntry {
                    target: observed.target.clone(),
                    is_intersecting,
                    bounding,
                    time: now_ms,
                });
            }
        }

        if !batch.is_empty() {
            log::trace!("[observer] {} change(s) at {now_ms}ms", batch.len());
        }
        batch
    }
}

impl IntersectionSource for ViewportObserver {
    fn observe(&mut self, target: &str) {
        if self.is_observed(target) {
            return;
        }
        self.observed.push(Observed {
            target: target.to_string(),
            was_intersecting: None,
        });
    }

    fn unobserve(&mut self, target: &str) {
        self.observed.retain(|o| o.target != target);
    }
}
