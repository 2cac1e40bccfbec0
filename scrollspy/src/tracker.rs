use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::element::Element;
use crate::event::{IntersectionListener, TargetIntersection};
use crate::observer::{IntersectionEntry, IntersectionSource};
use crate::scroll::ScrollDirection;
use crate::selector::{query_all, Selector, SelectorError};

/// Tracks which watched element is the active one under scroll.
///
/// Watches a selector-matched set of targets for viewport intersection,
/// keeps a scroll-direction sample, and on each intersection batch picks a
/// single active target: the bottommost intersecting one while scrolling
/// down, the topmost while scrolling up. A `TargetIntersection` goes out
/// exactly when that pick differs by identity from the last reported one.
pub struct TrackerState {
    targets: HashSet<String>,
    last_reported: Option<String>,
    direction: ScrollDirection,
    last_scroll_y: u16,
    mount_ms: f64,
    active: bool,
    listeners: Vec<IntersectionListener>,
}

impl std::fmt::Debug for TrackerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerState")
            .field("targets", &self.targets)
            .field("last_reported", &self.last_reported)
            .field("direction", &self.direction)
            .field("active", &self.active)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl TrackerState {
    /// Create a tracker, stamping the mount time from the system clock.
    pub fn new() -> Self {
        Self::with_mount_time(wall_clock_ms())
    }

    /// Create a tracker with an explicit mount timestamp in milliseconds.
    /// Reported event times are entry-relative time plus this value.
    pub fn with_mount_time(mount_ms: f64) -> Self {
        Self {
            targets: HashSet::new(),
            last_reported: None,
            direction: ScrollDirection::default(),
            last_scroll_y: 0,
            mount_ms,
            active: false,
            listeners: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Id of the target most recently reported as active.
    pub fn active_target(&self) -> Option<&str> {
        self.last_reported.as_deref()
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn is_watched(&self, id: &str) -> bool {
        self.targets.contains(id)
    }

    /// Register a listener for active-target changes.
    /// Listeners are bound to this tracker instance; nothing bubbles.
    pub fn on_target_intersection(&mut self, listener: impl FnMut(&TargetIntersection) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Begin monitoring `root`'s selector matches (the root itself included).
    ///
    /// A selector parse failure propagates and mutates nothing. Matching
    /// zero elements is legal; the tracker just has nothing to report until
    /// a later selector change supplies targets. Returns the match count.
    pub fn activate(
        &mut self,
        root: &Element,
        selector: &str,
        source: &mut impl IntersectionSource,
    ) -> Result<usize, SelectorError> {
        let selector = Selector::parse(selector)?;
        self.rebuild(root, &selector, source);
        self.active = true;
        log::debug!("[tracker] activated with {} target(s)", self.targets.len());
        Ok(self.targets.len())
    }

    /// Atomically replace the watched set from a new selector.
    ///
    /// An empty or whitespace selector is a no-op and existing observations
    /// stay put, so a removed attribute never orphans the tracker. Before
    /// activation there is no observation to replace; the next `activate`
    /// re-queries anyway.
    pub fn update_selector(
        &mut self,
        root: &Element,
        selector: &str,
        source: &mut impl IntersectionSource,
    ) -> Result<usize, SelectorError> {
        if !self.active || selector.trim().is_empty() {
            return Ok(self.targets.len());
        }
        let selector = Selector::parse(selector)?;
        self.rebuild(root, &selector, source);
        log::debug!("[tracker] selector swapped, now {} target(s)", self.targets.len());
        Ok(self.targets.len())
    }

    /// Every old observation is released before any new target is observed,
    /// so a swap can never double-deliver ids present in both sets.
    fn rebuild(
        &mut self,
        root: &Element,
        selector: &Selector,
        source: &mut impl IntersectionSource,
    ) {
        for target in self.targets.drain() {
            source.unobserve(&target);
        }
        for target in query_all(root, selector) {
            source.observe(&target);
            self.targets.insert(target);
        }
    }

    /// Stop monitoring: release every observation, forget the watched set
    /// and the last report. Safe to call in any state, any number of times.
    pub fn deactivate(&mut self, source: &mut impl IntersectionSource) {
        for target in self.targets.drain() {
            source.unobserve(&target);
        }
        self.last_reported = None;
        if self.active {
            self.active = false;
            log::debug!("[tracker] deactivated");
        }
    }

    /// Feed a vertical scroll offset sample.
    ///
    /// Strictly increasing offsets set the direction to down, strictly
    /// decreasing ones to up; an unchanged offset leaves the previous
    /// direction in place. The previous sample is replaced unconditionally.
    pub fn sample_scroll(&mut self, offset_y: u16) {
        if !self.active {
            return;
        }
        if offset_y > self.last_scroll_y {
            self.direction = ScrollDirection::Down;
        } else if offset_y < self.last_scroll_y {
            self.direction = ScrollDirection::Up;
        }
        self.last_scroll_y = offset_y;
    }

    /// Process one intersection batch and pick the active target.
    ///
    /// Non-intersecting entries and entries for ids outside the watched set
    /// are dropped first; a batch left empty reports nothing and the
    /// previous target stays current. Candidates are ordered by the top edge
    /// of their bounding rect, the scroll direction picks one end of that
    /// order, and only an identity change produces an event.
    pub fn process_entries(
        &mut self,
        entries: &[IntersectionEntry],
    ) -> Option<TargetIntersection> {
        if !self.active {
            return None;
        }

        let mut intersecting: Vec<&IntersectionEntry> = entries
            .iter()
            .filter(|e| e.is_intersecting && self.targets.contains(&e.target))
            .collect();
        if intersecting.is_empty() {
            return None;
        }

        // Topmost first; the sort is stable, so batch order breaks ties.
        intersecting.sort_by_key(|e| e.bounding.top());

        let chosen = match self.direction {
            ScrollDirection::Down => intersecting[intersecting.len() - 1],
            ScrollDirection::Up => intersecting[0],
        };

        if self.last_reported.as_deref() == Some(chosen.target.as_str()) {
            return None;
        }
        self.last_reported = Some(chosen.target.clone());

        let event = TargetIntersection {
            target: chosen.target.clone(),
            is_intersecting: chosen.is_intersecting,
            time: chosen.time + self.mount_ms,
        };
        log::debug!(
            "[tracker] active target -> {} (scrolling {:?})",
            event.target,
            self.direction
        );
        for listener in &mut self.listeners {
            listener(&event);
        }
        Some(event)
    }
}

impl Default for TrackerState {
    fn default() -> Self {
        Self::new()
    }
}

fn wall_clock_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
