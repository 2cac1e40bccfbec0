/// Notification that the active target changed.
///
/// Emitted once per identity change, never per intersection batch. Consumers
/// register listeners directly on the tracker; nothing bubbles anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetIntersection {
    /// Id of the element now considered active.
    pub target: String,
    /// Always true: only intersecting candidates are ever reported.
    pub is_intersecting: bool,
    /// Absolute milliseconds: the entry's relative timestamp plus the
    /// tracker's mount timestamp.
    pub time: f64,
}

/// Listener invoked by the tracker when the active target changes.
pub type IntersectionListener = Box<dyn FnMut(&TargetIntersection)>;
