pub mod element;
pub mod event;
pub mod layout;
pub mod observer;
pub mod scroll;
pub mod selector;
pub mod tracker;

pub use element::{find_element, Content, Element};
pub use event::TargetIntersection;
pub use layout::{LayoutResult, Rect};
pub use observer::{IntersectionEntry, IntersectionSource, ViewportObserver};
pub use scroll::{ScrollDirection, ScrollState};
pub use selector::{query_all, Selector, SelectorError};
pub use tracker::TrackerState;
