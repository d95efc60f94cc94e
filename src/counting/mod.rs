//! 追踪计数核心 (Tracking & Counting Core)
//!
//! - CentroidTracker: 质心对账,身份分配与注销
//! - TrackableObject: 轨迹历史与越线方向判定
//! - PeopleCounter:   检测/追踪相位调度与计数汇总
pub mod counter;
pub mod trackable;
pub mod tracker;
pub mod types;

pub use counter::{Detector, PeopleCounter, Phase, SingleObjectTracker, TrackerFactory};
pub use trackable::TrackableObject;
pub use tracker::CentroidTracker;
pub use types::{BBox, CountSnapshot, Frame, TrackPoint};
