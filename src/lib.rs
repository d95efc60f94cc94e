//! 人流计数系统 (People Counting System)
//!
//! 周期性目标检测 + 轻量帧间追踪 → 质心对账 → 越线方向计数
pub mod config; // 参数配置
pub mod counting; // 追踪计数核心
pub mod pipeline; // 双线程帧流水线

pub use crate::config::{Args, CounterConfig};
pub use crate::counting::{
    BBox, CentroidTracker, CountSnapshot, Detector, Frame, PeopleCounter, Phase,
    SingleObjectTracker, TrackPoint, TrackableObject, TrackerFactory,
};
pub use crate::pipeline::{FrameSource, JsonlSink, NullSink, OutputSink};
