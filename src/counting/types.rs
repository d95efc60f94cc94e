//! 计数系统数据结构定义
//! Data structures for the people counting system

use std::sync::Arc;

use serde::Serialize;

// ========== 数据结构 ==========

/// 检测框 (Detection bounding box)
#[derive(Clone, Debug)]
pub struct BBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub confidence: f32,
    pub class_id: u32,
}

impl BBox {
    /// 获取中心点 (质心)
    pub fn center(&self) -> TrackPoint {
        TrackPoint {
            x: (self.x1 + self.x2) / 2.0,
            y: (self.y1 + self.y2) / 2.0,
        }
    }
}

/// 跟踪点 (质心坐标)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackPoint {
    pub x: f32,
    pub y: f32,
}

/// 已解码帧 (采集线程 → 计数线程)
#[derive(Clone)]
pub struct Frame {
    pub rgba_data: Arc<Vec<u8>>, // 使用Arc共享数据,避免复制
    pub width: u32,
    pub height: u32,
    pub frame_id: u64, // 帧序号
}

/// 计数快照 (每帧对外输出)
///
/// 计数只增不减: 一旦提交,不撤销、不修正、不转移
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CountSnapshot {
    /// 上行累计 (越线向上)
    pub total_up: u32,

    /// 下行累计 (越线向下)
    pub total_down: u32,
}
