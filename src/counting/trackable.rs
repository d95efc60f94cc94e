//! 可计数目标 (Trackable Object)
//!
//! 持有单个身份的完整轨迹历史与计数标记,负责越线方向判定。
//! 方向取当前y与全部历史y均值之差,而非仅与上一点比较,以抑制单帧抖动。

use super::types::{CountSnapshot, TrackPoint};

/// 可计数目标 (每个身份一个, 由计数器持有)
#[derive(Clone, Debug)]
pub struct TrackableObject {
    /// 身份ID
    pub id: u32,

    /// 轨迹历史 (生命周期内只追加)
    pub trajectory: Vec<TrackPoint>,

    /// 是否已计数 (false→true 至多一次)
    pub counted: bool,
}

impl TrackableObject {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            trajectory: Vec::new(),
            counted: false,
        }
    }

    /// 记录一帧观测并判定是否越线
    ///
    /// 唯一的计数入口: 每个身份在整个生命周期内至多贡献一次计数。
    /// 判定规则 (互斥, 按序):
    /// - 向上运动且已越过计数线上方 → total_up + 1
    /// - 向下运动且已越过计数线下方 → total_down + 1
    pub fn observe(&mut self, centroid: TrackPoint, boundary_y: f32, totals: &mut CountSnapshot) {
        self.trajectory.push(centroid);

        if self.counted {
            return;
        }

        // 首次观测没有历史可比, 不判定
        let prior = self.trajectory.len() - 1;
        if prior == 0 {
            return;
        }

        let mean_y =
            self.trajectory[..prior].iter().map(|c| c.y).sum::<f32>() / prior as f32;
        let direction = centroid.y - mean_y;

        if direction < 0.0 && centroid.y < boundary_y {
            totals.total_up += 1;
            self.counted = true;
        } else if direction > 0.0 && centroid.y > boundary_y {
            totals.total_down += 1;
            self.counted = true;
        }
    }
}
