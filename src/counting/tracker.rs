//! 质心追踪器 (Centroid Tracker)
//!
//! 核心思想:
//! 1. 每帧用观测到的质心与现有身份做最近邻对账
//! 2. 全局最近的配对最先锁定,避免后来者抢占
//! 3. 未匹配的观测 → 注册新身份
//! 4. 连续未匹配超限的身份 → 注销

use std::cmp::Ordering;
use std::collections::HashMap;

use super::types::TrackPoint;

/// 身份记录 (单个被追踪目标的最新状态)
#[derive(Clone, Debug)]
struct IdentityRecord {
    /// 最近一次确认的质心
    centroid: TrackPoint,

    /// 连续未匹配帧数 (匹配成功即清零)
    disappeared: u32,
}

/// 质心追踪器
pub struct CentroidTracker {
    /// 当前存活身份 (身份ID → 记录)
    objects: HashMap<u32, IdentityRecord>,

    /// 下一个分配的身份ID (单调递增,永不复用)
    next_id: u32,

    /// 最大允许未匹配帧数 (严格超过即注销)
    max_disappeared: u32,
}

impl CentroidTracker {
    pub fn new(max_disappeared: u32) -> Self {
        Self {
            objects: HashMap::new(),
            next_id: 1,
            max_disappeared,
        }
    }

    /// 对账: 用本帧观测到的质心更新身份集合
    ///
    /// 返回存活身份 → 当前质心的完整映射。
    /// 坐标假定有限实数,由调用方保证 (检测器契约)。
    pub fn reconcile(&mut self, observed: &[TrackPoint]) -> HashMap<u32, TrackPoint> {
        if observed.is_empty() {
            // 无观测: 所有身份消失计数+1, 超限注销, 不注册新身份
            self.objects.retain(|_, rec| {
                rec.disappeared += 1;
                rec.disappeared <= self.max_disappeared
            });
            return self.mapping();
        }

        // 行 = 现有身份 (等最小距离时低ID优先, 保证确定性)
        let mut ids: Vec<u32> = self.objects.keys().copied().collect();
        ids.sort_unstable();

        // 距离矩阵: 身份 × 观测
        let matrix: Vec<Vec<f32>> = ids
            .iter()
            .map(|id| {
                let c = self.objects[id].centroid;
                observed.iter().map(|o| euclidean(c, *o)).collect()
            })
            .collect();

        // 行按各自最小距离升序处理: 全局最近的配对最先锁定
        let mut rows: Vec<usize> = (0..ids.len()).collect();
        rows.sort_by(|&a, &b| {
            row_min(&matrix[a])
                .partial_cmp(&row_min(&matrix[b]))
                .unwrap_or(Ordering::Equal)
        });

        let mut row_matched = vec![false; ids.len()];
        let mut col_matched = vec![false; observed.len()];

        for &row in &rows {
            // 该行在未认领的列中取最近者
            let nearest = (0..observed.len())
                .filter(|&col| !col_matched[col])
                .min_by(|&a, &b| {
                    matrix[row][a]
                        .partial_cmp(&matrix[row][b])
                        .unwrap_or(Ordering::Equal)
                });
            let Some(col) = nearest else {
                break; // 列已耗尽,剩余行全部未匹配
            };
            if let Some(rec) = self.objects.get_mut(&ids[row]) {
                rec.centroid = observed[col];
                rec.disappeared = 0;
            }
            row_matched[row] = true;
            col_matched[col] = true;
        }

        // 未匹配的行: 消失计数+1, 超限注销
        for (row, id) in ids.iter().enumerate() {
            if row_matched[row] {
                continue;
            }
            if let Some(rec) = self.objects.get_mut(id) {
                rec.disappeared += 1;
                if rec.disappeared > self.max_disappeared {
                    self.objects.remove(id);
                }
            }
        }

        // 未认领的列: 注册新身份
        for (col, matched) in col_matched.iter().enumerate() {
            if !matched {
                self.register(observed[col]);
            }
        }

        self.mapping()
    }

    /// 注册新身份
    fn register(&mut self, centroid: TrackPoint) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.objects.insert(
            id,
            IdentityRecord {
                centroid,
                disappeared: 0,
            },
        );
        id
    }

    /// 存活身份 → 当前质心
    fn mapping(&self) -> HashMap<u32, TrackPoint> {
        self.objects
            .iter()
            .map(|(&id, rec)| (id, rec.centroid))
            .collect()
    }

    /// 当前存活身份数量
    pub fn track_count(&self) -> usize {
        self.objects.len()
    }
}

// ========== 工具函数 ==========

/// 欧氏距离
fn euclidean(a: TrackPoint, b: TrackPoint) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// 行内最小距离
fn row_min(row: &[f32]) -> f32 {
    row.iter().copied().fold(f32::INFINITY, f32::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> TrackPoint {
        TrackPoint { x, y }
    }

    #[test]
    fn test_register_assigns_monotonic_ids() {
        let mut tracker = CentroidTracker::new(40);
        let mapping = tracker.reconcile(&[p(10.0, 10.0), p(50.0, 50.0)]);
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping[&1], p(10.0, 10.0));
        assert_eq!(mapping[&2], p(50.0, 50.0));
    }

    #[test]
    fn test_identity_stability_under_smooth_motion() {
        let mut tracker = CentroidTracker::new(40);
        let mapping = tracker.reconcile(&[p(0.0, 100.0)]);
        assert!(mapping.contains_key(&1));

        // 每帧平移5像素, 身份全程不变
        for i in 1..20 {
            let mapping = tracker.reconcile(&[p(i as f32 * 5.0, 100.0)]);
            assert_eq!(mapping.len(), 1);
            assert!(mapping.contains_key(&1));
        }
    }

    #[test]
    fn test_eviction_strictly_after_max_disappeared() {
        let mut tracker = CentroidTracker::new(3);
        tracker.reconcile(&[p(10.0, 10.0)]);

        // 恰好3帧未匹配仍存活
        for _ in 0..3 {
            let mapping = tracker.reconcile(&[]);
            assert_eq!(mapping.len(), 1);
        }

        // 第4帧未匹配 → 注销
        let mapping = tracker.reconcile(&[]);
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_empty_observations_never_register() {
        let mut tracker = CentroidTracker::new(100);
        tracker.reconcile(&[p(1.0, 1.0)]);
        for _ in 0..10 {
            assert_eq!(tracker.reconcile(&[]).len(), 1);
        }
        assert_eq!(tracker.track_count(), 1);
    }

    #[test]
    fn test_greedy_nearest_first_assignment() {
        let mut tracker = CentroidTracker::new(40);
        tracker.reconcile(&[p(0.0, 0.0), p(10.0, 10.0)]); // id1=(0,0), id2=(10,10)

        // 全局最近配对必须成立: id1→(1,1), id2→(11,11)
        let mapping = tracker.reconcile(&[p(11.0, 11.0), p(1.0, 1.0)]);
        assert_eq!(mapping[&1], p(1.0, 1.0));
        assert_eq!(mapping[&2], p(11.0, 11.0));
    }

    #[test]
    fn test_unmatched_observation_registers_new_identity() {
        let mut tracker = CentroidTracker::new(40);
        tracker.reconcile(&[p(0.0, 0.0)]);
        let mapping = tracker.reconcile(&[p(1.0, 1.0), p(80.0, 80.0)]);
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping[&1], p(1.0, 1.0));
        assert_eq!(mapping[&2], p(80.0, 80.0));
    }

    #[test]
    fn test_unmatched_identity_keeps_last_centroid() {
        let mut tracker = CentroidTracker::new(40);
        tracker.reconcile(&[p(0.0, 0.0), p(100.0, 100.0)]);

        // 只剩一个观测: id2未匹配但未超限, 质心保持不变
        let mapping = tracker.reconcile(&[p(1.0, 1.0)]);
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping[&1], p(1.0, 1.0));
        assert_eq!(mapping[&2], p(100.0, 100.0));
    }
}
