//! 人流计数器 (People Counter)
//! 职责: 检测帧/追踪帧相位调度 → 质心对账 → 越线判定与计数汇总
//!
//! 调度策略: 每隔 detection_interval 帧运行一次重量级检测器,
//! 其余帧只推进轻量单目标追踪器。周期性重检测同时抑制追踪漂移
//! 和新目标漏检,并摊薄检测开销。

use std::collections::HashMap;

use anyhow::Result;

use super::trackable::TrackableObject;
use super::tracker::CentroidTracker;
use super::types::{BBox, CountSnapshot, Frame, TrackPoint};
use crate::config::CounterConfig;

// ========== 外部协作者接口 ==========

/// 目标检测器 (重量级, 仅检测帧运行)
///
/// 致命错误 (模型加载失败、坏帧) 原样上抛, 核心不做恢复
pub trait Detector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<BBox>>;
}

/// 单目标追踪器 (轻量级, 追踪帧逐帧推进)
///
/// 检测帧上由工厂按检测框逐个生成; 返回 None 表示目标丢失,
/// 走正常的未匹配/注销路径, 不是错误
pub trait SingleObjectTracker {
    fn update(&mut self, frame: &Frame) -> Option<BBox>;
}

/// 追踪器工厂 (检测帧上为每个检测框生成一个追踪器)
pub type TrackerFactory = Box<dyn FnMut(&Frame, &BBox) -> Box<dyn SingleObjectTracker>>;

// ========== 帧相位 ==========

/// 帧处理相位
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// 检测帧: 运行检测器, 重建追踪器集合
    Detect,
    /// 追踪帧: 仅推进现有追踪器
    Track,
}

// ========== 计数器 ==========

/// 人流计数器
///
/// 独占持有全部追踪/计数状态: 质心追踪器、可计数目标表、
/// 单目标追踪器集合与累计计数, 不跨线程共享
pub struct PeopleCounter {
    config: CounterConfig,
    detector: Box<dyn Detector>,
    spawn_tracker: TrackerFactory,

    /// 质心对账
    tracker: CentroidTracker,

    /// 当前活跃的单目标追踪器 (每个检测框一个, 检测帧整体重建)
    object_trackers: Vec<Box<dyn SingleObjectTracker>>,

    /// 身份ID → 可计数目标 (身份注销时同步删除, 避免陈旧计数状态)
    objects: HashMap<u32, TrackableObject>,

    /// 累计计数 (只增不减)
    totals: CountSnapshot,

    /// 帧序号 (从0开始)
    frame_index: u64,
}

impl PeopleCounter {
    pub fn new(config: CounterConfig, detector: Box<dyn Detector>, spawn_tracker: TrackerFactory) -> Self {
        println!(
            "🎯 人流计数器就绪 | 检测间隔: {}帧 | 消失容忍: {}帧 | 计数线: y={}",
            config.detection_interval, config.max_disappeared, config.boundary_y
        );
        Self {
            tracker: CentroidTracker::new(config.max_disappeared),
            config,
            detector,
            spawn_tracker,
            object_trackers: Vec::new(),
            objects: HashMap::new(),
            totals: CountSnapshot::default(),
            frame_index: 0,
        }
    }

    /// 当前帧的处理相位
    pub fn phase(&self) -> Phase {
        if self.frame_index % self.config.detection_interval.max(1) == 0 {
            Phase::Detect
        } else {
            Phase::Track
        }
    }

    /// 处理一帧, 返回最新计数快照
    pub fn process_frame(&mut self, frame: &Frame) -> Result<CountSnapshot> {
        let centroids: Vec<TrackPoint> = match self.phase() {
            Phase::Detect => {
                let boxes = self.detector.detect(frame)?;

                // 按类别和置信度过滤 (检测器只约定输出格式, 过滤在调用侧)
                let kept: Vec<BBox> = boxes
                    .into_iter()
                    .filter(|b| {
                        b.class_id == self.config.class_id
                            && b.confidence >= self.config.confidence_threshold
                    })
                    .collect();

                // 整体替换追踪器集合
                let mut spawned = Vec::with_capacity(kept.len());
                for bbox in &kept {
                    spawned.push((self.spawn_tracker)(frame, bbox));
                }
                self.object_trackers = spawned;

                kept.iter().map(BBox::center).collect()
            }
            Phase::Track => {
                // 丢失目标的追踪器直接省略, 集合收缩
                self.object_trackers
                    .iter_mut()
                    .filter_map(|t| t.update(frame))
                    .map(|b| b.center())
                    .collect()
            }
        };

        let mapping = self.tracker.reconcile(&centroids);
        let before = self.totals;

        for (&id, &centroid) in &mapping {
            let obj = self
                .objects
                .entry(id)
                .or_insert_with(|| TrackableObject::new(id));
            obj.observe(centroid, self.config.boundary_y, &mut self.totals);
        }

        // 身份注销 → 同步删除对应目标
        self.objects.retain(|id, _| mapping.contains_key(id));

        if self.totals.total_up > before.total_up {
            println!(
                "⬆️ 上行 +{} | 累计 ↑{} ↓{}",
                self.totals.total_up - before.total_up,
                self.totals.total_up,
                self.totals.total_down
            );
        }
        if self.totals.total_down > before.total_down {
            println!(
                "⬇️ 下行 +{} | 累计 ↑{} ↓{}",
                self.totals.total_down - before.total_down,
                self.totals.total_up,
                self.totals.total_down
            );
        }

        self.frame_index += 1;
        Ok(self.totals)
    }

    /// 当前累计计数
    pub fn totals(&self) -> CountSnapshot {
        self.totals
    }

    /// 当前活跃目标数量
    pub fn track_count(&self) -> usize {
        self.objects.len()
    }
}
