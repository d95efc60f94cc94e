//! 参数配置 (Configuration)

use clap::Parser;

/// 人流计数参数
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "人流计数 - 越线方向统计", long_about = None)]
pub struct Args {
    /// 视频源地址 (文件路径或RTSP流)
    #[arg(short, long, default_value = "")]
    pub source: String,

    /// 检测帧间隔 (每N帧运行一次检测器)
    #[arg(long, default_value_t = 30)]
    pub detection_interval: u64,

    /// 目标消失容忍帧数 (严格超过即注销身份)
    #[arg(long, default_value_t = 40)]
    pub max_disappeared: u32,

    /// 计数线Y坐标 (像素, 缺省取画面高度一半)
    #[arg(long)]
    pub boundary_y: Option<f32>,

    /// 检测置信度阈值
    #[arg(long, default_value_t = 0.4)]
    pub confidence_threshold: f32,

    /// 目标类别ID (COCO: 0 = 行人)
    #[arg(long, default_value_t = 0)]
    pub class_id: u32,
}

/// 计数核心配置
#[derive(Clone, Copy, Debug)]
pub struct CounterConfig {
    pub detection_interval: u64,
    pub max_disappeared: u32,
    pub boundary_y: f32,
    pub confidence_threshold: f32,
    pub class_id: u32,
}

impl CounterConfig {
    /// 默认参数 + 指定计数线
    pub fn with_boundary(boundary_y: f32) -> Self {
        Self {
            detection_interval: 30,
            max_disappeared: 40,
            boundary_y,
            confidence_threshold: 0.4,
            class_id: 0,
        }
    }
}

impl Args {
    /// 转为核心配置 (计数线缺省取画面高度一半)
    pub fn counter_config(&self, frame_height: u32) -> CounterConfig {
        CounterConfig {
            detection_interval: self.detection_interval,
            max_disappeared: self.max_disappeared,
            boundary_y: self.boundary_y.unwrap_or(frame_height as f32 / 2.0),
            confidence_threshold: self.confidence_threshold,
            class_id: self.class_id,
        }
    }
}
