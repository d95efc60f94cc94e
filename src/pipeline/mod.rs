//! 计数流水线 (Counting Pipeline)
//!
//! 双线程架构,通过有界通道通信:
//! - 采集线程: 帧获取 (I/O密集, 独立线程)
//! - 计数线程: 检测/追踪/计数 (计算密集, 当前线程)
//!
//! 背压契约: 队列满时采集线程阻塞而不丢帧,处理顺序与采集顺序
//! 一致,保证计数准确。停止即停止供帧,计数在每个帧边界都是一致的,
//! 无需回滚。
pub mod sink;

pub use sink::{JsonlSink, NullSink};

use anyhow::Result;
use crossbeam_channel::bounded;

use crate::counting::{CountSnapshot, Frame, PeopleCounter};

// ========== 外部协作者接口 ==========

/// 帧源 (视频解码等上游)
///
/// Ok(None) 表示流结束; Err 为致命错误, 原样上抛。
/// 重试/退避属于帧源自身, 核心不做
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<Frame>>;
}

/// 输出接收器 (每帧一次, 无反馈回路)
pub trait OutputSink {
    fn publish(&mut self, frame: &Frame, totals: CountSnapshot) -> Result<()>;
}

// ========== 流水线 ==========

/// 运行计数流水线直至流结束, 返回最终计数
pub fn run<S, K>(
    mut source: S,
    mut counter: PeopleCounter,
    sink: &mut K,
    queue_depth: usize,
) -> Result<CountSnapshot>
where
    S: FrameSource + Send + 'static,
    K: OutputSink,
{
    println!("🚀 计数流水线启动 | 队列深度: {}", queue_depth.max(1));

    let (tx, rx) = bounded::<Result<Frame>>(queue_depth.max(1));

    // 采集线程: 队列满时 send 阻塞 (不丢帧); 接收端退出时 send 失败, 随之退出
    let producer = std::thread::spawn(move || loop {
        match source.next_frame() {
            Ok(Some(frame)) => {
                if tx.send(Ok(frame)).is_err() {
                    break;
                }
            }
            Ok(None) => break, // 流结束
            Err(e) => {
                let _ = tx.send(Err(e));
                break;
            }
        }
    });

    let outcome: Result<CountSnapshot> = (|| {
        for item in rx.iter() {
            let frame = item?; // 采集侧致命错误原样上抛
            let totals = counter.process_frame(&frame)?;
            sink.publish(&frame, totals)?;
        }
        Ok(counter.totals())
    })();

    drop(rx);
    if producer.join().is_err() {
        eprintln!("❌ 采集线程异常退出");
    }

    match &outcome {
        Ok(totals) => println!("✅ 计数完成 | ↑{} ↓{}", totals.total_up, totals.total_down),
        Err(e) => eprintln!("❌ 流水线中止: {}", e),
    }
    outcome
}
