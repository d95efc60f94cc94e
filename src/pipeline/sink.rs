//! 输出接收器 (Output Sinks)
//!
//! 计数结果的落地端: 丢弃、JSON Lines 导出等

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use super::OutputSink;
use crate::counting::{CountSnapshot, Frame};

/// 丢弃所有输出 (只要最终计数的场合)
pub struct NullSink;

impl OutputSink for NullSink {
    fn publish(&mut self, _frame: &Frame, _totals: CountSnapshot) -> Result<()> {
        Ok(())
    }
}

/// JSON Lines 导出 (每帧一条记录)
pub struct JsonlSink<W: Write> {
    writer: W,
}

/// 单条导出记录
#[derive(Serialize)]
struct JsonlRecord {
    timestamp: String,
    frame_id: u64,
    total_up: u32,
    total_down: u32,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputSink for JsonlSink<W> {
    fn publish(&mut self, frame: &Frame, totals: CountSnapshot) -> Result<()> {
        let record = JsonlRecord {
            timestamp: chrono::Utc::now().to_rfc3339(),
            frame_id: frame.frame_id,
            total_up: totals.total_up,
            total_down: totals.total_down,
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_jsonl_sink_writes_one_record_per_frame() {
        let mut sink = JsonlSink::new(Vec::new());
        let frame = Frame {
            rgba_data: Arc::new(Vec::new()),
            width: 100,
            height: 100,
            frame_id: 7,
        };
        let totals = CountSnapshot {
            total_up: 2,
            total_down: 1,
        };

        sink.publish(&frame, totals).unwrap();
        sink.publish(&frame, totals).unwrap();

        let text = String::from_utf8(sink.writer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["frame_id"], 7);
        assert_eq!(parsed["total_up"], 2);
        assert_eq!(parsed["total_down"], 1);
    }
}
