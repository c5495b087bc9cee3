//! 进度报告
//!
//! 进度是批次状态的纯投影，每处理一个文件重新计算一次。

use tracing::{info, warn};

use crate::models::SubmissionResult;

/// 进度快照：正在处理第 `completed` 个，共 `total` 个
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub completed: usize,
    pub total: usize,
}

impl ProgressUpdate {
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    /// 百分比，`total` 为 0 时返回 0
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }

    /// 给界面显示的文本
    pub fn label(&self) -> String {
        format!("Processando {} de {} arquivos", self.completed, self.total)
    }
}

/// 进度观察者
///
/// 表现层实现它来渲染进度条和结果表格，默认方法什么都不做。
pub trait ProgressReporter: Send + Sync {
    fn on_progress(&self, _update: ProgressUpdate) {}
    fn on_result(&self, _result: &SubmissionResult) {}
}

/// 写入 tracing 日志的进度观察者
#[derive(Debug, Default)]
pub struct LogProgressReporter;

impl ProgressReporter for LogProgressReporter {
    fn on_progress(&self, update: ProgressUpdate) {
        info!("⏳ {} ({:.0}%)", update.label(), update.percentage());
    }

    fn on_result(&self, result: &SubmissionResult) {
        match result {
            SubmissionResult::Found { filename, code } => {
                info!("✓ {}: 找到条形码 {}", filename, code);
            }
            SubmissionResult::NotFound { filename } => {
                info!("○ {}: 未找到条形码", filename);
            }
            SubmissionResult::Failed { filename, reason } => {
                warn!("❌ {}: 处理失败 ({})", filename, reason);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(ProgressUpdate::new(1, 4).percentage(), 25.0);
        assert_eq!(ProgressUpdate::new(4, 4).percentage(), 100.0);
        assert_eq!(ProgressUpdate::new(0, 0).percentage(), 0.0);
    }

    #[test]
    fn test_label() {
        assert_eq!(
            ProgressUpdate::new(2, 5).label(),
            "Processando 2 de 5 arquivos"
        );
    }
}
