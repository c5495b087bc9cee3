//! 提交结果
//!
//! 每个文件提交后恰好产生一个 `SubmissionResult`。

/// 单个文件的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// 找到条形码
    Found { filename: String, code: String },
    /// 服务正常返回，但没有找到条形码
    NotFound { filename: String },
    /// 提交或解析失败
    Failed { filename: String, reason: String },
}

impl SubmissionResult {
    pub fn filename(&self) -> &str {
        match self {
            SubmissionResult::Found { filename, .. }
            | SubmissionResult::NotFound { filename }
            | SubmissionResult::Failed { filename, .. } => filename,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SubmissionResult::Failed { .. })
    }
}

/// 批次统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub found: usize,
    pub not_found: usize,
    pub failed: usize,
}

impl BatchSummary {
    /// 从结果列表汇总
    pub fn from_results(results: &[SubmissionResult]) -> Self {
        results.iter().fold(
            Self {
                total: results.len(),
                ..Default::default()
            },
            |mut summary, result| {
                match result {
                    SubmissionResult::Found { .. } => summary.found += 1,
                    SubmissionResult::NotFound { .. } => summary.not_found += 1,
                    SubmissionResult::Failed { .. } => summary.failed += 1,
                }
                summary
            },
        )
    }
}
