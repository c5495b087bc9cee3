//! 文件校验服务 - 业务能力层
//!
//! 只负责"判断一个候选文件能否入队"，不修改队列

use crate::error::QueueError;
use crate::models::CandidateFile;

/// 校验结论：入队，或者带原因跳过
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueMutation {
    /// 可以追加到队尾
    Enqueue(CandidateFile),
    /// 不入队，原因为 `RejectedType` 或 `Duplicate`
    Rejected(QueueError),
}

/// 文件校验服务
///
/// 职责：
/// - 检查声明的文件类型
/// - 按 (name, size) 去重
/// - 只计算结论，应用到队列是调用方的事
#[derive(Debug, Clone)]
pub struct ItemValidator {
    accepted_media_type: String,
}

impl ItemValidator {
    pub fn new(accepted_media_type: impl Into<String>) -> Self {
        Self {
            accepted_media_type: accepted_media_type.into(),
        }
    }

    /// 校验单个候选文件
    pub fn accept(&self, candidate: CandidateFile, existing: &[CandidateFile]) -> QueueMutation {
        if candidate.media_type() != self.accepted_media_type {
            return QueueMutation::Rejected(QueueError::RejectedType {
                name: candidate.name().to_string(),
                media_type: candidate.media_type().to_string(),
                expected: self.accepted_media_type.clone(),
            });
        }

        if existing.iter().any(|item| item.same_identity(&candidate)) {
            return QueueMutation::Rejected(QueueError::Duplicate {
                name: candidate.name().to_string(),
                size: candidate.size(),
            });
        }

        QueueMutation::Enqueue(candidate)
    }
}

impl Default for ItemValidator {
    fn default() -> Self {
        Self::new("application/pdf")
    }
}
