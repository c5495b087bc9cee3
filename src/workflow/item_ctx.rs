//! 文件处理上下文
//!
//! 封装"我正在处理批次中的第几个文件"这一信息

use std::fmt::Display;

/// 文件处理上下文
#[derive(Debug, Clone)]
pub struct ItemCtx {
    /// 文件在批次中的位置（从1开始）
    pub position: usize,

    /// 批次文件总数
    pub total: usize,

    /// 文件名
    pub filename: String,
}

impl ItemCtx {
    pub fn new(position: usize, total: usize, filename: impl Into<String>) -> Self {
        Self {
            position,
            total,
            filename: filename.into(),
        }
    }
}

impl Display for ItemCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[文件 {}/{} {}]", self.position, self.total, self.filename)
    }
}
