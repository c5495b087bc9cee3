//! 单文件提交流程 - 流程层
//!
//! 核心职责：定义"一个文件"的完整处理流程
//!
//! 流程顺序：
//! 1. 上传 → 取第一条结果
//! 2. 按 barcode_found 分类为 Found / NotFound
//! 3. 任何错误都转换为 Failed（兜底）

use tracing::{error, info, warn};

use crate::error::SubmissionError;
use crate::models::{CandidateFile, ExtractEntry, SubmissionResult};
use crate::services::Extractor;
use crate::workflow::item_ctx::ItemCtx;

/// 单文件提交流程
///
/// - 编排单个文件的提交和分类
/// - 不持有队列，不知道批次里的其他文件
/// - 永远返回一个结果，错误不会越过单个文件
pub struct SubmitFlow<E> {
    extractor: E,
}

impl<E: Extractor> SubmitFlow<E> {
    pub fn new(extractor: E) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    pub async fn run(&self, item: &CandidateFile, ctx: &ItemCtx) -> SubmissionResult {
        info!("{} 📤 正在提交 ({} 字节)...", ctx, item.size());

        match self.extractor.extract(item).await {
            Ok(entry) => classify(item, entry, ctx),
            Err(e) => {
                error!("{} ❌ 提交失败: {}", ctx, e);
                failed(item, &e)
            }
        }
    }
}

/// 把服务返回的第一条结果分类
///
/// 结果里的文件名始终使用本地文件名，保证导出行和输入一一对应。
fn classify(item: &CandidateFile, entry: ExtractEntry, ctx: &ItemCtx) -> SubmissionResult {
    if entry.filename != item.name() {
        warn!(
            "{} 服务返回的文件名不一致: {}",
            ctx, entry.filename
        );
    }

    if let Some(message) = entry.server_error() {
        warn!("{} ⚠️ 服务端报告错误: {}", ctx, message);
    }

    if !entry.barcode_found {
        info!("{} 未找到条形码", ctx);
        return SubmissionResult::NotFound {
            filename: item.name().to_string(),
        };
    }

    match entry.barcode.filter(|code| !code.trim().is_empty()) {
        Some(code) => {
            info!("{} ✓ 找到条形码: {}", ctx, code);
            SubmissionResult::Found {
                filename: item.name().to_string(),
                code,
            }
        }
        None => {
            let err = SubmissionError::decode_failed("barcode_found 为 true 但缺少 barcode");
            error!("{} ❌ {}", ctx, err);
            failed(item, &err)
        }
    }
}

fn failed(item: &CandidateFile, err: &SubmissionError) -> SubmissionResult {
    SubmissionResult::Failed {
        filename: item.name().to_string(),
        reason: err.to_string(),
    }
}
