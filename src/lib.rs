//! # Barcode Batch Submit
//!
//! 把一批 PDF 逐个提交给远端条形码识别服务，汇总结果并导出为 CSV
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（HTTP Client），只暴露能力
//! - `HttpExecutor` - 唯一的 client owner，提供 multipart 上传和 JSON GET
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个文件
//! - `ItemValidator` - 类型校验和去重
//! - `ExtractionService` - 上传文件并取回第一条结果
//! - `result_encoder` - 结果列表 → CSV
//! - `progress` - 进度投影和观察者
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个文件"的完整处理流程
//! - `ItemCtx` - 上下文封装（位置 + 总数 + 文件名）
//! - `SubmitFlow` - 流程编排（上传 → 分类 → 失败兜底）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/file_queue` - 待提交队列
//! - `orchestrator/batch_runner` - 批次编排器，顺序提交并产出事件
//! - `orchestrator/batch_processor` - 应用入口，管理资源和导出
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

#[cfg(test)]
mod test_helpers;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, QueueError, SubmissionError};
pub use infrastructure::HttpExecutor;
pub use models::{BatchSummary, CandidateFile, SubmissionResult};
pub use orchestrator::{App, BatchEvent, BatchOrchestrator, BatchState, FileQueue};
pub use services::{ExportDocument, ExtractionService, Extractor, ItemValidator, ProgressUpdate};
pub use workflow::{ItemCtx, SubmitFlow};
