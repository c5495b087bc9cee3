//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责队列管理和批次调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `file_queue` - 待提交队列
//! - 保持插入顺序，按 (name, size) 去重
//! - 每次修改都发布"队列是否为空"信号
//!
//! ### `batch_runner` - 批次编排器
//! - 对队列做快照，逐个提交
//! - 产出进度和结果事件
//! - 单个文件失败不影响其他文件
//!
//! ### `batch_processor` - 应用入口
//! - 管理资源（HttpExecutor、识别服务）
//! - 加载文件、导出 CSV、输出统计
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (App)
//!     ↓
//! batch_runner (处理 Vec<CandidateFile>)
//!     ↓
//! workflow::SubmitFlow (处理单个 CandidateFile)
//!     ↓
//! services (能力层：validate / extract / encode / progress)
//!     ↓
//! infrastructure (基础设施：HttpExecutor)
//! ```

pub mod batch_processor;
pub mod batch_runner;
pub mod file_queue;

pub use batch_processor::App;
pub use batch_runner::{BatchEvent, BatchOrchestrator, BatchState};
pub use file_queue::FileQueue;
