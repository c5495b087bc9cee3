//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责资源创建和一次完整的批处理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：创建 HttpExecutor、识别服务，可选的健康检查
//! 2. **加载候选文件**：读取命令行给出的文件和目录
//! 3. **校验入队**：类型不符或重复的文件被跳过并记录
//! 4. **逐个提交**：委托 `BatchOrchestrator` 顺序处理
//! 5. **导出结果**：写出 CSV 并输出统计信息

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppResult, FileError, QueueError};
use crate::infrastructure::HttpExecutor;
use crate::models::{load_candidates, BatchSummary, CandidateFile, SubmissionResult};
use crate::orchestrator::batch_runner::BatchOrchestrator;
use crate::services::{export, ExtractionService, ItemValidator, LogProgressReporter};
use crate::utils::logging::{log_queue_ready, log_startup, print_final_stats};

/// 应用主结构
pub struct App {
    config: Config,
    orchestrator: BatchOrchestrator<ExtractionService>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let executor = HttpExecutor::new(Duration::from_secs(config.request_timeout_secs))
            .context("无法创建 HTTP 客户端")?;
        let service = ExtractionService::new(executor, &config);

        if config.check_health {
            check_health(&service).await;
        }

        let orchestrator =
            BatchOrchestrator::new(service, ItemValidator::new(&config.accepted_media_type));

        Ok(Self {
            config,
            orchestrator,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&mut self, paths: &[PathBuf]) -> Result<BatchSummary> {
        info!("\n📁 正在读取待处理的文件...");
        let candidates = load_candidates(paths).await?;

        let rejected = self.enqueue_candidates(candidates);
        if rejected > 0 {
            warn!("⚠️ 有 {} 个文件类型不符，已跳过", rejected);
        }

        if self.orchestrator.queue().is_empty() {
            warn!("⚠️ 没有找到可提交的文件，程序结束");
            return Ok(BatchSummary::default());
        }

        log_queue_ready(self.orchestrator.queue().items());

        let results = self.orchestrator.run_to_end(&LogProgressReporter).await;
        let summary = BatchSummary::from_results(&results);

        self.write_export(&results).await?;
        print_final_stats(&summary, &self.config.output_csv);

        Ok(summary)
    }

    /// 校验并入队，返回类型不符被拒绝的数量
    fn enqueue_candidates(&mut self, candidates: Vec<CandidateFile>) -> usize {
        let mut rejected = 0;

        for candidate in candidates {
            match self.orchestrator.offer(candidate) {
                Ok(()) => {}
                Err(QueueError::Duplicate { name, size }) => {
                    debug!("跳过重复文件: {} ({} 字节)", name, size);
                }
                Err(e) => {
                    warn!("{}", e);
                    rejected += 1;
                }
            }
        }

        rejected
    }

    /// 写出 CSV
    async fn write_export(&self, results: &[SubmissionResult]) -> AppResult<()> {
        let document = export(results)?;
        let path = Path::new(&self.config.output_csv);

        tokio::fs::write(path, &document.bytes)
            .await
            .map_err(|e| FileError::write_failed(path.display().to_string(), e))?;

        debug!(
            "已写出 {} ({} 字节, {})",
            document.file_name,
            document.bytes.len(),
            document.media_type
        );
        Ok(())
    }
}

/// 启动时检查识别服务，失败只告警
async fn check_health(service: &ExtractionService) {
    info!("🩺 正在检查识别服务状态...");
    match service.health_check().await {
        Ok(health) if health.is_healthy() => {
            info!(
                "✓ 识别服务正常 ({})",
                health.service.as_deref().unwrap_or("unknown")
            );
        }
        Ok(health) => {
            warn!("⚠️ 识别服务状态异常: {}", health.status);
        }
        Err(e) => {
            warn!("⚠️ 无法连接识别服务: {}，仍将继续处理", e);
        }
    }
}
