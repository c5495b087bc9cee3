//! 条形码识别服务 - 业务能力层
//!
//! 只负责"把一个文件交给远端服务并取回第一条结果"，不关心批次

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::SubmissionError;
use crate::infrastructure::HttpExecutor;
use crate::models::{CandidateFile, ExtractEntry, ExtractResponse, HealthResponse};

/// 识别能力
///
/// 编排层只依赖这个 trait，测试时可以替换为假实现。
#[async_trait]
pub trait Extractor: Send + Sync {
    /// 提交单个文件，返回响应中的第一条结果
    async fn extract(&self, file: &CandidateFile) -> Result<ExtractEntry, SubmissionError>;
}

#[async_trait]
impl<T: Extractor + ?Sized> Extractor for Arc<T> {
    async fn extract(&self, file: &CandidateFile) -> Result<ExtractEntry, SubmissionError> {
        (**self).extract(file).await
    }
}

/// 远端识别服务
///
/// 职责：
/// - 一次请求只上传一个文件
/// - 解析响应，只取 `results[0]`
/// - 不出现 Vec<CandidateFile>
/// - 不决定 Found / NotFound
pub struct ExtractionService {
    executor: HttpExecutor,
    extract_url: String,
    health_url: String,
    form_field_name: String,
}

impl ExtractionService {
    /// 创建新的识别服务
    pub fn new(executor: HttpExecutor, config: &Config) -> Self {
        Self {
            executor,
            extract_url: config.extract_url(),
            health_url: config.health_url(),
            form_field_name: config.form_field_name.clone(),
        }
    }

    /// 检查服务健康状态
    pub async fn health_check(&self) -> Result<HealthResponse, SubmissionError> {
        self.executor.get_json(&self.health_url).await
    }

    /// 解析响应体并取出第一条结果
    pub fn decode_first_entry(body: &str) -> Result<ExtractEntry, SubmissionError> {
        let response: ExtractResponse =
            serde_json::from_str(body).map_err(SubmissionError::decode_failed)?;

        if let Some(message) = &response.message {
            debug!("服务消息: {}", message);
        }

        let count = response.results.len();
        let mut results = response.results.into_iter();
        let first = results.next().ok_or(SubmissionError::EmptyResults)?;

        if count > 1 {
            warn!("响应包含 {} 条结果，只使用第一条", count);
        }

        Ok(first)
    }
}

#[async_trait]
impl Extractor for ExtractionService {
    async fn extract(&self, file: &CandidateFile) -> Result<ExtractEntry, SubmissionError> {
        let body = self
            .executor
            .post_file(&self.extract_url, &self.form_field_name, file)
            .await?;

        Self::decode_first_entry(&body)
    }
}
