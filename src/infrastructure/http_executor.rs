//! HTTP 执行器 - 基础设施层
//!
//! 持有唯一的 HTTP 客户端，只暴露"发送请求"的能力

use crate::error::SubmissionError;
use crate::models::CandidateFile;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// HTTP 执行器
///
/// 职责：
/// - 持有唯一的 reqwest Client（内部连接池）
/// - 暴露 multipart 上传和 JSON GET 能力
/// - 不认识 SubmissionResult
/// - 不处理业务流程
#[derive(Clone)]
pub struct HttpExecutor {
    client: Client,
}

impl HttpExecutor {
    /// 创建新的 HTTP 执行器
    ///
    /// 超时属于传输层策略，编排层不会中途取消请求。
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// 以 multipart 表单上传单个文件，返回响应体文本
    ///
    /// 非 2xx 状态码视为提交失败。
    pub async fn post_file(
        &self,
        url: &str,
        field_name: &str,
        file: &CandidateFile,
    ) -> Result<String, SubmissionError> {
        let part = Part::bytes(file.content().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.media_type())
            .map_err(|e| SubmissionError::request_failed(url, e))?;

        let form = Form::new().part(field_name.to_string(), part);

        debug!("上传文件 {} ({} 字节) -> {}", file.name(), file.size(), url);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SubmissionError::request_failed(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::BadStatus {
                endpoint: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SubmissionError::request_failed(url, e))?;

        debug!("响应长度: {} 字节", body.len());

        Ok(body)
    }

    /// 发送 GET 请求并反序列化为指定类型
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, SubmissionError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SubmissionError::request_failed(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::BadStatus {
                endpoint: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SubmissionError::request_failed(url, e))?;

        serde_json::from_str(&body).map_err(SubmissionError::decode_failed)
    }
}
