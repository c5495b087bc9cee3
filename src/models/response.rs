//! 识别服务响应结构

use serde::{Deserialize, Deserializer};

/// `POST /api/extract-barcodes` 的响应体
///
/// 只有 `results` 是必需的，其余字段仅用于日志。
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractResponse {
    pub results: Vec<ExtractEntry>,
    #[serde(default)]
    pub message: Option<String>,
}

/// 单个文件的识别结果
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractEntry {
    pub filename: String,
    /// 键必须存在，值可以为 null
    #[serde(deserialize_with = "required_nullable")]
    pub barcode: Option<String>,
    pub barcode_found: bool,
    /// 服务端处理状态："success" 或 "error"
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub pages_processed: Option<u32>,
}

fn required_nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

impl ExtractEntry {
    /// 服务端是否报告了处理错误
    pub fn server_error(&self) -> Option<&str> {
        if self.status.as_deref() == Some("error") {
            Some(self.error_message.as_deref().unwrap_or("未知错误"))
        } else {
            None
        }
    }
}

/// `GET /api/health` 的响应体
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_server_response() {
        let body = r#"{
            "success": true,
            "message": "Processados 1 arquivo(s)",
            "statistics": {"total_files": 1, "successful_extractions": 1, "failed_extractions": 0, "errors": 0},
            "results": [{
                "filename": "a.pdf",
                "status": "success",
                "barcode_found": true,
                "barcode": "12345",
                "pages_processed": 2
            }],
            "timestamp": 1700000000.0
        }"#;

        let response: ExtractResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.results.len(), 1);
        let entry = &response.results[0];
        assert!(entry.barcode_found);
        assert_eq!(entry.barcode.as_deref(), Some("12345"));
        assert_eq!(entry.pages_processed, Some(2));
        assert!(entry.server_error().is_none());
    }

    #[test]
    fn test_missing_barcode_found_is_rejected() {
        let body = r#"{"results": [{"filename": "a.pdf", "barcode": null}]}"#;
        assert!(serde_json::from_str::<ExtractResponse>(body).is_err());
    }

    #[test]
    fn test_barcode_key_is_required_but_nullable() {
        let missing = r#"{"results": [{"filename": "a.pdf", "barcode_found": false}]}"#;
        assert!(serde_json::from_str::<ExtractResponse>(missing).is_err());

        let null = r#"{"results": [{"filename": "a.pdf", "barcode": null, "barcode_found": false}]}"#;
        let response: ExtractResponse = serde_json::from_str(null).unwrap();
        assert_eq!(response.results[0].barcode, None);
    }

    #[test]
    fn test_server_error_entry() {
        let body = r#"{"results": [{
            "filename": "a.pdf", "status": "error", "error_message": "Arquivo não é PDF",
            "barcode_found": false, "barcode": null
        }]}"#;
        let response: ExtractResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.results[0].server_error(), Some("Arquivo não é PDF"));
    }
}
