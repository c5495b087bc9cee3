use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 识别服务根地址
    pub api_base_url: String,
    /// 提取条形码接口路径
    pub extract_path: String,
    /// 健康检查接口路径
    pub health_path: String,
    /// multipart 表单中的文件字段名
    pub form_field_name: String,
    /// 接受的文件类型
    pub accepted_media_type: String,
    /// 单次请求超时（秒），由传输层负责
    pub request_timeout_secs: u64,
    /// 导出的 CSV 文件路径
    pub output_csv: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 启动时是否检查服务健康状态
    pub check_health: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://extractor-numeric-codebar.onrender.com".to_string(),
            extract_path: "/api/extract-barcodes".to_string(),
            health_path: "/api/health".to_string(),
            form_field_name: "files".to_string(),
            accepted_media_type: "application/pdf".to_string(),
            request_timeout_secs: 120,
            output_csv: "codigos_barras.csv".to_string(),
            verbose_logging: false,
            check_health: true,
        }
    }
}

impl Config {
    /// 在默认值之上应用环境变量
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 读取 TOML 配置文件（如果存在），再应用环境变量
    ///
    /// 文件路径取自 `BARCODE_CONFIG`，未设置时使用 `config.toml`。
    /// 显式指定的文件不存在时报错，默认文件不存在时直接使用默认值。
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var("BARCODE_CONFIG").ok();
        let path = explicit.clone().unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

        let config = if explicit.is_some() || Path::new(&path).exists() {
            Self::from_file(&path)?.with_env_overrides()
        } else {
            Self::from_env()
        };

        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件加载配置
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_string(),
            source,
        })
    }

    /// 从 TOML 字符串解析配置，缺失字段使用默认值
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn with_env_overrides(self) -> Self {
        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(self.api_base_url),
            extract_path: std::env::var("EXTRACT_PATH").unwrap_or(self.extract_path),
            health_path: std::env::var("HEALTH_PATH").unwrap_or(self.health_path),
            form_field_name: std::env::var("FORM_FIELD_NAME").unwrap_or(self.form_field_name),
            accepted_media_type: std::env::var("ACCEPTED_MEDIA_TYPE").unwrap_or(self.accepted_media_type),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.request_timeout_secs),
            output_csv: std::env::var("OUTPUT_CSV").unwrap_or(self.output_csv),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            check_health: std::env::var("CHECK_HEALTH").ok().and_then(|v| v.parse().ok()).unwrap_or(self.check_health),
        }
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "api_base_url".to_string(),
                reason: "不能为空".to_string(),
            });
        }
        if self.accepted_media_type.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "accepted_media_type".to_string(),
                reason: "不能为空".to_string(),
            });
        }
        Ok(())
    }

    /// 提取接口完整地址
    pub fn extract_url(&self) -> String {
        join_url(&self.api_base_url, &self.extract_path)
    }

    /// 健康检查接口完整地址
    pub fn health_url(&self) -> String {
        join_url(&self.api_base_url, &self.health_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let config = Config::default();
        assert_eq!(
            config.extract_url(),
            "https://extractor-numeric-codebar.onrender.com/api/extract-barcodes"
        );
        assert_eq!(
            config.health_url(),
            "https://extractor-numeric-codebar.onrender.com/api/health"
        );
    }

    #[test]
    fn test_join_url_slashes() {
        assert_eq!(join_url("http://x/", "/a"), "http://x/a");
        assert_eq!(join_url("http://x", "a"), "http://x/a");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            api_base_url = "http://localhost:8000"
            request_timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.form_field_name, "files");
        assert_eq!(config.output_csv, "codigos_barras.csv");
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let config = Config {
            api_base_url: "  ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
