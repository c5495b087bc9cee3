use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 导出错误
    #[error("导出错误: {0}")]
    Export(#[from] ExportError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

/// 队列与校验错误
///
/// `RejectedType` 和 `Duplicate` 是校验结果，调用方可以直接跳过；
/// `OutOfRange` 说明调用方传入了错误的索引。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// 文件类型不被接受
    #[error("文件 \"{name}\" 不是有效的 {expected} 文件 (声明类型: {media_type})")]
    RejectedType {
        name: String,
        media_type: String,
        expected: String,
    },
    /// 队列中已存在相同 (name, size) 的文件
    #[error("文件 \"{name}\" ({size} 字节) 已在队列中")]
    Duplicate { name: String, size: u64 },
    /// 索引超出范围
    #[error("索引 {index} 超出范围 (队列长度: {len})")]
    OutOfRange { index: usize, len: usize },
}

/// 单个文件提交错误
///
/// 这类错误永远不会越过单个文件：流程层会把它们转换为 `Failed` 结果。
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// 网络请求失败
    #[error("请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务返回非成功状态码
    #[error("服务返回错误状态 ({endpoint}): {status}")]
    BadStatus { endpoint: String, status: u16 },
    /// 响应无法解析
    #[error("响应解析失败: {0}")]
    DecodeFailed(String),
    /// 响应中没有任何结果
    #[error("响应中 results 为空")]
    EmptyResults,
}

/// 导出错误
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV 写入失败
    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),
    /// 缓冲区刷新失败
    #[error("缓冲区刷新失败: {0}")]
    Flush(#[from] std::io::Error),
    /// 输出不是合法的 UTF-8
    #[error("输出不是合法的 UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("无法读取配置文件 {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 配置值非法
    #[error("配置项 {key} 非法: {reason}")]
    Invalid { key: String, reason: String },
}

// ========== 便捷构造函数 ==========

impl SubmissionError {
    /// 创建请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        SubmissionError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// 创建解析失败错误
    pub fn decode_failed(reason: impl std::fmt::Display) -> Self {
        SubmissionError::DecodeFailed(reason.to_string())
    }
}

impl FileError {
    /// 创建文件读取错误
    pub fn read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return FileError::NotFound { path: path.into() };
        }
        FileError::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// 创建文件写入错误
    pub fn write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        FileError::WriteFailed {
            path: path.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
