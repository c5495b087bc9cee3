//! 候选文件
//!
//! 用户选择的一个待提交文件。身份由 (name, size) 决定。

use std::fmt;
use std::sync::Arc;

/// 候选文件
///
/// 一旦进入队列就不可变：字段私有，只暴露只读访问器。
/// 内容使用 `Arc` 共享，快照克隆时不会复制文件数据。
#[derive(Clone, PartialEq, Eq)]
pub struct CandidateFile {
    name: String,
    size: u64,
    media_type: String,
    content: Arc<Vec<u8>>,
}

impl CandidateFile {
    /// 创建候选文件，大小取内容长度
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: content.len() as u64,
            media_type: media_type.into(),
            content: Arc::new(content),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// 身份比较：名称和大小都相同即视为同一文件
    pub fn same_identity(&self, other: &CandidateFile) -> bool {
        self.name == other.name && self.size == other.size
    }
}

impl fmt::Debug for CandidateFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateFile")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("media_type", &self.media_type)
            .finish()
    }
}
