//! 待提交队列
//!
//! 插入顺序即提交顺序；同一 (name, size) 只保留一份。
//! 每次修改都会重新发布"队列是否为空"信号，提交/清空按钮依赖它。

use tokio::sync::watch;
use tracing::debug;

use crate::error::QueueError;
use crate::models::CandidateFile;
use crate::services::{ItemValidator, QueueMutation};

/// 待提交队列
#[derive(Debug)]
pub struct FileQueue {
    items: Vec<CandidateFile>,
    empty_tx: watch::Sender<bool>,
}

impl FileQueue {
    pub fn new() -> Self {
        let (empty_tx, _) = watch::channel(true);
        Self {
            items: Vec::new(),
            empty_tx,
        }
    }

    /// 追加到队尾；(name, size) 已存在时不做任何修改并返回 `Duplicate`
    pub fn enqueue(&mut self, item: CandidateFile) -> Result<(), QueueError> {
        let result = if self.items.iter().any(|queued| queued.same_identity(&item)) {
            Err(QueueError::Duplicate {
                name: item.name().to_string(),
                size: item.size(),
            })
        } else {
            debug!("入队: {} ({} 字节)", item.name(), item.size());
            self.items.push(item);
            Ok(())
        };

        self.publish_empty();
        result
    }

    /// 校验后入队
    pub fn offer(&mut self, validator: &ItemValidator, candidate: CandidateFile) -> Result<(), QueueError> {
        match validator.accept(candidate, &self.items) {
            QueueMutation::Enqueue(item) => self.enqueue(item),
            QueueMutation::Rejected(err) => Err(err),
        }
    }

    /// 删除指定位置的文件，其余文件保持相对顺序
    pub fn remove_at(&mut self, index: usize) -> Result<CandidateFile, QueueError> {
        if index >= self.items.len() {
            return Err(QueueError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }

        let removed = self.items.remove(index);
        debug!("移出队列: {}", removed.name());
        self.publish_empty();
        Ok(removed)
    }

    /// 清空队列，可重复调用
    pub fn clear(&mut self) {
        self.items.clear();
        self.publish_empty();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[CandidateFile] {
        &self.items
    }

    /// 批次开始时的只读快照，之后对队列的修改不会影响它
    pub fn snapshot(&self) -> Vec<CandidateFile> {
        self.items.clone()
    }

    /// 订阅"队列是否为空"信号
    pub fn subscribe_empty(&self) -> watch::Receiver<bool> {
        self.empty_tx.subscribe()
    }

    fn publish_empty(&self) {
        self.empty_tx.send_replace(self.items.is_empty());
    }
}

impl Default for FileQueue {
    fn default() -> Self {
        Self::new()
    }
}
