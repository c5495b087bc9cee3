//! 批次编排器 - 编排层
//!
//! ## 职责
//!
//! 持有待提交队列，按快照顺序逐个提交文件，产出有序的结果列表。
//!
//! ## 状态机
//!
//! ```text
//! Idle ──run()──▶ Running(i/total) ──最后一个文件──▶ Idle
//! ```
//!
//! 全部成功和部分失败走同一条结束路径，只有结果列表不同。
//!
//! ## 并发模型
//!
//! - 同一时间只有一个请求在途，唯一的挂起点是等待远端响应
//! - `run()` 返回的事件流持有 `&mut self`，运行期间队列无法被修改，
//!   也无法启动第二个批次
//! - 结果按输入顺序追加，不需要锁
//! - 运行期间的进度通过 `subscribe_state()` 返回的 watch 通道读取

use futures::stream::{self, FusedStream, StreamExt};
use std::pin::pin;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::QueueError;
use crate::models::{CandidateFile, SubmissionResult};
use crate::orchestrator::file_queue::FileQueue;
use crate::services::{Extractor, ItemValidator, ProgressReporter, ProgressUpdate};
use crate::workflow::{ItemCtx, SubmitFlow};

/// 编排器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    Running { completed: usize, total: usize },
}

impl BatchState {
    /// 进度投影，空闲时为 None
    pub fn progress(&self) -> Option<ProgressUpdate> {
        match *self {
            BatchState::Running { completed, total } => Some(ProgressUpdate::new(completed, total)),
            BatchState::Idle => None,
        }
    }
}

/// 批次事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// 即将提交第 `completed` 个文件
    Progress(ProgressUpdate),
    /// 刚完成的文件的结果
    Result(SubmissionResult),
}

/// 批次编排器
pub struct BatchOrchestrator<E> {
    flow: SubmitFlow<E>,
    validator: ItemValidator,
    queue: FileQueue,
    state_tx: watch::Sender<BatchState>,
    results: Vec<SubmissionResult>,
}

impl<E: Extractor> BatchOrchestrator<E> {
    pub fn new(extractor: E, validator: ItemValidator) -> Self {
        Self {
            flow: SubmitFlow::new(extractor),
            validator,
            queue: FileQueue::new(),
            state_tx: watch::channel(BatchState::Idle).0,
            results: Vec::new(),
        }
    }

    pub fn extractor(&self) -> &E {
        self.flow.extractor()
    }

    // ========== 队列操作 ==========

    /// 校验并入队一个候选文件
    pub fn offer(&mut self, candidate: CandidateFile) -> Result<(), QueueError> {
        self.queue.offer(&self.validator, candidate)
    }

    /// 直接入队已接受的文件
    pub fn enqueue(&mut self, item: CandidateFile) -> Result<(), QueueError> {
        self.queue.enqueue(item)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<CandidateFile, QueueError> {
        self.queue.remove_at(index)
    }

    /// 清空队列，同时丢弃上一个批次的结果
    pub fn clear(&mut self) {
        self.queue.clear();
        self.results.clear();
        self.set_state(BatchState::Idle);
    }

    pub fn subscribe_empty(&self) -> watch::Receiver<bool> {
        self.queue.subscribe_empty()
    }

    /// 订阅编排器状态，每处理一个文件前发布一次
    ///
    /// 接收端不借用编排器，批次运行期间也可以读取。
    pub fn subscribe_state(&self) -> watch::Receiver<BatchState> {
        self.state_tx.subscribe()
    }

    // ========== 只读投影 ==========

    pub fn queue(&self) -> &FileQueue {
        &self.queue
    }

    pub fn state(&self) -> BatchState {
        *self.state_tx.borrow()
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state(), BatchState::Running { .. })
    }

    /// 当前进度，空闲时为 None
    pub fn progress(&self) -> Option<ProgressUpdate> {
        self.state().progress()
    }

    /// 最近一个批次的结果（运行中为已完成的部分）
    pub fn results(&self) -> &[SubmissionResult] {
        &self.results
    }

    // ========== 批次执行 ==========

    /// 启动一个批次，返回惰性事件流
    ///
    /// 调用时立即对队列做快照。每个文件先产出一个 `Progress`，
    /// 再产出一个 `Result`。队列为空时事件流直接结束。
    /// 全部文件处理完后队列被清空；事件流中途被丢弃时队列保持不变。
    pub fn run<'a>(&'a mut self) -> impl FusedStream<Item = BatchEvent> + 'a
    where
        E: 'a,
    {
        let snapshot = self.queue.snapshot();
        self.results.clear();

        if !snapshot.is_empty() {
            info!("📦 开始处理批次: 共 {} 个文件", snapshot.len());
            self.set_state(BatchState::Running {
                completed: 0,
                total: snapshot.len(),
            });
        }

        let run = BatchRun {
            orchestrator: self,
            snapshot,
            cursor: 0,
            phase: Phase::Announce,
        };

        stream::unfold(run, |mut run| async move {
            let event = run.step().await;
            event.map(|event| (event, run))
        })
        .fuse()
    }

    /// 跑完整个批次，把事件转发给观察者，返回有序结果
    pub async fn run_to_end(&mut self, reporter: &dyn ProgressReporter) -> Vec<SubmissionResult> {
        {
            let mut events = pin!(self.run());
            while let Some(event) = events.next().await {
                match &event {
                    BatchEvent::Progress(update) => reporter.on_progress(*update),
                    BatchEvent::Result(result) => reporter.on_result(result),
                }
            }
        }
        self.results.clone()
    }

    fn set_state(&self, state: BatchState) {
        self.state_tx.send_replace(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Announce,
    Submit,
    Done,
}

/// 一次批次运行：快照、游标和对编排器的独占借用
struct BatchRun<'a, E> {
    orchestrator: &'a mut BatchOrchestrator<E>,
    snapshot: Vec<CandidateFile>,
    cursor: usize,
    phase: Phase,
}

impl<'a, E: Extractor> BatchRun<'a, E> {
    async fn step(&mut self) -> Option<BatchEvent> {
        let total = self.snapshot.len();

        match self.phase {
            Phase::Announce => {
                if self.cursor >= total {
                    self.finish();
                    return None;
                }

                let update = ProgressUpdate::new(self.cursor + 1, total);
                self.orchestrator.set_state(BatchState::Running {
                    completed: update.completed,
                    total,
                });
                self.phase = Phase::Submit;
                Some(BatchEvent::Progress(update))
            }
            Phase::Submit => {
                let item = &self.snapshot[self.cursor];
                let ctx = ItemCtx::new(self.cursor + 1, total, item.name());

                let result = self.orchestrator.flow.run(item, &ctx).await;

                self.orchestrator.results.push(result.clone());
                self.cursor += 1;

                // 交出最后一个结果前收尾
                if self.cursor == total {
                    self.finish();
                } else {
                    self.phase = Phase::Announce;
                }
                Some(BatchEvent::Result(result))
            }
            Phase::Done => None,
        }
    }

    fn finish(&mut self) {
        self.phase = Phase::Done;

        if self.snapshot.is_empty() {
            return;
        }

        let failed = self
            .orchestrator
            .results
            .iter()
            .filter(|r| r.is_failed())
            .count();
        info!(
            "✓ 批次完成: {} 个文件, {} 个失败",
            self.snapshot.len(),
            failed
        );

        self.orchestrator.queue.clear();
        self.orchestrator.set_state(BatchState::Idle);
    }
}

impl<'a, E> Drop for BatchRun<'a, E> {
    fn drop(&mut self) {
        if self.phase != Phase::Done && *self.orchestrator.state_tx.borrow() != BatchState::Idle {
            warn!(
                "⚠️ 批次在第 {}/{} 个文件处中断，队列保持不变",
                self.cursor,
                self.snapshot.len()
            );
            self.orchestrator.state_tx.send_replace(BatchState::Idle);
        }
    }
}
