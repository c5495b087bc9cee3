//! 测试辅助：可编排的假识别服务

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::error::SubmissionError;
use crate::models::{CandidateFile, ExtractEntry};
use crate::services::Extractor;

pub fn pdf(name: &str, len: usize) -> CandidateFile {
    CandidateFile::new(name, "application/pdf", vec![b'%'; len])
}

/// 假服务对某个文件的预设反应
#[derive(Debug, Clone)]
pub enum Script {
    Found(String),
    NotFound,
    FoundWithoutCode,
    Renamed(String),
    Status(u16),
    Malformed,
}

/// 假识别服务
///
/// 记录调用顺序，并检查同一时间最多只有一个请求在途。
#[derive(Default)]
pub struct FakeExtractor {
    scripts: HashMap<String, Script>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, script: Script) -> Self {
        self.scripts.insert(name.to_string(), script);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

fn entry(filename: &str, barcode: Option<&str>, found: bool) -> ExtractEntry {
    ExtractEntry {
        filename: filename.to_string(),
        barcode: barcode.map(str::to_string),
        barcode_found: found,
        status: Some("success".to_string()),
        error_message: None,
        pages_processed: Some(1),
    }
}

#[async_trait]
impl Extractor for FakeExtractor {
    async fn extract(&self, file: &CandidateFile) -> Result<ExtractEntry, SubmissionError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.lock().unwrap().push(file.name().to_string());

        tokio::task::yield_now().await;

        let script = self
            .scripts
            .get(file.name())
            .cloned()
            .unwrap_or(Script::NotFound);

        let outcome = match script {
            Script::Found(code) => Ok(entry(file.name(), Some(&code), true)),
            Script::NotFound => Ok(entry(file.name(), Some("Not Found"), false)),
            Script::FoundWithoutCode => Ok(entry(file.name(), None, true)),
            Script::Renamed(name) => Ok(entry(&name, Some("1"), true)),
            Script::Status(status) => Err(SubmissionError::BadStatus {
                endpoint: "fake".to_string(),
                status,
            }),
            Script::Malformed => Err(SubmissionError::decode_failed("expected value at line 1")),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}
