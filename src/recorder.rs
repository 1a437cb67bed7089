use crate::error::QuizError;
use crate::logger;
use crate::models::QuizResult;
use std::sync::{Arc, Mutex};

/// Receives the outcome of a quiz attempt. The session calls it once, when the
/// attempt completes.
pub trait ResultRecorder {
    fn record(&self, result: &QuizResult) -> Result<(), QuizError>;
}

/// Writes each result as a JSON line into the debug log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRecorder;

impl ResultRecorder for LogRecorder {
    fn record(&self, result: &QuizResult) -> Result<(), QuizError> {
        let line =
            serde_json::to_string(result).map_err(|e| QuizError::SaveFailed(e.to_string()))?;
        logger::log(&format!("result {}", line));
        Ok(())
    }
}

/// Keeps results in memory. Clones share the same list.
#[derive(Debug, Default, Clone)]
pub struct MemoryRecorder {
    results: Arc<Mutex<Vec<QuizResult>>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> Vec<QuizResult> {
        self.results
            .lock()
            .map(|results| results.clone())
            .unwrap_or_default()
    }
}

impl ResultRecorder for MemoryRecorder {
    fn record(&self, result: &QuizResult) -> Result<(), QuizError> {
        let mut results = self
            .results
            .lock()
            .map_err(|_| QuizError::SaveFailed("result store poisoned".to_string()))?;
        results.push(result.clone());
        Ok(())
    }
}
