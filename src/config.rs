use std::path::PathBuf;

pub const DEFAULT_QUIZ_DIR: &str = "quizzes";
pub const DEFAULT_LOG_FILE: &str = "quiz_debug.log";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub quiz_dir: PathBuf,
    pub log_file: PathBuf,
    /// Quiz to open directly instead of showing the menu.
    pub quiz_id: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            quiz_dir: PathBuf::from(DEFAULT_QUIZ_DIR),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            quiz_id: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            quiz_dir: non_empty("QUIZ_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.quiz_dir),
            log_file: non_empty("QUIZ_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
            quiz_id: non_empty("QUIZ_ID"),
        }
    }

    /// A quiz id given on the command line takes precedence over `QUIZ_ID`.
    pub fn with_args(mut self, mut args: impl Iterator<Item = String>) -> Self {
        if let Some(id) = args.next().filter(|a| !a.trim().is_empty()) {
            self.quiz_id = Some(id);
        }
        self
    }
}
