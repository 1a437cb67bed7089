pub mod catalog;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod recorder;
pub mod session;
pub mod timer;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use catalog::{sample_quiz, DirectoryCatalog, QuizCatalog, StaticCatalog, SAMPLE_QUIZ_ID};
pub use config::AppConfig;
pub use error::QuizError;
pub use models::{AppState, OptionMark, Question, Quiz, QuizResult, QuizSummary, SessionPhase, TimerTick};
pub use recorder::{LogRecorder, MemoryRecorder, ResultRecorder};
pub use session::{handle_quiz_input, QuizSession};
pub use timer::SessionTimer;
pub use ui::{draw_menu, draw_quit_confirmation, draw_quiz, draw_summary};
pub use utils::{format_time, recommendation, truncate_string};
