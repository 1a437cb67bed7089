use crate::error::{QuizError, Result};
use crate::logger;
use crate::models::{Question, Quiz, QuizSummary};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub const SAMPLE_QUIZ_ID: &str = "math-101";

/// Source of quiz content, looked up by id.
#[async_trait]
pub trait QuizCatalog: Send + Sync {
    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>>;
    async fn load_quiz(&self, id: &str) -> Result<Quiz>;
}

pub fn sample_quiz() -> Quiz {
    Quiz {
        id: SAMPLE_QUIZ_ID.to_string(),
        title: "Adaptive Mathematics Assessment".to_string(),
        subject: "Advanced Mathematics".to_string(),
        difficulty: "Adaptive".to_string(),
        total_questions: 10,
        questions: vec![
            Question {
                id: 1,
                prompt: "If f(x) = 2x² - 3x + 1, what is f(3)?".to_string(),
                options: vec![
                    "28".to_string(),
                    "10".to_string(),
                    "16".to_string(),
                    "22".to_string(),
                ],
                correct: 1,
                explanation: "f(3) = 2(3)² - 3(3) + 1 = 18 - 9 + 1 = 10".to_string(),
                difficulty: "Medium".to_string(),
                topic: "Quadratic Functions".to_string(),
            },
            Question {
                id: 2,
                prompt: "Solve for x: 2x + 5 = 3x - 7".to_string(),
                options: vec![
                    "x = -12".to_string(),
                    "x = 12".to_string(),
                    "x = 2".to_string(),
                    "x = -2".to_string(),
                ],
                correct: 1,
                explanation: "2x + 5 = 3x - 7 → 5 + 7 = 3x - 2x → x = 12".to_string(),
                difficulty: "Easy".to_string(),
                topic: "Linear Equations".to_string(),
            },
        ],
    }
}

/// Serves the built-in sample quiz only.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticCatalog;

#[async_trait]
impl QuizCatalog for StaticCatalog {
    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>> {
        Ok(vec![sample_quiz().summary()])
    }

    async fn load_quiz(&self, id: &str) -> Result<Quiz> {
        if id == SAMPLE_QUIZ_ID {
            Ok(sample_quiz())
        } else {
            Err(QuizError::NotFound(id.to_string()))
        }
    }
}

/// One `<id>.json` file per quiz inside a directory.
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    dir: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn quiz_files(&self) -> Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|source| QuizError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| QuizError::Io {
                path: self.dir.clone(),
                source,
            })?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    async fn read_quiz(path: &Path) -> Result<Quiz> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| QuizError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let quiz: Quiz = serde_json::from_str(&content).map_err(|source| QuizError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        quiz.validate()?;
        Ok(quiz)
    }
}

#[async_trait]
impl QuizCatalog for DirectoryCatalog {
    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>> {
        let mut summaries = Vec::new();
        for path in self.quiz_files().await? {
            match Self::read_quiz(&path).await {
                Ok(quiz) => summaries.push(quiz.summary()),
                Err(e) => logger::log(&format!("Skipping quiz file: {}", e)),
            }
        }
        Ok(summaries)
    }

    async fn load_quiz(&self, id: &str) -> Result<Quiz> {
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            return Err(QuizError::NotFound(id.to_string()));
        }

        let path = self.dir.join(format!("{}.json", id));
        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|source| QuizError::Io {
                path: path.clone(),
                source,
            })?;
        if !exists {
            return Err(QuizError::NotFound(id.to_string()));
        }

        let mut quiz = Self::read_quiz(&path).await?;
        if quiz.id.is_empty() {
            quiz.id = id.to_string();
        }
        logger::log(&format!(
            "Loaded quiz {} with {} questions",
            quiz.id,
            quiz.questions.len()
        ));
        Ok(quiz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_quiz(dir: &Path, name: &str, quiz: &Quiz) {
        let json = serde_json::to_string_pretty(quiz).unwrap();
        std::fs::write(dir.join(name), json).unwrap();
    }

    #[test]
    fn test_sample_quiz_is_valid() {
        let quiz = sample_quiz();
        assert!(quiz.validate().is_ok());
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.total_questions, 10);
        assert_eq!(quiz.questions[0].options[quiz.questions[0].correct], "10");
        assert_eq!(quiz.questions[1].options[quiz.questions[1].correct], "x = 12");
    }

    #[tokio::test]
    async fn test_static_catalog_loads_sample() {
        let catalog = StaticCatalog;
        let quiz = catalog.load_quiz(SAMPLE_QUIZ_ID).await.unwrap();
        assert_eq!(quiz, sample_quiz());

        let listing = catalog.list_quizzes().await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].id, SAMPLE_QUIZ_ID);
    }

    #[tokio::test]
    async fn test_static_catalog_unknown_id() {
        let err = StaticCatalog.load_quiz("history").await.unwrap_err();
        assert!(matches!(err, QuizError::NotFound(id) if id == "history"));
    }

    #[tokio::test]
    async fn test_directory_catalog_lists_sorted_and_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut b = sample_quiz();
        b.id = "b-quiz".to_string();
        let mut a = sample_quiz();
        a.id = "a-quiz".to_string();
        write_quiz(dir.path(), "b-quiz.json", &b);
        write_quiz(dir.path(), "a-quiz.json", &a);
        std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let catalog = DirectoryCatalog::new(dir.path());
        let listing = catalog.list_quizzes().await.unwrap();
        let ids: Vec<&str> = listing.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a-quiz", "b-quiz"]);
    }

    #[tokio::test]
    async fn test_directory_catalog_load_by_id() {
        let dir = tempfile::tempdir().unwrap();
        write_quiz(dir.path(), "math-101.json", &sample_quiz());

        let catalog = DirectoryCatalog::new(dir.path());
        let quiz = catalog.load_quiz("math-101").await.unwrap();
        assert_eq!(quiz.title, "Adaptive Mathematics Assessment");
    }

    #[tokio::test]
    async fn test_directory_catalog_missing_and_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = DirectoryCatalog::new(dir.path());

        assert!(matches!(
            catalog.load_quiz("nope").await,
            Err(QuizError::NotFound(_))
        ));
        assert!(matches!(
            catalog.load_quiz("../etc/passwd").await,
            Err(QuizError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_directory_catalog_rejects_invalid_quiz() {
        let dir = tempfile::tempdir().unwrap();
        let mut quiz = sample_quiz();
        quiz.questions[0].correct = 9;
        write_quiz(dir.path(), "math-101.json", &quiz);

        let err = DirectoryCatalog::new(dir.path())
            .load_quiz("math-101")
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::Invalid { .. }));
    }

    #[tokio::test]
    async fn test_directory_catalog_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "[]").unwrap();

        let err = DirectoryCatalog::new(dir.path())
            .load_quiz("bad")
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_directory_catalog_missing_dir() {
        let catalog = DirectoryCatalog::new("/definitely/not/here");
        assert!(matches!(
            catalog.list_quizzes().await,
            Err(QuizError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn test_directory_catalog_dir_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("quizzes");
        std::fs::write(&file, "not a directory").unwrap();

        let catalog = DirectoryCatalog::new(&file);
        match catalog.list_quizzes().await {
            Err(QuizError::Io { path, .. }) => assert_eq!(path, file),
            other => panic!("expected an io error, got {:?}", other.map(|l| l.len())),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_directory_catalog_unreadable_dir_is_io_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        std::fs::create_dir(&locked).unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();
        // root ignores permission bits
        let denied = std::fs::metadata(locked.join("math-101.json"))
            .is_err_and(|e| e.kind() == std::io::ErrorKind::PermissionDenied);

        let result = DirectoryCatalog::new(&locked).load_quiz("math-101").await;
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

        if denied {
            assert!(matches!(result, Err(QuizError::Io { .. })));
        } else {
            assert!(matches!(result, Err(QuizError::NotFound(_))));
        }
    }
}
