use crate::logger;
use crate::models::{AppState, OptionMark, Question, Quiz, QuizResult, SessionPhase, TimerTick};
use crate::recorder::ResultRecorder;
use crate::timer::{SessionTimer, DEFAULT_TICK_PERIOD};
use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc::UnboundedSender;

/// State of one attempt at a quiz. Phase, marks and progress are derived from the
/// stored fields on every read.
pub struct QuizSession {
    pub quiz: Quiz,
    pub current_index: usize,
    pub selected: Option<usize>,
    pub answers: Vec<Option<usize>>,
    pub showing_feedback: bool,
    pub completed: bool,
    pub elapsed_secs: u64,
    pub last_error: Option<String>,
    recorder: Box<dyn ResultRecorder>,
    timer: Option<SessionTimer>,
    tick_tx: Option<UnboundedSender<TimerTick>>,
    epoch: u64,
}

impl std::fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizSession")
            .field("quiz_id", &self.quiz.id)
            .field("current_index", &self.current_index)
            .field("selected", &self.selected)
            .field("answers", &self.answers)
            .field("showing_feedback", &self.showing_feedback)
            .field("completed", &self.completed)
            .field("elapsed_secs", &self.elapsed_secs)
            .field("epoch", &self.epoch)
            .finish()
    }
}

impl QuizSession {
    pub fn new(quiz: Quiz, recorder: Box<dyn ResultRecorder>) -> Self {
        let answers = vec![None; quiz.questions.len()];
        Self {
            quiz,
            current_index: 0,
            selected: None,
            answers,
            showing_feedback: false,
            completed: false,
            elapsed_secs: 0,
            last_error: None,
            recorder,
            timer: None,
            tick_tx: None,
            epoch: 0,
        }
    }

    /// Attach the channel timer ticks are delivered on and start counting.
    /// Requires a tokio runtime.
    pub fn start_timer(&mut self, tx: UnboundedSender<TimerTick>) {
        self.tick_tx = Some(tx);
        self.spawn_timer();
    }

    fn spawn_timer(&mut self) {
        if self.completed {
            return;
        }
        if let Some(tx) = &self.tick_tx {
            self.timer = Some(SessionTimer::spawn(DEFAULT_TICK_PERIOD, self.epoch, tx.clone()));
        }
    }

    fn stop_timer(&mut self) {
        self.timer = None;
        self.epoch += 1;
    }

    pub fn timer_running(&self) -> bool {
        self.timer.as_ref().is_some_and(SessionTimer::is_running)
    }

    /// Count a tick from the live timer. Ticks from a released timer are ignored.
    pub fn apply_tick(&mut self, tick: TimerTick) -> bool {
        if self.completed || tick.epoch != self.epoch || self.timer.is_none() {
            return false;
        }
        self.elapsed_secs += 1;
        true
    }

    pub fn question_count(&self) -> usize {
        self.quiz.questions.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.questions.get(self.current_index)
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.question_count()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.completed {
            SessionPhase::Completed
        } else if self.showing_feedback {
            SessionPhase::Feedback
        } else {
            SessionPhase::Answering
        }
    }

    pub fn can_select(&self) -> bool {
        self.current_question().is_some() && self.phase() == SessionPhase::Answering
    }

    pub fn can_submit(&self) -> bool {
        self.can_select() && self.selected.is_some()
    }

    pub fn can_next(&self) -> bool {
        self.current_question().is_some() && self.phase() == SessionPhase::Feedback
    }

    pub fn can_previous(&self) -> bool {
        !self.completed && self.current_index > 0
    }

    pub fn select_answer(&mut self, option: usize) -> bool {
        let in_range = self
            .current_question()
            .is_some_and(|q| option < q.options.len());
        if !self.can_select() || !in_range {
            logger::log(&format!(
                "Rejected select {} at question {}",
                option, self.current_index
            ));
            return false;
        }
        self.selected = Some(option);
        true
    }

    pub fn submit(&mut self) -> bool {
        if !self.can_submit() {
            logger::log(&format!(
                "Rejected submit at question {} (nothing selected)",
                self.current_index
            ));
            return false;
        }
        self.answers[self.current_index] = self.selected;
        self.showing_feedback = true;
        logger::log(&format!(
            "Submitted option {:?} for question {}",
            self.selected, self.current_index
        ));
        true
    }

    pub fn next(&mut self) -> bool {
        if !self.can_next() {
            logger::log(&format!(
                "Rejected next at question {}",
                self.current_index
            ));
            return false;
        }

        self.showing_feedback = false;
        self.selected = None;

        if self.is_last_question() {
            self.complete();
        } else {
            self.current_index += 1;
        }
        true
    }

    pub fn previous(&mut self) -> bool {
        if !self.can_previous() {
            logger::log("Rejected previous at first question");
            return false;
        }
        self.current_index -= 1;
        self.selected = self.answers[self.current_index];
        self.showing_feedback = false;
        true
    }

    /// Start the attempt over: fresh state, elapsed back to zero, new timer.
    pub fn reset(&mut self) {
        self.stop_timer();
        self.current_index = 0;
        self.selected = None;
        self.answers = vec![None; self.question_count()];
        self.showing_feedback = false;
        self.completed = false;
        self.elapsed_secs = 0;
        self.last_error = None;
        self.spawn_timer();
        logger::log(&format!("Session reset for quiz {}", self.quiz.id));
    }

    fn complete(&mut self) {
        self.completed = true;
        self.stop_timer();

        let result = self.result();
        logger::log(&format!(
            "Quiz {} completed: score {} in {}s",
            result.quiz_id, result.score, result.elapsed_secs
        ));
        match self.recorder.record(&result) {
            Ok(()) => self.last_error = None,
            Err(e) => {
                logger::log(&format!("Recording result failed: {}", e));
                self.last_error = Some(e.to_string());
            }
        }
    }

    pub fn result(&self) -> QuizResult {
        QuizResult {
            quiz_id: self.quiz.id.clone(),
            score: self.compute_score(),
            correct_count: self.correct_count(),
            question_count: self.question_count(),
            elapsed_secs: self.elapsed_secs,
            answers: self.answers.clone(),
            completed_at: chrono::Utc::now(),
        }
    }

    pub fn is_answer_correct(&self, index: usize) -> bool {
        match (self.answers.get(index), self.quiz.questions.get(index)) {
            (Some(Some(answer)), Some(question)) => *answer == question.correct,
            _ => false,
        }
    }

    pub fn correct_count(&self) -> usize {
        (0..self.question_count())
            .filter(|&i| self.is_answer_correct(i))
            .count()
    }

    /// Percentage of the loaded questions answered correctly, rounded.
    pub fn compute_score(&self) -> u8 {
        let total = self.question_count();
        if total == 0 {
            return 0;
        }
        ((self.correct_count() as f64 / total as f64) * 100.0).round() as u8
    }

    /// Position through the loaded question list, in percent.
    pub fn progress_percent(&self) -> u16 {
        let total = self.question_count();
        if total == 0 {
            return 0;
        }
        (((self.current_index + 1) as f64 / total as f64) * 100.0).round() as u16
    }

    pub fn option_mark(&self, option: usize) -> OptionMark {
        let Some(question) = self.current_question() else {
            return OptionMark::Neutral;
        };
        match self.phase() {
            SessionPhase::Feedback => {
                if option == question.correct {
                    OptionMark::Correct
                } else if self.selected == Some(option) {
                    OptionMark::Incorrect
                } else {
                    OptionMark::Neutral
                }
            }
            SessionPhase::Answering if self.selected == Some(option) => OptionMark::Selected,
            _ => OptionMark::Neutral,
        }
    }

    /// Correctness of the answer currently on display, while feedback is shown.
    pub fn current_is_correct(&self) -> Option<bool> {
        if self.phase() != SessionPhase::Feedback {
            return None;
        }
        let question = self.current_question()?;
        Some(self.selected == Some(question.correct))
    }

    pub fn next_label(&self) -> &'static str {
        if self.is_last_question() {
            "Finish Quiz"
        } else {
            "Next Question"
        }
    }
}

pub fn handle_quiz_input(session: &mut QuizSession, key: KeyEvent, app_state: &mut AppState) {
    match key.code {
        KeyCode::Esc => {
            *app_state = AppState::QuizQuitConfirm;
        }
        KeyCode::Char(c @ '1'..='9') => {
            let option = c as usize - '1' as usize;
            session.select_answer(option);
        }
        KeyCode::Down => {
            if let Some(question) = session.current_question() {
                let last = question.options.len().saturating_sub(1);
                let option = session.selected.map_or(0, |s| (s + 1).min(last));
                session.select_answer(option);
            }
        }
        KeyCode::Up => {
            if let Some(question) = session.current_question() {
                let last = question.options.len().saturating_sub(1);
                let option = session.selected.map_or(last, |s| s.saturating_sub(1));
                session.select_answer(option);
            }
        }
        KeyCode::Enter => match session.phase() {
            SessionPhase::Answering => {
                session.submit();
            }
            SessionPhase::Feedback => {
                session.next();
            }
            SessionPhase::Completed => {}
        },
        KeyCode::Left => {
            session.previous();
        }
        KeyCode::Right => {
            session.next();
        }
        _ => {}
    }

    if session.completed {
        *app_state = AppState::Summary;
    }
}
