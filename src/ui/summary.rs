use crate::session::QuizSession;
use crate::ui::layout::calculate_summary_chunks;
use crate::utils::{format_time, recommendation, truncate_string};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn stat(value: String, label: &str, color: Color) -> Paragraph<'static> {
    let text = Text::from(vec![
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

pub fn draw_summary(f: &mut Frame, session: &QuizSession) {
    let layout = calculate_summary_chunks(f.area());
    let score = session.compute_score();

    let title_text = format!("Quiz Completed! - {}", session.quiz.title);
    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let stat_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(layout.stats_area);
    let score_color = if score >= 80 { Color::Green } else { Color::Yellow };
    f.render_widget(stat(format!("{}%", score), "Final Score", score_color), stat_chunks[0]);
    f.render_widget(
        stat(format_time(session.elapsed_secs), "Time Taken", Color::Green),
        stat_chunks[1],
    );
    f.render_widget(
        stat(
            format!("{}/{}", session.correct_count(), session.question_count()),
            "Correct Answers",
            Color::Magenta,
        ),
        stat_chunks[2],
    );

    let mut summary_text = Text::default();
    summary_text.push_line(Line::from(Span::styled(
        "Recommendation:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    summary_text.push_line(Line::from(recommendation(score)));
    if let Some(error) = &session.last_error {
        summary_text.push_line(Line::from(""));
        summary_text.push_line(Line::from(Span::styled(
            format!("Result not saved: {}", error),
            Style::default().fg(Color::Red),
        )));
    }
    summary_text.push_line(Line::from(""));
    summary_text.push_line(Line::from("Answers:"));
    summary_text.push_line(Line::from(""));

    for (i, question) in session.quiz.questions.iter().enumerate() {
        let (marker, color) = match session.answers.get(i).copied().flatten() {
            Some(_) if session.is_answer_correct(i) => ("[✓]", Color::Green),
            Some(_) => ("[✗]", Color::Red),
            None => ("[ ]", Color::DarkGray),
        };
        summary_text.push_line(Line::from(vec![
            Span::styled(marker, Style::default().fg(color)),
            Span::from(format!(" {}. {}", i + 1, truncate_string(&question.prompt, 60))),
        ]));
        let answer = session
            .answers
            .get(i)
            .copied()
            .flatten()
            .and_then(|a| question.options.get(a))
            .map_or("-", String::as_str);
        let correct = question
            .options
            .get(question.correct)
            .map_or("-", String::as_str);
        summary_text.push_line(Line::from(format!(
            "   Your Answer: {}   Correct: {}",
            truncate_string(answer, 30),
            truncate_string(correct, 30)
        )));
        summary_text.push_line(Line::from(""));
    }

    let summary = Paragraph::new(summary_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(summary, layout.content_area);

    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let help_text = vec![Line::from(vec![
        Span::styled("r", key_style),
        Span::from(" Retake Quiz  "),
        Span::styled("m", key_style),
        Span::from(" Main Menu  "),
        Span::styled("q/Esc", key_style),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
