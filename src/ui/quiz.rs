use crate::models::{OptionMark, SessionPhase};
use crate::session::QuizSession;
use crate::ui::layout::calculate_quiz_chunks;
use crate::utils::format_time;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

fn key_style(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn label_style(enabled: bool) -> Style {
    if enabled {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn option_line(index: usize, text: &str, mark: OptionMark) -> ListItem<'static> {
    let (marker, style) = match mark {
        OptionMark::Correct => (
            "✔",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        OptionMark::Incorrect => (
            "✘",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        OptionMark::Selected => (
            "●",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        OptionMark::Neutral => ("○", Style::default()),
    };
    ListItem::new(format!(" {} {}. {}", marker, index + 1, text)).style(style)
}

fn draw_loading(f: &mut Frame, session: &QuizSession) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(f.area());

    let title = Paragraph::new(session.quiz.title.as_str())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let body = Paragraph::new("Loading...  (Esc to return to the menu)")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, chunks[1]);
}

pub fn draw_quiz(f: &mut Frame, session: &QuizSession) {
    let Some(question) = session.current_question() else {
        draw_loading(f, session);
        return;
    };
    let layout = calculate_quiz_chunks(f.area());

    let header_text = Line::from(vec![
        Span::styled(
            session.quiz.title.as_str(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(format!("  {}  ", session.quiz.subject)),
        Span::styled(
            format!("[{}]", session.quiz.difficulty),
            Style::default().fg(Color::Blue),
        ),
        Span::from(format!("  ⏱ {}", format_time(session.elapsed_secs))),
    ]);
    let header = Paragraph::new(header_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let progress = session.progress_percent().min(100);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Question {} of {}",
            session.current_index + 1,
            session.quiz.total_questions
        )))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(progress)
        .label(format!("{}% Complete", progress));
    f.render_widget(gauge, layout.progress_area);

    let mut question_text = Text::from(Line::from(Span::styled(
        question.prompt.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    question_text.push_line(Line::from(vec![
        Span::styled(question.topic.as_str(), Style::default().fg(Color::Magenta)),
        Span::from(" · "),
        Span::styled(
            question.difficulty.as_str(),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    let question_widget = Paragraph::new(question_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question_widget, layout.question_area);

    let items: Vec<ListItem> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| option_line(i, option, session.option_mark(i)))
        .collect();
    let options = List::new(items).block(Block::default().borders(Borders::ALL).title("Options"));
    f.render_widget(options, layout.options_area);

    let feedback = match session.current_is_correct() {
        Some(correct) => {
            let (heading, color) = if correct {
                ("Correct!", Color::Green)
            } else {
                ("Not quite right", Color::Yellow)
            };
            let mut text = Text::from(Line::from(Span::styled(
                heading,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
            text.push_line(Line::from(question.explanation.as_str()));
            text
        }
        None => match &session.last_error {
            Some(error) => Text::from(Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(Color::Red),
            ))),
            None => Text::default(),
        },
    };
    let feedback_widget = Paragraph::new(feedback)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Feedback"));
    f.render_widget(feedback_widget, layout.feedback_area);

    let mut action_spans = vec![
        Span::styled("1-9 ↑/↓", key_style(session.can_select())),
        Span::styled(" Choose  ", label_style(session.can_select())),
    ];
    if session.phase() == SessionPhase::Feedback {
        action_spans.extend([
            Span::styled("Enter/→", key_style(session.can_next())),
            Span::styled(
                format!(" {}  ", session.next_label()),
                label_style(session.can_next()),
            ),
        ]);
    } else {
        action_spans.extend([
            Span::styled("Enter", key_style(session.can_submit())),
            Span::styled(" Submit Answer  ", label_style(session.can_submit())),
        ]);
    }
    action_spans.extend([
        Span::styled("←", key_style(session.can_previous())),
        Span::styled(" Previous", label_style(session.can_previous())),
    ]);

    let help_text = vec![
        Line::from(action_spans),
        Line::from(vec![
            Span::styled("Esc", key_style(true)),
            Span::from(" Quit to Menu  "),
            Span::styled("Ctrl+C", key_style(true)),
            Span::from(" Exit App"),
        ]),
    ];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Quit to Menu")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Leave this quiz? Your answers will not be kept.")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Return to Menu)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue Quiz)"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
