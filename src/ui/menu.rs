use crate::models::QuizSummary;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

fn format_quiz_item(quiz: &QuizSummary) -> String {
    format!(
        "{} - {} ({} questions)",
        quiz.title, quiz.subject, quiz.question_count
    )
}

pub fn draw_menu(f: &mut Frame, quizzes: &[QuizSummary], selected_index: usize, notice: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("📝 Adaptive Quiz")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = if quizzes.is_empty() {
        vec![ListItem::new("No quizzes available").style(Style::default().fg(Color::DarkGray))]
    } else {
        quizzes
            .iter()
            .enumerate()
            .map(|(i, quiz)| {
                let style = if i == selected_index {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(format_quiz_item(quiz)).style(style)
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Select a Quiz"),
    );
    f.render_widget(list, chunks[1]);

    let notice_widget = Paragraph::new(notice.unwrap_or(""))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(notice_widget, chunks[2]);

    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let help_text = vec![Line::from(vec![
        Span::styled("↑/↓", key_style),
        Span::from(" Navigate  "),
        Span::styled("Enter", key_style),
        Span::from(" Start  "),
        Span::styled("q", key_style),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_format_quiz_item() {
        let quiz = QuizSummary {
            id: "math-101".to_string(),
            title: "Algebra".to_string(),
            subject: "Mathematics".to_string(),
            question_count: 2,
        };
        assert_eq!(format_quiz_item(&quiz), "Algebra - Mathematics (2 questions)");
    }

    #[test]
    fn test_menu_shows_notice() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| draw_menu(f, &[], 0, Some("quiz not found: x")))
            .unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("No quizzes available"));
        assert!(screen.contains("quiz not found: x"));
    }
}
