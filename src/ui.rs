use std::io;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::debug;
use rand::Rng;
use tokio_stream::StreamExt;
use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::{
    error::Error,
    quiz::{
        feedback::{advance_label, answer_tags, progress_percent},
        AnswerTag, Phase, QuizSession, Snapshot, Verdict,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    Quit,
    Start,
    Up,
    Down,
    SubmitHighlighted,
    Submit(usize),
    Advance,
    PlayAgain,
}

/// Maps a key press to a command that is valid for the snapshot's phase.
pub(crate) fn command_for(snapshot: &Snapshot<'_>, key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return Some(Command::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(Command::Quit)
        }
        _ => {}
    }

    match snapshot.phase {
        Phase::Start => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Start),
            _ => None,
        },
        Phase::Playing => {
            let answers = snapshot.current_question.map_or(0, |q| q.answers.len());
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => Some(Command::Up),
                KeyCode::Down | KeyCode::Char('j') => Some(Command::Down),
                KeyCode::Enter | KeyCode::Char(' ') => Some(Command::SubmitHighlighted),
                KeyCode::Char(c) => c
                    .to_digit(10)
                    .map(|d| d as usize)
                    .filter(|d| (1..=answers).contains(d))
                    .map(|d| Command::Submit(d - 1)),
                _ => None,
            }
        }
        Phase::Feedback => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') => Some(Command::Advance),
            _ => None,
        },
        Phase::Finished => match key.code {
            KeyCode::Enter | KeyCode::Char('r') => Some(Command::PlayAgain),
            _ => None,
        },
    }
}

struct UIActor<R> {
    session: QuizSession<R>,
    highlighted: usize,
}

impl<R: Rng> UIActor<R> {
    fn new(session: QuizSession<R>) -> Self {
        Self {
            session,
            highlighted: 0,
        }
    }

    /// Returns true once the user asked to quit.
    fn handle_input_event(&mut self, event: Event) -> Result<bool, Error> {
        let key = match event {
            Event::Key(key) => key,
            _ => return Ok(false),
        };

        match command_for(&self.session.snapshot(), key) {
            Some(command) => self.apply(command),
            None => Ok(false),
        }
    }

    fn apply(&mut self, command: Command) -> Result<bool, Error> {
        debug!("Applying {:?} in phase {}", command, self.session.phase());
        match command {
            Command::Quit => return Ok(true),
            Command::Start => {
                self.session.start();
                self.highlighted = 0;
            }
            Command::Up => self.highlighted = self.highlighted.saturating_sub(1),
            Command::Down => {
                let answers = self
                    .session
                    .snapshot()
                    .current_question
                    .map_or(0, |q| q.answers.len());
                if self.highlighted + 1 < answers {
                    self.highlighted += 1;
                }
            }
            Command::SubmitHighlighted => {
                self.session.submit_answer(self.highlighted)?;
            }
            Command::Submit(index) => {
                self.highlighted = index;
                self.session.submit_answer(index)?;
            }
            Command::Advance => {
                self.session.advance()?;
                self.highlighted = 0;
            }
            Command::PlayAgain => {
                self.session.play_again();
                self.highlighted = 0;
            }
        }
        Ok(false)
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<(), Error> {
        terminal.draw(|frame| self.draw_view(frame))?;
        Ok(())
    }

    fn draw_view<B: Backend>(&self, frame: &mut Frame<B>) {
        let area = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Min(0)].as_ref())
            .split(frame.size())[0];
        let snapshot = self.session.snapshot();

        let card = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(snapshot.set_name.unwrap_or("Quiz Master"));
        let inner = card.inner(area);
        frame.render_widget(card, area);

        match snapshot.phase {
            Phase::Start => draw_start(frame, inner),
            Phase::Playing | Phase::Feedback => {
                self.draw_question(frame, inner, &snapshot)
            }
            Phase::Finished => draw_finished(frame, inner, &snapshot),
        }
    }

    fn draw_question<B: Backend>(&self, frame: &mut Frame<B>, area: Rect, snapshot: &Snapshot<'_>) {
        let question = match snapshot.current_question {
            Some(question) => question,
            None => return,
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(
                [
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Length(3),
                    Constraint::Min(4),
                    Constraint::Length(1),
                ]
                .as_ref(),
            )
            .split(area);

        let header = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
            .split(chunks[0]);
        frame.render_widget(
            Paragraph::new(format!(
                "Question {} of {}",
                snapshot.position + 1,
                snapshot.total
            )),
            header[0],
        );
        frame.render_widget(
            Paragraph::new(format!("Score: {}", snapshot.score)).alignment(Alignment::Right),
            header[1],
        );

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan))
            .percent(progress_percent(snapshot));
        frame.render_widget(gauge, chunks[1]);

        let title = Paragraph::new(Spans::from(Span::styled(
            question.text.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .wrap(Wrap { trim: true });
        frame.render_widget(title, chunks[2]);

        let tags = answer_tags(snapshot);
        let lines: Vec<Spans> = question
            .answers
            .iter()
            .zip(tags)
            .enumerate()
            .map(|(i, (answer, tag))| {
                let label = format!("{}. {}", i + 1, answer.text);
                match tag {
                    AnswerTag::Unrevealed if i == self.highlighted => Spans::from(Span::styled(
                        format!("> {}", label),
                        Style::default().fg(Color::Yellow),
                    )),
                    AnswerTag::Unrevealed => Spans::from(format!("  {}", label)),
                    AnswerTag::Correct => Spans::from(Span::styled(
                        format!("  {}  [correct]", label),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    )),
                    AnswerTag::IncorrectChosen => Spans::from(Span::styled(
                        format!("  {}  [wrong]", label),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    AnswerTag::Neutral => Spans::from(Span::styled(
                        format!("  {}", label),
                        Style::default().fg(Color::DarkGray),
                    )),
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), chunks[3]);

        let hint = if snapshot.is_answer_revealed {
            Span::styled(
                format!("Enter: {}", advance_label(snapshot)),
                Style::default().fg(Color::Green),
            )
        } else {
            Span::raw("Up/Down choose, Enter answer, 1-4 pick, q quit")
        };
        frame.render_widget(Paragraph::new(Spans::from(hint)).alignment(Alignment::Center), chunks[4]);
    }
}

fn draw_start<B: Backend>(frame: &mut Frame<B>, area: Rect) {
    let text = vec![
        Spans::from(""),
        Spans::from(Span::styled(
            "Quiz Master",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Spans::from(""),
        Spans::from("Test your knowledge with our interactive quiz!"),
        Spans::from(""),
        Spans::from(Span::styled(
            "Press Enter to Start Quiz",
            Style::default().fg(Color::Green),
        )),
    ];
    let para = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}

fn draw_finished<B: Backend>(frame: &mut Frame<B>, area: Rect, snapshot: &Snapshot<'_>) {
    let verdict = Verdict::for_score(snapshot.score, snapshot.total);
    let text = vec![
        Spans::from(""),
        Spans::from(Span::styled(
            "Quiz Complete!",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Spans::from(""),
        Spans::from(Span::styled(
            format!("{}/{}", snapshot.score, snapshot.total),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Spans::from(""),
        Spans::from(verdict.message()),
        Spans::from(""),
        Spans::from(Span::styled(
            "Press Enter to Play Again with New Questions",
            Style::default().fg(Color::Green),
        )),
    ];
    let para = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}

async fn run_ui_actor<R: Rng, B: Backend>(
    mut actor: UIActor<R>,
    mut event_stream: EventStream,
    terminal: &mut Terminal<B>,
) -> Result<(), Error> {
    loop {
        actor.draw(terminal)?;
        match event_stream.next().await {
            Some(Ok(event)) => {
                if actor.handle_input_event(event)? {
                    break;
                }
            }
            Some(Err(err)) => return Err(err.into()),
            None => break,
        }
    }

    Ok(())
}

/// Takes over the terminal until the user quits. The terminal is restored
/// before any error is returned.
pub async fn run<R: Rng>(session: QuizSession<R>) -> Result<(), Error> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    enable_raw_mode()?;
    terminal.clear()?;

    let result = run_ui_actor(UIActor::new(session), EventStream::new(), &mut terminal).await;

    disable_raw_mode()?;
    terminal.clear()?;
    terminal.show_cursor()?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{fixtures, QuestionBank};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;
    use tui::backend::TestBackend;

    fn actor(correct: &[usize]) -> UIActor<StdRng> {
        let bank = QuestionBank::new(vec![fixtures::set("fixture", correct)]).unwrap();
        UIActor::new(QuizSession::new(Arc::new(bank), StdRng::seed_from_u64(3), 0))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn screen(actor: &UIActor<StdRng>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        actor.draw(&mut terminal).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol.as_str())
            .collect()
    }

    #[test]
    fn keys_only_map_to_commands_valid_for_the_phase() {
        let mut actor = actor(&[0]);
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        let digit = KeyEvent::new(KeyCode::Char('2'), KeyModifiers::NONE);

        assert_eq!(command_for(&actor.session.snapshot(), enter), Some(Command::Start));
        assert_eq!(command_for(&actor.session.snapshot(), digit), None);

        actor.session.start();
        assert_eq!(
            command_for(&actor.session.snapshot(), enter),
            Some(Command::SubmitHighlighted)
        );
        assert_eq!(
            command_for(&actor.session.snapshot(), digit),
            Some(Command::Submit(1))
        );
        let five = KeyEvent::new(KeyCode::Char('5'), KeyModifiers::NONE);
        assert_eq!(command_for(&actor.session.snapshot(), five), None);

        actor.session.submit_answer(0).unwrap();
        assert_eq!(command_for(&actor.session.snapshot(), enter), Some(Command::Advance));
        assert_eq!(command_for(&actor.session.snapshot(), digit), None);

        actor.session.advance().unwrap();
        assert_eq!(command_for(&actor.session.snapshot(), enter), Some(Command::PlayAgain));
    }

    #[test]
    fn quit_keys_work_everywhere() {
        let actor = actor(&[0]);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);

        assert_eq!(command_for(&actor.session.snapshot(), ctrl_c), Some(Command::Quit));
        assert_eq!(command_for(&actor.session.snapshot(), esc), Some(Command::Quit));
    }

    #[test]
    fn highlight_stays_on_the_answers() {
        let mut actor = actor(&[3]);
        actor.handle_input_event(key(KeyCode::Enter)).unwrap();

        actor.handle_input_event(key(KeyCode::Up)).unwrap();
        assert_eq!(actor.highlighted, 0);
        for _ in 0..10 {
            actor.handle_input_event(key(KeyCode::Down)).unwrap();
        }
        assert_eq!(actor.highlighted, 3);

        actor.handle_input_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(actor.session.score(), 1);
        assert_eq!(actor.session.phase(), Phase::Feedback);
    }

    #[test]
    fn plays_a_whole_round_from_the_keyboard() {
        let mut actor = actor(&[0, 0]);

        assert!(screen(&actor).contains("Press Enter to Start Quiz"));
        actor.handle_input_event(key(KeyCode::Enter)).unwrap();

        let playing = screen(&actor);
        assert!(playing.contains("Question 1 of 2"));
        assert!(playing.contains("Score: 0"));

        actor.handle_input_event(key(KeyCode::Char('2'))).unwrap();
        let feedback = screen(&actor);
        assert!(feedback.contains("[wrong]"));
        assert!(feedback.contains("[correct]"));
        assert!(feedback.contains("Next Question"));

        actor.handle_input_event(key(KeyCode::Enter)).unwrap();
        actor.handle_input_event(key(KeyCode::Char('1'))).unwrap();
        assert!(screen(&actor).contains("Finish Quiz"));
        actor.handle_input_event(key(KeyCode::Enter)).unwrap();

        let finished = screen(&actor);
        assert!(finished.contains("Quiz Complete!"));
        assert!(finished.contains("1/2"));
        assert!(finished.contains("Good effort! Try again to improve!"));

        assert!(actor.handle_input_event(key(KeyCode::Char('q'))).unwrap());
    }

    #[test]
    fn play_again_starts_a_new_round() {
        let mut actor = actor(&[1]);
        actor.handle_input_event(key(KeyCode::Enter)).unwrap();
        actor.handle_input_event(key(KeyCode::Char('2'))).unwrap();
        actor.handle_input_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(actor.session.phase(), Phase::Finished);
        assert!(screen(&actor).contains("Perfect! You're a quiz master!"));

        actor.handle_input_event(key(KeyCode::Char('r'))).unwrap();
        assert_eq!(actor.session.phase(), Phase::Playing);
        assert_eq!(actor.session.score(), 0);
        assert_eq!(actor.session.set_cursor(), 1);
    }
}
