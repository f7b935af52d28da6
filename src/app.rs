use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::runtime::SprintEvent;
use crate::session::{Progress, Session};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Typing,
    Results,
}

/// Key-driven shell around a [`Session`]: turns key presses into session operations.
#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub theme: Theme,
    should_quit: bool,
}

impl App {
    pub fn new(session: Session, theme: Theme) -> Self {
        Self {
            session,
            theme,
            should_quit: false,
        }
    }

    pub fn state(&self) -> AppState {
        if self.session.is_completed() {
            AppState::Results
        } else {
            AppState::Typing
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        tracing::debug!(theme = %self.theme, "theme_toggled");
    }

    /// Applies one event. Returns true if the screen needs a redraw.
    pub fn on_event(&mut self, event: SprintEvent) -> bool {
        match event {
            SprintEvent::Key(key) => {
                self.on_key(key);
                true
            }
            SprintEvent::Tick(id) => self.session.on_tick(id),
            SprintEvent::Resize => true,
            SprintEvent::Idle => false,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match (key.code, ctrl) {
            (KeyCode::Esc, _) | (KeyCode::Char('c'), true) => {
                self.should_quit = true;
                return;
            }
            (KeyCode::Char('t'), true) => {
                self.toggle_theme();
                return;
            }
            (KeyCode::Char('r'), true) => {
                self.session.restart();
                return;
            }
            _ => {}
        }

        match self.state() {
            AppState::Typing => self.on_typing_key(key, ctrl),
            AppState::Results => match key.code {
                KeyCode::Char('r') | KeyCode::Enter => self.session.restart(),
                KeyCode::Char('t') => self.toggle_theme(),
                _ => {}
            },
        }
    }

    fn on_typing_key(&mut self, key: KeyEvent, ctrl: bool) {
        match (key.code, ctrl) {
            (KeyCode::Char('n'), true) => {
                self.session.next_passage();
            }
            (KeyCode::Char('e'), true) => self.session.end_task(),
            (KeyCode::Char(_), true) => {}
            (KeyCode::Char(c), false) => {
                let mut value = self.session.input().to_owned();
                value.push(c);
                self.type_value(value);
            }
            (KeyCode::Enter, _) => {
                let mut value = self.session.input().to_owned();
                value.push('\n');
                self.type_value(value);
            }
            (KeyCode::Backspace, _) => {
                let mut value = self.session.input().to_owned();
                if value.pop().is_some() {
                    self.type_value(value);
                }
            }
            _ => {}
        }
    }

    fn type_value(&mut self, value: String) {
        let progress = self.session.on_keystroke(value);
        if progress != Progress::Typing {
            tracing::debug!(?progress, "keystroke_progress");
        }
    }
}
