use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use recpanel_core::{Action, FormField, Panel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FormField),
    Button(Action),
}

/// Tab order: editable fields, then the action buttons.
pub const FOCUS_ORDER: [Focus; 11] = [
    Focus::Field(FormField::Id),
    Focus::Field(FormField::ProductId),
    Focus::Field(FormField::RecProductId),
    Focus::Field(FormField::Type),
    Focus::Button(Action::Create),
    Focus::Button(Action::Update),
    Focus::Button(Action::Retrieve),
    Focus::Button(Action::Delete),
    Focus::Button(Action::IncrementInterest),
    Focus::Button(Action::Clear),
    Focus::Button(Action::Search),
];

#[derive(Debug)]
pub struct App {
    pub panel: Panel,
    pub focus: usize,
    pub show_help: bool,
    pub should_quit: bool,
    pub base_url: String,
    actions: VecDeque<Action>,
}

impl App {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            panel: Panel::new(),
            focus: 0,
            show_help: false,
            should_quit: false,
            base_url: base_url.into(),
            actions: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    pub fn next_action(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub fn focused(&self) -> Focus {
        FOCUS_ORDER[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FOCUS_ORDER.len();
    }

    pub fn focus_prev(&mut self) {
        if self.focus == 0 {
            self.focus = FOCUS_ORDER.len() - 1;
        } else {
            self.focus -= 1;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::F(1) | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        if matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        ) || key.code == KeyCode::Esc
        {
            self.should_quit = true;
            return;
        }

        if let Some(action) = shortcut(key.code) {
            self.enqueue(action);
            return;
        }

        match key.code {
            KeyCode::F(1) => self.show_help = true,
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Enter => match self.focused() {
                Focus::Button(action) => self.enqueue(action),
                Focus::Field(_) => self.focus_next(),
            },
            _ => {
                if let Focus::Field(field) = self.focused() {
                    apply_text_input(self.panel.form_mut().value_mut(field), key);
                }
            }
        }
    }
}

/// Function-key shortcuts, one per action.
pub fn shortcut(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::F(2) => Some(Action::Create),
        KeyCode::F(3) => Some(Action::Update),
        KeyCode::F(4) => Some(Action::Retrieve),
        KeyCode::F(5) => Some(Action::Delete),
        KeyCode::F(6) => Some(Action::IncrementInterest),
        KeyCode::F(7) => Some(Action::Clear),
        KeyCode::F(8) => Some(Action::Search),
        _ => None,
    }
}

pub fn shortcut_label(action: Action) -> &'static str {
    match action {
        Action::Create => "F2",
        Action::Update => "F3",
        Action::Retrieve => "F4",
        Action::Delete => "F5",
        Action::IncrementInterest => "F6",
        Action::Clear => "F7",
        Action::Search => "F8",
    }
}

fn apply_text_input(target: &mut String, key: KeyEvent) {
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            target.clear();
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            delete_last_word(target);
        }
        KeyCode::Char(ch) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                target.push(ch);
            }
        }
        KeyCode::Backspace => {
            target.pop();
        }
        _ => {}
    }
}

fn delete_last_word(value: &mut String) {
    while value.ends_with(|ch: char| ch.is_whitespace()) {
        value.pop();
    }
    while value.ends_with(|ch: char| !ch.is_whitespace()) {
        value.pop();
    }
}
