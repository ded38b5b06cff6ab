/// Terminal input: key mapping, held-key tracking and mouse-as-touch.
///
/// Classic terminals only report presses (OS key-repeat shows up as repeated
/// presses), so a key counts as held while its last press or repeat arrived
/// within `HOLD_WINDOW` frames.  When it goes quiet a release is synthesised.
/// Terminals with keyboard enhancement report real releases, which are
/// honoured immediately.

use std::collections::HashMap;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode, MouseButton, MouseEvent, MouseEventKind,
};

/// A key is considered held if its last press/repeat event arrived within
/// this many frames.  At 60 FPS that is ~133 ms, shorter than any OS repeat
/// interval.
pub const HOLD_WINDOW: u64 = 8;

/// Logical keys the game reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Shift,
    Space,
    Z,
    R,
    S,
    A,
    E,
    L,
    P,
    Esc,
    Q,
    /// Gamepad button by index.
    Gamepad(u8),
}

pub fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Esc => Key::Esc,
        // only reported with keyboard enhancement
        KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => Key::Shift,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            ' ' => Key::Space,
            'z' => Key::Z,
            'r' => Key::R,
            's' => Key::S,
            'a' => Key::A,
            'e' => Key::E,
            'l' => Key::L,
            'p' => Key::P,
            'q' => Key::Q,
            _ => return None,
        },
        _ => return None,
    };
    Some(key)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
}

/// Pointer contact in playfield pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    Touch(TouchEvent),
    Quit,
}

/// Frame stamps of every key currently held.
#[derive(Debug, Default)]
pub struct KeyTracker {
    key_frame: HashMap<Key, u64>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press; true when the key was not already held.
    pub fn press(&mut self, key: Key, frame: u64) -> bool {
        self.key_frame.insert(key, frame).is_none()
    }

    /// True when the key was held.
    pub fn release(&mut self, key: Key) -> bool {
        self.key_frame.remove(&key).is_some()
    }

    pub fn is_held(&self, key: Key, frame: u64) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Drop keys that went quiet, returning them in a stable order.
    pub fn expire(&mut self, frame: u64) -> Vec<Key> {
        let mut stale: Vec<Key> = self
            .key_frame
            .iter()
            .filter(|(_, &last)| frame.saturating_sub(last) > HOLD_WINDOW)
            .map(|(&key, _)| key)
            .collect();
        stale.sort();
        for key in &stale {
            self.key_frame.remove(key);
        }
        stale
    }

    /// Forget every held key, returning them in a stable order.
    pub fn drain(&mut self) -> Vec<Key> {
        let mut held: Vec<Key> = self.key_frame.drain().map(|(key, _)| key).collect();
        held.sort();
        held
    }
}

/// Terminal cell to playfield pixel scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellScale {
    pub x: f64,
    pub y: f64,
}

impl CellScale {
    pub fn new(width: f64, height: f64, columns: u16, rows: u16) -> Self {
        Self {
            x: width / f64::from(columns.max(1)),
            y: height / f64::from(rows.max(1)),
        }
    }

    fn to_pixels(self, column: u16, row: u16) -> (f64, f64) {
        ((f64::from(column) + 0.5) * self.x, (f64::from(row) + 0.5) * self.y)
    }
}

/// Left mouse button presses, drags and releases become touch events.
pub fn translate_mouse(event: &MouseEvent, scale: CellScale) -> Option<TouchEvent> {
    let phase = match event.kind {
        MouseEventKind::Down(MouseButton::Left) => TouchPhase::Start,
        MouseEventKind::Drag(MouseButton::Left) => TouchPhase::Move,
        MouseEventKind::Up(MouseButton::Left) => TouchPhase::End,
        _ => return None,
    };
    let (x, y) = scale.to_pixels(event.column, event.row);
    Some(TouchEvent { phase, id: 0, x, y })
}

/// Turns raw terminal events into logical input for one frame.
#[derive(Debug)]
pub struct InputMapper {
    pub tracker: KeyTracker,
    pub scale: CellScale,
}

impl InputMapper {
    pub fn new(scale: CellScale) -> Self {
        Self { tracker: KeyTracker::new(), scale }
    }

    pub fn translate(&mut self, event: &Event, frame: u64) -> Vec<InputEvent> {
        match event {
            Event::Key(key) => self.translate_key(key, frame),
            Event::Mouse(mouse) => translate_mouse(mouse, self.scale)
                .map(InputEvent::Touch)
                .into_iter()
                .collect(),
            _ => Vec::new(),
        }
    }

    fn translate_key(&mut self, event: &KeyEvent, frame: u64) -> Vec<InputEvent> {
        if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![InputEvent::Quit];
        }
        let Some(key) = map_key(event.code) else {
            return Vec::new();
        };
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if self.tracker.press(key, frame) {
                    vec![InputEvent::KeyDown(key)]
                } else {
                    Vec::new()
                }
            }
            KeyEventKind::Release => {
                if self.tracker.release(key) {
                    vec![InputEvent::KeyUp(key)]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Releases for keys whose repeats stopped arriving.
    pub fn expire(&mut self, frame: u64) -> Vec<InputEvent> {
        self.tracker.expire(frame).into_iter().map(InputEvent::KeyUp).collect()
    }

    /// Releases for every held key.
    pub fn release_all(&mut self) -> Vec<InputEvent> {
        self.tracker.drain().into_iter().map(InputEvent::KeyUp).collect()
    }
}
