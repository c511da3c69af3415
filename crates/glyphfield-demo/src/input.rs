#![forbid(unsafe_code)]

//! Crossterm events to host actions.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use glyphfield_core::event::PointerEvent;
use glyphfield_core::geometry::Viewport;

/// What a terminal event means to the host loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Forward to the engine's pointer handling.
    Pointer(PointerEvent),
    /// Terminal resized to `cols × rows`.
    Resize(Viewport),
    /// Leave the loop.
    Quit,
}

/// Map a terminal event; `None` for events the host ignores.
///
/// Terminal cells are one pixel each, so the mouse cell is the pointer
/// position.
pub fn map_event(event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
                Some(Action::Pointer(PointerEvent::moved(
                    f64::from(mouse.column),
                    f64::from(mouse.row),
                )))
            }
            _ => None,
        },
        Event::FocusLost => Some(Action::Pointer(PointerEvent::Left)),
        Event::Resize(cols, rows) => Some(Action::Resize(Viewport::new(
            u32::from(cols),
            u32::from(rows),
        ))),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        _ => None,
    }
}
