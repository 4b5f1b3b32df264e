//! Global keyboard shortcuts
//!
//! Listeners are registered through [`ShortcutRegistry::subscribe`] and stay
//! active for as long as the returned [`Subscription`] is alive.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A modifier + character combination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombo {
    pub modifiers: KeyModifiers,
    pub key: char,
}

impl KeyCombo {
    pub const fn alt(key: char) -> Self {
        Self {
            modifiers: KeyModifiers::ALT,
            key,
        }
    }

    /// The required modifier must be held and the character must match exactly.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if event.kind == KeyEventKind::Release {
            return false;
        }
        matches!(event.code, KeyCode::Char(c) if c == self.key)
            && event.modifiers.contains(self.modifiers)
    }

    pub fn label(&self) -> String {
        let mut label = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            label.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            label.push_str("Alt+");
        }
        label.push(self.key.to_ascii_uppercase());
        label
    }
}

/// Alt+Q cycles the theme
pub const THEME_CYCLE_COMBO: KeyCombo = KeyCombo::alt('q');

/// What a shortcut asks the shell to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    CycleTheme,
}

#[derive(Debug, Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, KeyCombo, ShortcutAction)>,
}

/// Registry of active shortcut listeners
#[derive(Debug, Clone, Default)]
pub struct ShortcutRegistry {
    inner: Rc<RefCell<Listeners>>,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a listener. It is removed when the returned subscription drops.
    #[must_use = "dropping the subscription removes the listener immediately"]
    pub fn subscribe(&self, combo: KeyCombo, action: ShortcutAction) -> Subscription {
        let mut listeners = self.inner.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, combo, action));
        tracing::debug!(combo = %combo.label(), ?action, "shortcut installed");

        Subscription {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Find the action bound to a key event, if any listener matches.
    pub fn dispatch(&self, event: &KeyEvent) -> Option<ShortcutAction> {
        self.inner
            .borrow()
            .entries
            .iter()
            .find(|(_, combo, _)| combo.matches(event))
            .map(|(_, _, action)| *action)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}

/// Scoped listener registration
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Listeners>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.registry.upgrade() {
            inner.borrow_mut().entries.retain(|(id, _, _)| *id != self.id);
            tracing::debug!(id = self.id, "shortcut removed");
        }
    }
}
