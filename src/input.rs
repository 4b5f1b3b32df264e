//! Input handling
//!
//! Maps keyboard events to shell operations with context-sensitive bindings.
//! Form controls never write to the form directly: [`field_change_for_key`]
//! turns a key into a [`FieldChange`] that the shell applies.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::form::{pop_digit, push_digit, CustomizationData, FieldChange, MAX_MEASUREMENT};
use crate::state::{AppShell, FocusedWidget};

/// Handle an input event
pub fn handle_event(event: Event, state: &mut AppShell) -> Result<()> {
    match event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            handle_key_event(key_event, state)
        }
        Event::Resize(width, height) => {
            state.set_terminal_size(width, height);
            Ok(())
        }
        // Pasted text goes wherever typed text would
        Event::Paste(text) => {
            for c in text.chars() {
                let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
                handle_key_event(key, state)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(key: KeyEvent, state: &mut AppShell) -> Result<()> {
    // Installed global shortcuts see every key first
    if state.dispatch_shortcut(&key) {
        return Ok(());
    }

    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
    {
        state.should_quit = true;
        return Ok(());
    }

    if state.acknowledgement.is_some() {
        return handle_acknowledgement_input(key, state);
    }

    if state.show_help {
        return handle_help_input(key, state);
    }

    if state.upload_prompt_active {
        return handle_upload_prompt_input(key, state);
    }

    match key.code {
        KeyCode::F(1) => {
            state.show_help = true;
            return Ok(());
        }
        KeyCode::Tab | KeyCode::Down => {
            state.focus = state.focus.next();
            return Ok(());
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.focus = state.focus.prev();
            return Ok(());
        }
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.submit();
            return Ok(());
        }
        _ => {}
    }

    match state.focus {
        FocusedWidget::Upload => handle_upload_input(key, state),
        FocusedWidget::Submit => handle_submit_input(key, state),
        _ => {
            if let Some(change) = field_change_for_key(state.focus, &key, state.form().data()) {
                state.apply_change(change);
            }
            Ok(())
        }
    }
}

/// Translate a key on a form field into the change it requests.
///
/// Reads the current values but never modifies them.
pub fn field_change_for_key(
    focus: FocusedWidget,
    key: &KeyEvent,
    data: &CustomizationData,
) -> Option<FieldChange> {
    // Modified keys are shortcuts, not text
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    match focus {
        FocusedWidget::Height => numeric_edit(data.height, key).map(FieldChange::Height),
        FocusedWidget::Weight => numeric_edit(data.weight, key).map(FieldChange::Weight),
        FocusedWidget::Build => match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(FieldChange::Build(data.build.prev())),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') | KeyCode::Enter => {
                Some(FieldChange::Build(data.build.next()))
            }
            _ => None,
        },
        FocusedWidget::CustomText => {
            let mut text = data.custom_text.clone();
            match key.code {
                KeyCode::Char(c) => text.push(c),
                KeyCode::Enter => text.push('\n'),
                KeyCode::Backspace => {
                    text.pop()?;
                }
                _ => return None,
            }
            Some(FieldChange::CustomText(text))
        }
        FocusedWidget::Upload | FocusedWidget::Submit => None,
    }
}

/// Edit a numeric field: digits append, Backspace removes, +/- and arrows step
fn numeric_edit(value: u32, key: &KeyEvent) -> Option<u32> {
    let new = match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => push_digit(value, c.to_digit(10)?),
        KeyCode::Backspace => pop_digit(value),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
            (value + 1).min(MAX_MEASUREMENT)
        }
        KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Left => value.saturating_sub(1),
        _ => return None,
    };
    (new != value).then_some(new)
}

/// Handle input when help overlay is shown
fn handle_help_input(key: KeyEvent, state: &mut AppShell) -> Result<()> {
    match key.code {
        KeyCode::F(1) | KeyCode::Esc | KeyCode::Enter => {
            state.show_help = false;
        }
        _ => {}
    }
    Ok(())
}

/// Handle input while the save acknowledgement is shown
fn handle_acknowledgement_input(key: KeyEvent, state: &mut AppShell) -> Result<()> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => state.dismiss_acknowledgement(),
        _ => {}
    }
    Ok(())
}

/// Handle input for the upload path prompt
fn handle_upload_prompt_input(key: KeyEvent, state: &mut AppShell) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            state.cancel_upload_prompt();
        }
        KeyCode::Enter => {
            state.submit_upload_prompt();
        }
        KeyCode::Backspace => {
            state.upload_prompt_input.pop();
        }
        // Chords such as Ctrl+S are not path text
        KeyCode::Char(_)
            if key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
        KeyCode::Char(c) => {
            state.upload_prompt_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

/// Handle input on the upload control
fn handle_upload_input(key: KeyEvent, state: &mut AppShell) -> Result<()> {
    if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
        state.start_upload_prompt();
    }
    Ok(())
}

/// Handle input on the submit button
fn handle_submit_input(key: KeyEvent, state: &mut AppShell) -> Result<()> {
    if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
        state.submit();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sink::NotifySink;
    use crate::terminal_capabilities::TerminalCapabilities;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn shell() -> AppShell {
        AppShell::new(
            Config::default(),
            TerminalCapabilities::default(),
            Box::new(NotifySink),
        )
    }

    #[test]
    fn test_upload_prompt_ignores_chords() {
        let mut state = shell();
        state.start_upload_prompt();

        for c in "a.png".chars() {
            handle_event(Event::Key(key(KeyCode::Char(c))), &mut state).unwrap();
        }
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        handle_event(Event::Key(ctrl_s), &mut state).unwrap();
        let alt_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        handle_event(Event::Key(alt_x), &mut state).unwrap();
        let shifted = KeyEvent::new(KeyCode::Char('B'), KeyModifiers::SHIFT);
        handle_event(Event::Key(shifted), &mut state).unwrap();

        assert!(state.upload_prompt_active);
        assert_eq!(state.upload_prompt_input, "a.pngB");
    }

    #[test]
    fn test_numeric_typing() {
        let data = CustomizationData {
            height: 18,
            ..CustomizationData::default()
        };
        assert_eq!(
            field_change_for_key(FocusedWidget::Height, &key(KeyCode::Char('5')), &data),
            Some(FieldChange::Height(185))
        );
        assert_eq!(
            field_change_for_key(FocusedWidget::Height, &key(KeyCode::Backspace), &data),
            Some(FieldChange::Height(1))
        );
        assert_eq!(
            field_change_for_key(FocusedWidget::Height, &key(KeyCode::Char('x')), &data),
            None
        );
    }

    #[test]
    fn test_numeric_stepping() {
        let data = CustomizationData::default();
        assert_eq!(
            field_change_for_key(FocusedWidget::Weight, &key(KeyCode::Char('+')), &data),
            Some(FieldChange::Weight(81))
        );
        assert_eq!(
            field_change_for_key(FocusedWidget::Weight, &key(KeyCode::Left), &data),
            Some(FieldChange::Weight(79))
        );
    }

    #[test]
    fn test_numeric_at_bounds_is_no_change() {
        let data = CustomizationData {
            weight: 0,
            ..CustomizationData::default()
        };
        assert_eq!(
            field_change_for_key(FocusedWidget::Weight, &key(KeyCode::Char('-')), &data),
            None
        );
    }

    #[test]
    fn test_build_selection() {
        let data = CustomizationData::default();
        assert_eq!(
            field_change_for_key(FocusedWidget::Build, &key(KeyCode::Left), &data),
            Some(FieldChange::Build(crate::form::Build::Slim))
        );
        assert_eq!(
            field_change_for_key(FocusedWidget::Build, &key(KeyCode::Right), &data),
            Some(FieldChange::Build(crate::form::Build::Regular))
        );
    }

    #[test]
    fn test_text_editing() {
        let data = CustomizationData {
            custom_text: "HI".to_string(),
            ..CustomizationData::default()
        };
        assert_eq!(
            field_change_for_key(FocusedWidget::CustomText, &key(KeyCode::Char('!')), &data),
            Some(FieldChange::CustomText("HI!".to_string()))
        );
        assert_eq!(
            field_change_for_key(FocusedWidget::CustomText, &key(KeyCode::Enter), &data),
            Some(FieldChange::CustomText("HI\n".to_string()))
        );
        assert_eq!(
            field_change_for_key(FocusedWidget::CustomText, &key(KeyCode::Backspace), &data),
            Some(FieldChange::CustomText("H".to_string()))
        );
    }

    #[test]
    fn test_backspace_on_empty_text_is_no_change() {
        let data = CustomizationData::default();
        assert_eq!(
            field_change_for_key(FocusedWidget::CustomText, &key(KeyCode::Backspace), &data),
            None
        );
    }

    #[test]
    fn test_alt_keys_are_not_text() {
        let data = CustomizationData::default();
        let alt_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::ALT);
        assert_eq!(field_change_for_key(FocusedWidget::CustomText, &alt_q, &data), None);
    }

    #[test]
    fn test_buttons_produce_no_field_change() {
        let data = CustomizationData::default();
        assert_eq!(
            field_change_for_key(FocusedWidget::Submit, &key(KeyCode::Enter), &data),
            None
        );
    }
}
