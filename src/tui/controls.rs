//! Keyboard input for the chart view.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;

/// Applies one key event to the replay.
///
/// Only [`KeyEventKind::Press`] is handled; some terminals also report releases.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Char(' ') => app.toggle_pause(),
        KeyCode::Char('+' | '=') | KeyCode::Right => app.speed_up(),
        KeyCode::Char('-') | KeyCode::Left => app.speed_down(),
        KeyCode::Char('1') => app.switch_preset("baseline"),
        KeyCode::Char('2') => app.switch_preset("large_storage"),
        KeyCode::Char('3') => app.switch_preset("narrow_band"),
        KeyCode::Char('r') => app.restart(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioConfig;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn quit_keys() {
        let mut app = App::new(ScenarioConfig::baseline(), "baseline").expect("dispatch");
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(app.quit);

        let mut app = App::new(ScenarioConfig::baseline(), "baseline").expect("dispatch");
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.quit);
    }

    #[test]
    fn preset_keys_switch_label() {
        let mut app = App::new(ScenarioConfig::baseline(), "baseline").expect("dispatch");
        handle_key(&mut app, press(KeyCode::Char('3')));
        assert_eq!(app.label, "narrow_band");
        handle_key(&mut app, press(KeyCode::Char('1')));
        assert_eq!(app.label, "baseline");
    }

    #[test]
    fn restart_hides_revealed_hours() {
        let mut app = App::new(ScenarioConfig::baseline(), "baseline").expect("dispatch");
        app.tick();
        app.toggle_pause();
        handle_key(&mut app, press(KeyCode::Char('r')));
        assert_eq!(app.revealed, 0);
        assert!(!app.paused);
    }
}
