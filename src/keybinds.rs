use three_d::{Event, GUI, Key};

use super::app::SimState;
use solar_system_demo::interaction::Event as SelectionEvent;

pub(super) fn handle_keybinds(sim_state: &mut SimState, events: &mut [Event], gui: &GUI) {
    for event in events {
        match event {
            Event::KeyPress { kind, handled, .. } => handle_keypress(sim_state, *kind, handled),
            Event::Text(text) => {
                if gui.context().wants_keyboard_input() {
                    continue;
                }
                handle_text_input(sim_state, text)
            }
            _ => (),
        }
    }
}

fn handle_keypress(sim_state: &mut SimState, key: Key, handled: &mut bool) {
    if *handled {
        return;
    }

    match key {
        Key::P | Key::Space => sim_state.toggle_pause(),
        Key::C => sim_state.dispatch(SelectionEvent::Clear),
        Key::M => sim_state.dispatch(SelectionEvent::ToggleSelectionMode),
        Key::R => sim_state.reset(),
        _ => return,
    }
    *handled = true;
}

fn handle_text_input(sim_state: &mut SimState, text: &str) {
    text.chars()
        .for_each(|char| handle_char_input(sim_state, char));
}

fn handle_char_input(sim_state: &mut SimState, char: char) {
    match char {
        '[' => sim_state.scale_time(0.5),
        ']' => sim_state.scale_time(2.0),
        _ => (),
    }
}
