use std::ops::RangeInclusive;

use super::{
    super::app::SimState, MIN_TOUCH_TARGET_LEN, MIN_TOUCH_TARGET_VEC, declare_id,
};
use float_pretty_print::PrettyPrintFloat;
use solar_system_demo::{
    interaction::Event,
    units::{UnitEnum, time::TimeUnit},
};
use three_d::egui::{
    Button, Color32, Context, DragValue, Frame, RichText, ScrollArea, Stroke, TopBottomPanel, Ui,
    Vec2,
};

declare_id!(BOTTOM_PANEL, b"BluRigel");

fn format_dv_number(number: f64, _: RangeInclusive<usize>) -> String {
    let number = PrettyPrintFloat(number);
    format!("{number:5.1}x")
}

fn hover(text: &str) -> RichText {
    RichText::new(text).color(Color32::WHITE).size(16.0)
}

fn flat_buttons(ui: &mut Ui) {
    ui.spacing_mut().button_padding = Vec2::new(12.0, 0.0);
    let widget_styles = &mut ui.visuals_mut().widgets;
    widget_styles.inactive.weak_bg_fill = Color32::TRANSPARENT;
    widget_styles.inactive.bg_stroke = Stroke::NONE;
    widget_styles.hovered.weak_bg_fill = Color32::from_white_alpha(16);
    widget_styles.hovered.bg_stroke = Stroke::NONE;
    widget_styles.active.weak_bg_fill = Color32::from_white_alpha(64);
}

pub(super) fn draw(ctx: &Context, sim_state: &mut SimState) {
    TopBottomPanel::bottom(*BOTTOM_PANEL_ID)
        .show_separator_line(false)
        .exact_height(64.0)
        .frame(
            Frame::default()
                .fill(Color32::from_black_alpha(192))
                .inner_margin(8.0),
        )
        .show(ctx, |ui| {
            ScrollArea::horizontal()
                .auto_shrink([false, false])
                .show(ui, |ui| ui.horizontal(|ui| contents(ui, sim_state)))
        });
}

fn contents(ui: &mut Ui, sim_state: &mut SimState) {
    ui.set_height(MIN_TOUCH_TARGET_LEN);
    ui.add_space(8.0);
    pause_button(ui, sim_state);
    time_display(ui, sim_state);
    ui.separator();
    time_scale(ui, sim_state);
    ui.separator();
    toggles(ui, sim_state);
}

fn pause_button(ui: &mut Ui, sim_state: &mut SimState) {
    let (label, hover_string) = match sim_state.running() {
        true => ("Pause", "Currently running\nClick to pause (P)"),
        false => ("Resume", "Currently paused\nClick to resume (P)"),
    };
    let text = RichText::new(label).size(16.0);

    ui.scope(|ui| {
        flat_buttons(ui);
        let button = Button::new(text).min_size(Vec2::new(90.0, MIN_TOUCH_TARGET_LEN));
        if ui.add(button).on_hover_text(hover(hover_string)).clicked() {
            sim_state.toggle_pause();
        }

        let button = Button::new(RichText::new("Reset").size(16.0)).min_size(MIN_TOUCH_TARGET_VEC);
        let hover_text = hover("Rewind to day zero and resume (R)");
        if ui.add(button).on_hover_text(hover_text).clicked() {
            sim_state.reset();
        }
    });
}

fn time_display(ui: &mut Ui, sim_state: &mut SimState) {
    let display_size = Vec2::new(220.0, MIN_TOUCH_TARGET_LEN);

    let string = sim_state.time_disp.format_time(sim_state.clock.time());
    let text = RichText::new(string)
        .monospace()
        .color(Color32::WHITE)
        .size(16.0);

    let hover_string = format!(
        "Currently in {} mode\nLeft click to cycle, right click to cycle backwards",
        sim_state.time_disp
    );

    ui.scope(|ui| {
        flat_buttons(ui);
        let button = Button::new(text).wrap().min_size(display_size);
        let button_instance = ui.add(button).on_hover_text(hover(&hover_string));

        if button_instance.clicked() {
            sim_state.time_disp = sim_state.time_disp.get_next();
        }
        if button_instance.secondary_clicked() {
            sim_state.time_disp = sim_state.time_disp.get_prev();
        }
    });
}

fn time_scale(ui: &mut Ui, sim_state: &mut SimState) {
    ui.scope(|ui| {
        flat_buttons(ui);

        let slower = ui
            .add(Button::new(RichText::new("<<").monospace()).min_size(MIN_TOUCH_TARGET_VEC))
            .on_hover_text(hover("Halve the time scale ([)"));
        if slower.clicked() {
            sim_state.scale_time(0.5);
        }

        let mut scale = sim_state.clock.time_scale();
        let dv_size = Vec2::new(MIN_TOUCH_TARGET_LEN * 2.5, MIN_TOUCH_TARGET_LEN);
        let drag_value = DragValue::new(&mut scale)
            .speed(0.5)
            .range(f64::MIN_POSITIVE..=1e9)
            .custom_formatter(format_dv_number);
        let dv_instance = ui.add_sized(dv_size, drag_value).on_hover_text(hover(
            "Drag to change how fast time passes.\nClick to enter an amount manually.",
        ));
        if dv_instance.changed() {
            sim_state.clock.set_time_scale(scale);
        }

        let faster = ui
            .add(Button::new(RichText::new(">>").monospace()).min_size(MIN_TOUCH_TARGET_VEC))
            .on_hover_text(hover("Double the time scale (])"));
        if faster.clicked() {
            sim_state.scale_time(2.0);
        }
    });

    let string = format!("{}/s", TimeUnit::format_in_largest(sim_state.days_per_second()));
    ui.label(RichText::new(string).monospace().color(Color32::WHITE));
}

fn toggles(ui: &mut Ui, sim_state: &mut SimState) {
    let mode = sim_state.selection.selection_mode();
    let label = ui
        .selectable_label(mode, RichText::new("Pair mode").size(16.0))
        .on_hover_text(hover(
            "When on, every click selects a body for comparison (M)",
        ));
    if label.clicked() {
        sim_state.dispatch(Event::ToggleSelectionMode);
    }

    ui.checkbox(&mut sim_state.show_orbits, "Orbits");
    ui.checkbox(&mut sim_state.show_labels, "Labels");
}
