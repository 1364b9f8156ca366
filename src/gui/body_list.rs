use super::{super::app::SimState, declare_id, to_color32};
use solar_system_demo::interaction::PickQuery;
use three_d::egui::{Color32, Context, Frame, RichText, ScrollArea, SidePanel};

declare_id!(BODY_LIST_PANEL, b"Planets!");

pub(super) fn draw(ctx: &Context, sim_state: &mut SimState) {
    let mut clicked = None;

    SidePanel::right(*BODY_LIST_PANEL_ID)
        .resizable(false)
        .exact_width(140.0)
        .frame(
            Frame::default()
                .fill(Color32::from_black_alpha(128))
                .inner_margin(8.0),
        )
        .show(ctx, |ui| {
            ui.heading("Bodies");
            ui.separator();
            ScrollArea::vertical().show(ui, |ui| {
                for body in sim_state.registry().all() {
                    let marked = sim_state.selection.marker(&body.name).is_some();
                    let text = RichText::new(&body.name)
                        .size(16.0)
                        .color(to_color32(body.color));
                    let response = ui
                        .selectable_label(marked, text)
                        .on_hover_text("Click for info, shift-click to compare");
                    if response.clicked() {
                        let shift = ui.input(|i| i.modifiers.shift);
                        clicked = Some((body.name.clone(), shift));
                    }
                }
            });
        });

    if let Some((name, shift)) = clicked {
        sim_state.pick(PickQuery::direct(name), shift);
    }
}
