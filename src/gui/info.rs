use super::{super::app::SimState, copy_text, declare_id, unit_box::unit_combo_box};
use solar_system_demo::interaction::Event;
use three_d::egui::{Align2, Color32, Context, Frame, RichText, Window};

declare_id!(salt_only, CAPTION_WINDOW, b"Caption_");
declare_id!(salt_only, LENGTH_UNIT_COMBO_BOX, b"AUorKilo");

pub(super) fn draw(ctx: &Context, sim_state: &mut SimState) {
    let title = sim_state.caption.title();
    let text = sim_state.caption.text(sim_state.length_unit);

    Window::new(RichText::new(&title).size(18.0))
        .id(three_d::egui::Id::new(CAPTION_WINDOW_SALT))
        .anchor(Align2::LEFT_TOP, [12.0, 12.0])
        .collapsible(true)
        .resizable(false)
        .default_width(360.0)
        .frame(
            Frame::window(&ctx.style())
                .fill(Color32::from_black_alpha(192))
                .inner_margin(12.0),
        )
        .show(ctx, |ui| {
            ui.set_max_width(360.0);
            ui.label(RichText::new(&text).size(15.0));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.button("Copy").clicked() {
                    copy_text(&text);
                }
                if ui
                    .button("Clear")
                    .on_hover_text("Drop the selection and markers (C)")
                    .clicked()
                {
                    sim_state.dispatch(Event::Clear);
                }

                unit_combo_box(ui, LENGTH_UNIT_COMBO_BOX_SALT, &mut sim_state.length_unit);
            });
        });
}
