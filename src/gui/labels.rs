use three_d::egui::{Align2, Area, Context, FontId, Order, Pos2};

use super::{LabelAnchor, declare_id, to_color32};

declare_id!(LABEL_LAYER, b"Nametags");

pub(super) fn draw(ctx: &Context, labels: &[LabelAnchor]) {
    Area::new(*LABEL_LAYER_ID)
        .order(Order::Background)
        .interactable(false)
        .fixed_pos(Pos2::ZERO)
        .show(ctx, |ui| {
            let painter = ui.painter();
            for (name, [x, y], color) in labels {
                painter.text(
                    Pos2::new(*x, *y - 4.0),
                    Align2::CENTER_BOTTOM,
                    name,
                    FontId::proportional(13.0),
                    to_color32(*color),
                );
            }
        });
}
