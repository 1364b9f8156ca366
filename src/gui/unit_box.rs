use std::hash::Hash;

use solar_system_demo::units::UnitEnum;
use three_d::egui::{ComboBox, Response, Ui};

const TEXT_AUTO: &str = "auto";

/// A combo box over every unit of `U`, plus an automatic choice stored as `None`.
pub(super) fn unit_combo_box<U: UnitEnum>(
    ui: &mut Ui,
    id_salt: impl Hash,
    unit: &mut Option<U>,
) -> Response {
    let selected = match unit {
        Some(u) => u.to_string(),
        None => TEXT_AUTO.to_owned(),
    };

    ComboBox::from_id_salt(id_salt)
        .selected_text(selected)
        .show_ui(ui, |ui| {
            for candidate in U::iter() {
                ui.selectable_value(unit, Some(candidate), candidate.to_string());
            }
            ui.separator();
            ui.selectable_value(unit, None, TEXT_AUTO);
        })
        .response
        .on_hover_text("Unit for distances; auto picks the largest that fits")
}
