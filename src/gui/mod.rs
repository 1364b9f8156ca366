use three_d::{
    Context as ThreeDContext, Event as ThreeDEvent, GUI, Srgba, Viewport,
    egui::{self, Color32, Context as EguiContext, FontId, Vec2},
};

use super::app::SimState;

mod body_list;
mod bottom_bar;
mod info;
mod labels;
mod unit_box;

macro_rules! declare_id {
    (salt_only, $name:ident, $val:expr) => {
        ::pastey::paste! {
            const [<$name _SALT>]: ::core::num::NonZeroU64 =
                ::core::num::NonZeroU64::new(u64::from_be_bytes(*$val)).unwrap();
        }
    };
    ($name:ident, $val:expr) => {
        ::pastey::paste! {
            const [<$name _SALT>]: ::core::num::NonZeroU64 =
                ::core::num::NonZeroU64::new(u64::from_be_bytes(*$val)).unwrap();
            const [<$name _ID>]: ::std::sync::LazyLock<::three_d::egui::Id> =
                ::std::sync::LazyLock::new(|| ::three_d::egui::Id::new([<$name _SALT>]));
        }
    };
}
use declare_id;

const MIN_TOUCH_TARGET_LEN: f32 = 40.0;
const MIN_TOUCH_TARGET_VEC: Vec2 = Vec2::splat(MIN_TOUCH_TARGET_LEN);

/// A body name and where to draw it, in egui points.
pub(crate) type LabelAnchor = (String, [f32; 2], Srgba);

pub(super) fn create(context: &ThreeDContext) -> GUI {
    let gui = GUI::new(context);
    gui.context().style_mut(|styles| {
        styles.visuals.override_text_color = Some(Color32::WHITE);
        styles.text_styles.insert(
            egui::TextStyle::Monospace,
            FontId::monospace(15.0),
        );
    });
    gui
}

/// Runs one egui frame. Returns whether the GUI changed.
pub(super) fn update(
    gui: &mut GUI,
    sim_state: &mut SimState,
    events: &mut Vec<ThreeDEvent>,
    accumulated_time_ms: f64,
    viewport: Viewport,
    device_pixel_ratio: f32,
    labels: &[LabelAnchor],
) -> bool {
    gui.update(
        events,
        accumulated_time_ms,
        viewport,
        device_pixel_ratio,
        |ctx| handle_ui(ctx, sim_state, labels),
    )
}

fn handle_ui(ctx: &EguiContext, sim_state: &mut SimState, labels: &[LabelAnchor]) {
    bottom_bar::draw(ctx, sim_state);
    info::draw(ctx, sim_state);
    body_list::draw(ctx, sim_state);
    if sim_state.show_labels {
        labels::draw(ctx, labels);
    }
}

fn to_color32(color: Srgba) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

fn copy_text(text: &str) {
    match arboard::Clipboard::new() {
        Ok(mut cb) => {
            if let Err(e) = cb.set_text(text.to_owned()) {
                tracing::warn!("Failed to set clipboard text: {e}");
            }
        }
        Err(e) => tracing::warn!("Failed to open clipboard: {e}"),
    }
}
