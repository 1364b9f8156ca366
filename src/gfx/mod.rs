mod scene;

pub(crate) use scene::{Scene, label_anchors};
