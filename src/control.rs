// Modified from three-d's OrbitControl struct.

use three_d::renderer::*;

/// Orbits the camera around the origin with smoothed zoom.
#[derive(Clone, Copy, Debug)]
pub struct CameraControl {
    /// The minimum distance to the origin.
    pub min_distance: f64,
    /// The maximum distance to the origin.
    pub max_distance: f64,
    /// The distance the camera is easing towards.
    pub desired_distance: f64,
    pub current_distance: f64,
}

const ZOOM_APPROACH_SPEED: f64 = 0.01;

impl CameraControl {
    pub fn new(min_distance: f64, max_distance: f64, desired_distance: f64) -> Self {
        Self {
            min_distance,
            max_distance,
            desired_distance,
            current_distance: desired_distance,
        }
    }

    /// Handles the events. Must be called each frame.
    pub fn handle_events(&mut self, camera: &mut Camera, events: &mut [Event], elapsed_time: f64) {
        for event in events.iter_mut() {
            self.handle_event(camera, event);
        }
        self.reclamp();
        self.update_zoom(elapsed_time);
        self.apply(camera);
    }

    fn handle_event(&mut self, camera: &mut Camera, event: &mut Event) {
        match event {
            Event::MouseMotion {
                delta,
                button,
                handled,
                ..
            } => {
                if *handled || *button != Some(MouseButton::Left) {
                    return;
                }
                let speed = 0.01 * self.current_distance as f32;
                camera.rotate_around_with_fixed_up(Vec3::zero(), speed * delta.0, speed * delta.1);
                *handled = true;
            }
            Event::MouseWheel { delta, handled, .. } => {
                if *handled {
                    return;
                }
                self.zoom(delta.1 as f64 * -0.002);
                *handled = true;
            }
            Event::PinchGesture { delta, handled, .. } => {
                if *handled {
                    return;
                }
                self.zoom(-*delta as f64);
                *handled = true;
            }
            _ => {}
        }
    }

    fn zoom(&mut self, delta: f64) {
        self.desired_distance =
            (self.current_distance * delta.exp()).clamp(self.min_distance, self.max_distance);
    }

    fn reclamp(&mut self) {
        self.desired_distance = self
            .desired_distance
            .clamp(self.min_distance, self.max_distance);
    }

    fn update_zoom(&mut self, elapsed_time: f64) {
        let factor = (-ZOOM_APPROACH_SPEED * elapsed_time).exp().min(1.0);
        let diff = self.desired_distance - self.current_distance;
        self.current_distance = self.desired_distance - diff * factor;
    }

    fn apply(&self, camera: &mut Camera) {
        let dir = camera.position().normalize();
        let dir = if is_nan(dir) { Vec3::unit_y() } else { dir };
        let up = camera.up();
        camera.set_view(dir * self.current_distance as f32, Vec3::zero(), up);
    }
}

fn is_nan(vec: Vec3) -> bool {
    vec.x.is_nan() || vec.y.is_nan() || vec.z.is_nan()
}

/// A left click that didn't turn into a drag.
#[derive(Clone, Copy, Debug)]
pub struct Click {
    pub position: PhysicalPoint,
    pub shift: bool,
}

/// Tells clicks apart from camera drags.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClickTracker {
    pressed_at: Option<PhysicalPoint>,
    travelled: f32,
}

/// Pointer travel, in physical pixels, beyond which a press becomes a drag.
const CLICK_SLOP: f32 = 4.0;

impl ClickTracker {
    /// Reads the frame's pointer events without consuming them.
    pub fn handle_events(&mut self, events: &[Event]) -> Vec<Click> {
        let mut clicks = Vec::new();
        for event in events {
            match event {
                Event::MousePress {
                    button: MouseButton::Left,
                    position,
                    handled,
                    ..
                } => {
                    self.pressed_at = (!*handled).then_some(*position);
                    self.travelled = 0.0;
                }
                Event::MouseMotion { delta, .. } if self.pressed_at.is_some() => {
                    self.travelled += delta.0.abs() + delta.1.abs();
                }
                Event::MouseRelease {
                    button: MouseButton::Left,
                    position,
                    modifiers,
                    handled,
                } => {
                    if self.pressed_at.take().is_some() && !*handled && self.travelled < CLICK_SLOP {
                        clicks.push(Click {
                            position: *position,
                            shift: modifiers.shift,
                        });
                    }
                }
                _ => {}
            }
        }
        clicks
    }
}
