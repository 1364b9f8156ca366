use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use glam::DVec3;
use three_d::{
    AmbientLight, Camera, ClearState, Context, Degrees, DirectionalLight, FrameInput,
    FrameOutput, GUI, Srgba, Vec3, Viewport,
    window::{Window, WindowSettings},
};

use solar_system_demo::{
    cfg,
    interaction::{PickQuery, Ray},
    logging,
};

use self::{
    app::SimState,
    control::{CameraControl, ClickTracker},
    gfx::{Scene, label_anchors},
};

mod app;
mod control;
mod gfx;
mod gui;
mod keybinds;

#[derive(Debug, Parser)]
#[command(version, about = "Interactive 3D solar system")]
struct Cli {
    /// Config file to read instead of the per-user one.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();
    let config = cfg::load_or_default(cli.config.as_deref());

    Program::new(SimState::new(&config.desktop))?.run();
    Ok(())
}

pub(crate) struct Program {
    window: Option<Window>,
    context: Context,
    camera: Camera,
    control: CameraControl,
    clicks: ClickTracker,
    gui: GUI,

    top_light: DirectionalLight,
    ambient_light: AmbientLight,

    sim_state: SimState,
}

impl Program {
    fn new_window() -> anyhow::Result<Window> {
        Window::new(WindowSettings {
            title: "Solar System Demo".into(),
            min_size: (64, 64),
            ..Default::default()
        })
        .context("Error when creating window")
    }
    fn new_camera(viewport: Viewport) -> Camera {
        Camera::new_perspective(
            viewport,
            Vec3::new(0.0, 250.0, 350.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Degrees { 0: 45.0 },
            0.1,
            1e4,
        )
    }
    fn new_control() -> CameraControl {
        CameraControl::new(20.0, 2000.0, 430.0)
    }
    fn new_dir_light(context: &Context) -> DirectionalLight {
        DirectionalLight::new(context, 1.0, Srgba::WHITE, Vec3::new(0.0, -0.5, -0.5))
    }
    fn new_ambient_light(context: &Context) -> AmbientLight {
        AmbientLight::new(context, 0.3, Srgba::WHITE)
    }

    fn camera_pos_64(&self) -> DVec3 {
        let pos = self.camera.position();
        DVec3::new(pos.x as f64, pos.y as f64, pos.z as f64)
    }

    pub(crate) fn new(sim_state: SimState) -> anyhow::Result<Self> {
        let window = Self::new_window()?;
        let context = window.gl();
        let camera = Self::new_camera(window.viewport());
        let gui = gui::create(&context);

        let top_light = Self::new_dir_light(&context);
        let ambient_light = Self::new_ambient_light(&context);

        tracing::info!(bodies = sim_state.registry().len(), "window ready");

        Ok(Self {
            window: Some(window),
            context,
            camera,
            control: Self::new_control(),
            clicks: ClickTracker::default(),
            gui,
            top_light,
            ambient_light,
            sim_state,
        })
    }

    pub(crate) fn run(mut self) {
        if let Some(window) = self.window.take() {
            window.render_loop(move |frame_input| self.tick(frame_input));
        }
    }

    /// Turns a click into a world-space ray through that pixel.
    fn ray_at(&self, pixel: three_d::PhysicalPoint) -> Option<Ray> {
        let origin = self.camera.position_at_pixel(pixel);
        let dir = self.camera.view_direction_at_pixel(pixel);
        Ray::new(
            DVec3::new(origin.x as f64, origin.y as f64, origin.z as f64),
            DVec3::new(dir.x as f64, dir.y as f64, dir.z as f64),
        )
    }

    fn tick(&mut self, mut frame_input: FrameInput) -> FrameOutput {
        self.camera.set_viewport(frame_input.viewport);

        let positions = self.sim_state.clock.positions();
        let labels = label_anchors(
            &self.camera,
            &self.sim_state,
            &positions,
            frame_input.viewport,
            frame_input.device_pixel_ratio,
        );

        gui::update(
            &mut self.gui,
            &mut self.sim_state,
            &mut frame_input.events,
            frame_input.accumulated_time,
            frame_input.viewport,
            frame_input.device_pixel_ratio,
            &labels,
        );

        keybinds::handle_keybinds(&mut self.sim_state, &mut frame_input.events, &self.gui);

        for click in self.clicks.handle_events(&frame_input.events) {
            match self.ray_at(click.position) {
                Some(ray) => self.sim_state.pick(PickQuery::from_ray(ray), click.shift),
                None => tracing::debug!("click produced a degenerate ray"),
            }
        }

        self.control.handle_events(
            &mut self.camera,
            &mut frame_input.events,
            frame_input.elapsed_time,
        );

        self.sim_state.advance(frame_input.elapsed_time);

        let positions = self.sim_state.clock.positions();
        let scene = Scene::generate(
            &self.context,
            &self.sim_state,
            &positions,
            self.camera_pos_64(),
        );

        let screen = frame_input.screen();
        let res = screen
            .clear(ClearState::color_and_depth(0.0, 0.0, 0.0, 1.0, 1.0))
            .render(
                &self.camera,
                &scene,
                &[&self.top_light, &self.ambient_light],
            )
            .write(|| self.gui.render());
        if let Err(e) = res {
            tracing::error!("Failed to render frame: {e}");
        }

        FrameOutput::default()
    }
}
