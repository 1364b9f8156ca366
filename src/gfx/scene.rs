use std::f64::consts::TAU;
use std::sync::LazyLock;

use glam::DVec3;
use three_d::{
    Camera, ColorMaterial, Context, CpuMaterial, CpuMesh, Gm, InstancedMesh, Instances, Mat4,
    Object, PhysicalMaterial, RenderStates, Srgba, Vec3, Vec4, Viewport,
};

use solar_system_demo::{
    interaction::MarkerKind,
    sim::{body::CelestialBody, clock::Positions},
};

use crate::app::SimState;

pub const LOD_LEVEL_COUNT: usize = 6;

/// Level of detail subdivisions for the celestial object(s).
///
/// Smaller indices mean smaller distance which means higher detail.
pub const LOD_SUBDIVS: [u32; LOD_LEVEL_COUNT] = [32, 24, 16, 12, 8, 5];

/// Level of detail cutoffs, in radians.
///
/// If the radial size of a sphere `theta` >= a cutoff `c_i`,
/// then subdivision index `i` should be used. Anything smaller than the
/// last cutoff still gets the coarsest mesh.
pub const LOD_CUTOFFS: [f64; LOD_LEVEL_COUNT] = [0.25, 0.125, 0.062, 0.031, 0.015, 0.0];

const fn get_lod_type(radial_size: f64) -> usize {
    let mut i = 0;
    while i < LOD_LEVEL_COUNT {
        if radial_size >= LOD_CUTOFFS[i] {
            return i;
        }
        i += 1;
    }
    LOD_LEVEL_COUNT - 1
}

const _: () = {
    assert!(
        LOD_SUBDIVS.len() == LOD_CUTOFFS.len(),
        "LOD_SUBDIVS and LOD_CUTOFFS should have the same length"
    )
};

pub static SPHERE_MESHES: LazyLock<[CpuMesh; LOD_LEVEL_COUNT]> = LazyLock::new(|| {
    let mut array = core::array::from_fn(|_| CpuMesh::default());

    for (i, &subdivs) in LOD_SUBDIVS.iter().enumerate() {
        array[i] = CpuMesh::sphere(subdivs);
    }

    array
});

static DOT_MESH: LazyLock<CpuMesh> = LazyLock::new(|| CpuMesh::sphere(4));

const POINTS_PER_ORBIT: usize = 128;
const RAD_PER_POINT: f64 = TAU / POINTS_PER_ORBIT as f64;
const POINTS_PER_MARKER: usize = 40;

const SELECTED_COLOR: Srgba = Srgba {
    r: 0,
    g: 255,
    b: 0,
    a: 255,
};
const INFO_COLOR: Srgba = Srgba {
    r: 0,
    g: 255,
    b: 255,
    a: 255,
};

pub(crate) struct Scene {
    bodies: [Gm<InstancedMesh, PhysicalMaterial>; LOD_LEVEL_COUNT],
    stars: Gm<InstancedMesh, ColorMaterial>,
    dots: Gm<InstancedMesh, ColorMaterial>,
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a dyn Object;
    type IntoIter = std::vec::IntoIter<&'a dyn Object>;

    fn into_iter(self) -> Self::IntoIter {
        let mut objects: Vec<&dyn Object> = Vec::with_capacity(LOD_LEVEL_COUNT + 2);
        objects.extend(self.bodies.iter().map(|gm| gm as &dyn Object));
        objects.push(&self.stars);
        objects.push(&self.dots);
        objects.into_iter()
    }
}

fn get_radial_size(radius: f64, distance: f64) -> f64 {
    2.0 * radius / distance
}

fn get_matrix(position: DVec3, radius: f64) -> Mat4 {
    let (x, y, z) = (position.x as f32, position.y as f32, position.z as f32);
    let r = radius as f32;
    Mat4 {
        x: Vec4::new(r, 0.0, 0.0, 0.0),
        y: Vec4::new(0.0, r, 0.0, 0.0),
        z: Vec4::new(0.0, 0.0, r, 0.0),
        w: Vec4::new(x, y, z, 1.0),
    }
}

fn empty_instances() -> Instances {
    Instances {
        transformations: Vec::new(),
        colors: Some(Vec::new()),
        texture_transformations: None,
    }
}

fn push_instance(instances: &mut Instances, matrix: Mat4, color: Srgba) {
    instances.transformations.push(matrix);
    if let Some(colors) = &mut instances.colors {
        colors.push(color);
    }
}

fn dim(color: Srgba) -> Srgba {
    Srgba::new_opaque(color.r / 2, color.g / 2, color.b / 2)
}

fn unlit_material() -> ColorMaterial {
    ColorMaterial {
        color: Srgba::WHITE,
        texture: None,
        render_states: RenderStates::default(),
        is_transparent: false,
    }
}

impl Scene {
    pub(crate) fn generate(context: &Context, sim: &SimState, positions: &Positions, camera_pos: DVec3) -> Self {
        let mut body_instances: [Instances; LOD_LEVEL_COUNT] = core::array::from_fn(|_| empty_instances());
        let mut star_instances = empty_instances();
        let mut dot_instances = empty_instances();

        for body in sim.registry().all() {
            let Some(position) = positions.get(&body.name) else {
                continue;
            };
            let matrix = get_matrix(position, body.display_radius);

            if body.is_star() {
                push_instance(&mut star_instances, matrix, body.color);
            } else {
                let size = get_radial_size(body.display_radius, position.distance(camera_pos));
                push_instance(&mut body_instances[get_lod_type(size)], matrix, body.color);

                if sim.show_orbits {
                    add_orbit_dots(&mut dot_instances, body);
                }
            }

            if let Some(kind) = sim.selection.marker(&body.name) {
                add_marker_ring(&mut dot_instances, body, position, kind);
            }
        }

        let material = PhysicalMaterial::new_opaque(context, &CpuMaterial::default());

        Self {
            bodies: core::array::from_fn(|index| {
                Gm::new(
                    InstancedMesh::new(context, &body_instances[index], &SPHERE_MESHES[index]),
                    material.clone(),
                )
            }),
            stars: Gm::new(
                InstancedMesh::new(context, &star_instances, &SPHERE_MESHES[0]),
                unlit_material(),
            ),
            dots: Gm::new(
                InstancedMesh::new(context, &dot_instances, &DOT_MESH),
                unlit_material(),
            ),
        }
    }
}

fn add_orbit_dots(instances: &mut Instances, body: &CelestialBody) {
    let r = body.orbital_radius;
    let dot_size = (r * 0.003).max(0.12);
    let color = dim(body.color);
    for i in 0..POINTS_PER_ORBIT {
        let angle = i as f64 * RAD_PER_POINT;
        let p = DVec3::new(r * angle.cos(), 0.0, r * angle.sin());
        push_instance(instances, get_matrix(p, dot_size), color);
    }
}

fn add_marker_ring(instances: &mut Instances, body: &CelestialBody, center: DVec3, kind: MarkerKind) {
    let ring = body.display_radius * 1.6 + 0.5;
    let dot_size = (body.display_radius * 0.08).max(0.1);
    let color = match kind {
        MarkerKind::Selected => SELECTED_COLOR,
        MarkerKind::Info => INFO_COLOR,
    };
    for i in 0..POINTS_PER_MARKER {
        let angle = TAU * i as f64 / POINTS_PER_MARKER as f64;
        let p = center + DVec3::new(ring * angle.cos(), 0.0, ring * angle.sin());
        push_instance(instances, get_matrix(p, dot_size), color);
    }
}

/// Where to draw each body's name, in egui points.
///
/// Bodies behind the camera are skipped.
pub(crate) fn label_anchors(
    camera: &Camera,
    sim: &SimState,
    positions: &Positions,
    viewport: Viewport,
    device_pixel_ratio: f32,
) -> Vec<(String, [f32; 2], Srgba)> {
    let forward = camera.view_direction();
    let forward = DVec3::new(forward.x as f64, forward.y as f64, forward.z as f64);
    let eye = camera.position();
    let eye = DVec3::new(eye.x as f64, eye.y as f64, eye.z as f64);

    sim.registry()
        .all()
        .iter()
        .filter_map(|body| {
            let p = positions.get(&body.name)?;
            let top = p + DVec3::Y * body.display_radius;
            if (top - eye).dot(forward) <= 0.0 {
                return None;
            }
            let pixel = camera.pixel_at_position(Vec3::new(top.x as f32, top.y as f32, top.z as f32));
            let x = pixel.x / device_pixel_ratio;
            let y = (viewport.height as f32 - pixel.y) / device_pixel_ratio;
            Some((body.name.clone(), [x, y], body.color))
        })
        .collect()
}
