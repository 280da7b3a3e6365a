/// Triangle soups for the built-in primitives
///
/// Everything is centered on the origin with +Y up, matching the core's
/// primitive conventions.
use nalgebra::Point3;
use plantviz_core::Primitive;
use std::f32::consts::{PI, TAU};

pub type Triangle = [Point3<f32>; 3];

/// Segments around the equator / circumference
const SLICES: usize = 16;
/// Rings from pole to pole
const STACKS: usize = 8;

pub fn primitive(shape: &Primitive) -> Vec<Triangle> {
    match *shape {
        Primitive::Sphere { radius } => sphere(radius, STACKS, SLICES),
        Primitive::Cube { width, height, depth } => cuboid(width, height, depth),
        Primitive::Cylinder { radius, height } => cylinder(radius, height, SLICES),
    }
}

pub fn sphere(radius: f32, stacks: usize, slices: usize) -> Vec<Triangle> {
    let point = |stack: usize, slice: usize| {
        let polar = PI * stack as f32 / stacks as f32;
        let azimuth = TAU * slice as f32 / slices as f32;
        Point3::new(
            radius * polar.sin() * azimuth.cos(),
            radius * polar.cos(),
            radius * polar.sin() * azimuth.sin(),
        )
    };

    let mut triangles = Vec::with_capacity(stacks * slices * 2);
    for stack in 0..stacks {
        for slice in 0..slices {
            let a = point(stack, slice);
            let b = point(stack + 1, slice);
            let c = point(stack + 1, slice + 1);
            let d = point(stack, slice + 1);
            // The pole rows collapse one triangle of each quad
            if stack != 0 {
                triangles.push([a, c, d]);
            }
            if stack + 1 != stacks {
                triangles.push([a, b, c]);
            }
        }
    }
    triangles
}

pub fn cuboid(width: f32, height: f32, depth: f32) -> Vec<Triangle> {
    let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);
    let quad = |a: [f32; 3], b: [f32; 3], c: [f32; 3], d: [f32; 3]| {
        let [a, b, c, d] = [a, b, c, d].map(Point3::from);
        [[a, b, c], [a, c, d]]
    };

    [
        // Front face
        quad([-x, -y, z], [x, -y, z], [x, y, z], [-x, y, z]),
        // Back face
        quad([-x, -y, -z], [-x, y, -z], [x, y, -z], [x, -y, -z]),
        // Top face
        quad([-x, y, -z], [-x, y, z], [x, y, z], [x, y, -z]),
        // Bottom face
        quad([-x, -y, -z], [x, -y, -z], [x, -y, z], [-x, -y, z]),
        // Right face
        quad([x, -y, -z], [x, y, -z], [x, y, z], [x, -y, z]),
        // Left face
        quad([-x, -y, -z], [-x, -y, z], [-x, y, z], [-x, y, -z]),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn cylinder(radius: f32, height: f32, slices: usize) -> Vec<Triangle> {
    let half = height / 2.0;
    let rim = |slice: usize, y: f32| {
        let azimuth = TAU * slice as f32 / slices as f32;
        Point3::new(radius * azimuth.cos(), y, radius * azimuth.sin())
    };
    let top = Point3::new(0.0, half, 0.0);
    let bottom = Point3::new(0.0, -half, 0.0);

    let mut triangles = Vec::with_capacity(slices * 4);
    for slice in 0..slices {
        let (b0, b1) = (rim(slice, -half), rim(slice + 1, -half));
        let (t0, t1) = (rim(slice, half), rim(slice + 1, half));
        triangles.push([b0, t1, b1]);
        triangles.push([b0, t0, t1]);
        triangles.push([top, t1, t0]);
        triangles.push([bottom, b0, b1]);
    }
    triangles
}
