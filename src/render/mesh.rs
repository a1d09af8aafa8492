//! Primitive mesh generation
//!
//! Shapes follow the usual scene-graph conventions: centered on the origin,
//! Y up, round things revolved around the Y axis. Revolved shapes are smooth
//! shaded, boxes and polyhedra are flat shaded (one normal per face).

use macroquad::math::{Mat3, Mat4, Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// CPU-side triangle mesh in model space
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u16>,
}

/// One ring of a revolved surface: (radius, y) and the outward normal in
/// the same (radial, vertical) plane
type LatheRing = (Vec2, Vec2);

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[cfg(test)]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u16 {
        let index = self.positions.len();
        debug_assert!(index <= u16::MAX as usize, "mesh exceeds u16 index range");
        self.positions.push(position);
        self.normals.push(normal);
        index as u16
    }

    fn push_triangle(&mut self, a: u16, b: u16, c: u16) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Flat convex polygon, fanned from the first corner
    fn push_flat_polygon(&mut self, corners: &[Vec3], normal: Vec3) {
        let base = self.positions.len() as u16;
        for &corner in corners {
            self.push_vertex(corner, normal);
        }
        for i in 1..corners.len().saturating_sub(1) as u16 {
            self.push_triangle(base, base + i, base + i + 1);
        }
    }

    /// Bake another mesh into this one under a transform
    pub fn append(&mut self, other: &MeshData, transform: &Mat4) {
        let normal_matrix = normal_matrix(transform);
        let base = self.positions.len() as u16;
        for (p, n) in other.positions.iter().zip(&other.normals) {
            let world_n = (normal_matrix * *n).normalize_or_zero();
            self.push_vertex(transform.transform_point3(*p), world_n);
        }
        self.indices.extend(other.indices.iter().map(|i| base + i));
    }

    /// Highest local Y of any vertex
    #[cfg(test)]
    pub fn max_y(&self) -> f32 {
        self.positions
            .iter()
            .map(|p| p.y)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Revolved shapes
    // ─────────────────────────────────────────────────────────────────────

    /// Revolve a profile around Y. Rings are connected in order.
    fn lathe(rings: &[LatheRing], segments: usize) -> MeshData {
        let segments = segments.max(2);
        let mut mesh = MeshData::new();

        for &(point, normal) in rings {
            for j in 0..segments {
                let theta = j as f32 / segments as f32 * TAU;
                let (sin, cos) = theta.sin_cos();
                mesh.push_vertex(
                    Vec3::new(point.x * sin, point.y, point.x * cos),
                    Vec3::new(normal.x * sin, normal.y, normal.x * cos).normalize_or_zero(),
                );
            }
        }

        for k in 0..rings.len().saturating_sub(1) {
            let row = (k * segments) as u16;
            let next_row = ((k + 1) * segments) as u16;
            for j in 0..segments {
                let j0 = j as u16;
                let j1 = ((j + 1) % segments) as u16;
                mesh.push_triangle(row + j0, next_row + j0, row + j1);
                mesh.push_triangle(row + j1, next_row + j0, next_row + j1);
            }
        }
        mesh
    }

    /// Flat disc at height `y` facing up (`facing = 1`) or down (`-1`)
    fn push_cap(&mut self, y: f32, radius: f32, segments: usize, facing: f32) {
        let normal = Vec3::new(0.0, facing, 0.0);
        let center = self.push_vertex(Vec3::new(0.0, y, 0.0), normal);
        let first = self.positions.len() as u16;
        for j in 0..segments {
            let theta = j as f32 / segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            self.push_vertex(Vec3::new(radius * sin, y, radius * cos), normal);
        }
        for j in 0..segments as u16 {
            let next = (j + 1) % segments as u16;
            self.push_triangle(center, first + j, first + next);
        }
    }

    /// Truncated cone (cylinder when radii match), capped, centered on Y
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, segments: usize) -> MeshData {
        let half = height * 0.5;
        let slope = Vec2::new(height, radius_bottom - radius_top).normalize_or_zero();
        let mut mesh = Self::lathe(
            &[
                (Vec2::new(radius_bottom, -half), slope),
                (Vec2::new(radius_top, half), slope),
            ],
            segments,
        );
        let segments = segments.max(2);
        if radius_top > 0.0 {
            mesh.push_cap(half, radius_top, segments, 1.0);
        }
        if radius_bottom > 0.0 {
            mesh.push_cap(-half, radius_bottom, segments, -1.0);
        }
        mesh
    }

    pub fn cone(radius: f32, height: f32, segments: usize) -> MeshData {
        Self::cylinder(0.0, radius, height, segments)
    }

    pub fn sphere(radius: f32, width_segments: usize, height_segments: usize) -> MeshData {
        Self::sphere_cap(radius, width_segments, height_segments, PI)
    }

    /// Sphere section from the top pole down to polar angle `theta_length`
    pub fn sphere_cap(
        radius: f32,
        width_segments: usize,
        height_segments: usize,
        theta_length: f32,
    ) -> MeshData {
        let rows = height_segments.max(2);
        let rings: Vec<LatheRing> = (0..=rows)
            .map(|i| {
                let theta = i as f32 / rows as f32 * theta_length;
                let (sin, cos) = theta.sin_cos();
                (Vec2::new(radius * sin, radius * cos), Vec2::new(sin, cos))
            })
            .collect();
        Self::lathe(&rings, width_segments)
    }

    /// Cylinder of `length` with hemispherical ends; total height `length + 2r`
    pub fn capsule(radius: f32, length: f32, cap_segments: usize, radial_segments: usize) -> MeshData {
        let caps = cap_segments.max(1);
        let half = length * 0.5;
        let mut rings: Vec<LatheRing> = Vec::with_capacity(caps * 2 + 2);

        for i in 0..=caps {
            let a = -FRAC_PI_2 + i as f32 / caps as f32 * FRAC_PI_2;
            let (sin, cos) = a.sin_cos();
            rings.push((Vec2::new(radius * cos, -half + radius * sin), Vec2::new(cos, sin)));
        }
        for i in 0..=caps {
            let a = i as f32 / caps as f32 * FRAC_PI_2;
            let (sin, cos) = a.sin_cos();
            rings.push((Vec2::new(radius * cos, half + radius * sin), Vec2::new(cos, sin)));
        }
        Self::lathe(&rings, radial_segments)
    }

    /// Flat disc in the XZ plane facing +Y
    pub fn disc(radius: f32, segments: usize) -> MeshData {
        let mut mesh = MeshData::new();
        mesh.push_cap(0.0, radius, segments.max(3), 1.0);
        mesh
    }

    /// Flat annulus in the XZ plane facing +Y
    pub fn ring(inner: f32, outer: f32, segments: usize) -> MeshData {
        let segments = segments.max(3);
        let mut mesh = MeshData::new();
        for j in 0..segments {
            let theta = j as f32 / segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            mesh.push_vertex(Vec3::new(inner * sin, 0.0, inner * cos), Vec3::Y);
            mesh.push_vertex(Vec3::new(outer * sin, 0.0, outer * cos), Vec3::Y);
        }
        for j in 0..segments as u16 {
            let next = (j + 1) % segments as u16;
            let (i0, o0, i1, o1) = (j * 2, j * 2 + 1, next * 2, next * 2 + 1);
            mesh.push_triangle(i0, o0, i1);
            mesh.push_triangle(i1, o0, o1);
        }
        mesh
    }

    // ─────────────────────────────────────────────────────────────────────
    // Flat shaded solids
    // ─────────────────────────────────────────────────────────────────────

    pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
        let h = Vec3::new(width, height, depth) * 0.5;
        let corner = |x: f32, y: f32, z: f32| Vec3::new(x * h.x, y * h.y, z * h.z);
        let mut mesh = MeshData::new();
        let faces: [(Vec3, [Vec3; 4]); 6] = [
            (Vec3::X, [corner(1., -1., 1.), corner(1., -1., -1.), corner(1., 1., -1.), corner(1., 1., 1.)]),
            (Vec3::NEG_X, [corner(-1., -1., -1.), corner(-1., -1., 1.), corner(-1., 1., 1.), corner(-1., 1., -1.)]),
            (Vec3::Y, [corner(-1., 1., 1.), corner(1., 1., 1.), corner(1., 1., -1.), corner(-1., 1., -1.)]),
            (Vec3::NEG_Y, [corner(-1., -1., -1.), corner(1., -1., -1.), corner(1., -1., 1.), corner(-1., -1., 1.)]),
            (Vec3::Z, [corner(-1., -1., 1.), corner(1., -1., 1.), corner(1., 1., 1.), corner(-1., 1., 1.)]),
            (Vec3::NEG_Z, [corner(1., -1., -1.), corner(-1., -1., -1.), corner(-1., 1., -1.), corner(1., 1., -1.)]),
        ];
        for (normal, corners) in faces {
            mesh.push_flat_polygon(&corners, normal);
        }
        mesh
    }

    pub fn octahedron(radius: f32) -> MeshData {
        let mut mesh = MeshData::new();
        for sx in [1.0f32, -1.0] {
            for sy in [1.0f32, -1.0] {
                for sz in [1.0f32, -1.0] {
                    let corners = [
                        Vec3::new(sx * radius, 0.0, 0.0),
                        Vec3::new(0.0, sy * radius, 0.0),
                        Vec3::new(0.0, 0.0, sz * radius),
                    ];
                    let normal = Vec3::new(sx, sy, sz).normalize();
                    mesh.push_flat_polygon(&corners, normal);
                }
            }
        }
        mesh
    }

    /// Regular dodecahedron with every vertex at `radius`
    pub fn dodecahedron(radius: f32) -> MeshData {
        let phi = (1.0 + 5f32.sqrt()) * 0.5;
        let inv = 1.0 / phi;

        let mut vertices: Vec<Vec3> = Vec::with_capacity(20);
        for sx in [1.0f32, -1.0] {
            for sy in [1.0f32, -1.0] {
                vertices.push(Vec3::new(0.0, sx * inv, sy * phi));
                vertices.push(Vec3::new(sx * inv, sy * phi, 0.0));
                vertices.push(Vec3::new(sx * phi, 0.0, sy * inv));
                for sz in [1.0f32, -1.0] {
                    vertices.push(Vec3::new(sx, sy, sz));
                }
            }
        }
        let vertices: Vec<Vec3> = vertices.iter().map(|v| v.normalize() * radius).collect();

        // Face centers sit on the dual icosahedron: cyclic permutations of (0, phi, 1)
        let mut face_normals: Vec<Vec3> = Vec::with_capacity(12);
        for sa in [1.0f32, -1.0] {
            for sb in [1.0f32, -1.0] {
                face_normals.push(Vec3::new(0.0, sa * phi, sb));
                face_normals.push(Vec3::new(sb, 0.0, sa * phi));
                face_normals.push(Vec3::new(sa * phi, sb, 0.0));
            }
        }

        let mut mesh = MeshData::new();
        for normal in face_normals {
            let normal = normal.normalize();
            let mut ranked: Vec<Vec3> = vertices.clone();
            ranked.sort_by(|a, b| b.dot(normal).total_cmp(&a.dot(normal)));
            let mut face: Vec<Vec3> = ranked.into_iter().take(5).collect();

            let center = face.iter().copied().sum::<Vec3>() / 5.0;
            let u = (face[0] - center).normalize();
            let w = normal.cross(u);
            face.sort_by(|a, b| {
                let angle = |p: &Vec3| (*p - center).dot(w).atan2((*p - center).dot(u));
                angle(a).total_cmp(&angle(b))
            });
            mesh.push_flat_polygon(&face, normal);
        }
        mesh
    }

    // ─────────────────────────────────────────────────────────────────────
    // Swept shapes
    // ─────────────────────────────────────────────────────────────────────

    /// Open tube following a polyline, with a radius per path point
    pub fn tube(path: &[Vec3], radius: f32, radial_segments: usize) -> MeshData {
        let radial = radial_segments.max(3);
        let mut mesh = MeshData::new();
        if path.len() < 2 {
            return mesh;
        }

        for (i, &center) in path.iter().enumerate() {
            let prev = path[i.saturating_sub(1)];
            let next = path[(i + 1).min(path.len() - 1)];
            let tangent = (next - prev).normalize_or_zero();
            let reference = if tangent.y.abs() < 0.99 { Vec3::Y } else { Vec3::X };
            let normal = tangent.cross(reference).normalize_or_zero();
            let binormal = tangent.cross(normal);

            for j in 0..radial {
                let a = j as f32 / radial as f32 * TAU;
                let (sin, cos) = a.sin_cos();
                let dir = normal * cos + binormal * sin;
                mesh.push_vertex(center + dir * radius, dir);
            }
        }

        for k in 0..path.len() - 1 {
            let row = (k * radial) as u16;
            let next_row = ((k + 1) * radial) as u16;
            for j in 0..radial {
                let j0 = j as u16;
                let j1 = ((j + 1) % radial) as u16;
                mesh.push_triangle(row + j0, next_row + j0, row + j1);
                mesh.push_triangle(row + j1, next_row + j0, next_row + j1);
            }
        }
        mesh
    }
}

/// Sample a uniform Catmull-Rom spline through `points`
///
/// Endpoints are duplicated as phantom control points, so the curve passes
/// through the first and last point. Returns `samples + 1` points.
pub fn catmull_rom(points: &[Vec3], samples: usize) -> Vec<Vec3> {
    if points.len() < 2 || samples == 0 {
        return points.to_vec();
    }
    let segments = points.len() - 1;
    let at = |i: isize| points[i.clamp(0, segments as isize) as usize];

    (0..=samples)
        .map(|s| {
            let u = s as f32 / samples as f32 * segments as f32;
            let seg = (u.floor() as usize).min(segments - 1);
            let t = u - seg as f32;
            let i = seg as isize;
            let (p0, p1, p2, p3) = (at(i - 1), at(i), at(i + 1), at(i + 2));
            let t2 = t * t;
            let t3 = t2 * t;
            0.5 * ((2.0 * p1)
                + (p2 - p0) * t
                + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
                + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
        })
        .collect()
}

/// Inverse-transpose of the upper 3x3, for transforming normals
pub fn normal_matrix(transform: &Mat4) -> Mat3 {
    let m = Mat3::from_mat4(*transform);
    if m.determinant().abs() < 1e-12 {
        m
    } else {
        m.inverse().transpose()
    }
}
