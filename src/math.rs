//! Math type aliases and helper functions.

pub use nalgebra;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4x4 matrix (f32).
pub type Mat4 = nalgebra::Matrix4<f32>;

/// Transform a point given as a plain array by a 4x4 matrix (w = 1).
pub fn transform_point(m: &Mat4, p: [f32; 3]) -> Vec3 {
    m.transform_point(&nalgebra::Point3::new(p[0], p[1], p[2]))
        .coords
}
