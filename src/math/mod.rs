pub mod vec3;
pub mod spline;
pub mod stats;

pub use vec3::Vec3;
pub use spline::{CatmullRomSpline, evaluate_catmull_rom};
