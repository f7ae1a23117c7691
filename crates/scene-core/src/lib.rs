pub mod camera;
pub mod constants;
pub mod lights;
pub mod model;
pub mod ripple;
pub mod scene;

pub use camera::*;
pub use constants::*;
pub use lights::*;
pub use model::*;
pub use ripple::*;
pub use scene::*;

// Shaders bundled as string constants
pub static WATER_WGSL: &str = include_str!("../shaders/water.wgsl");
pub static BOAT_WGSL: &str = include_str!("../shaders/boat.wgsl");
pub static MARKER_WGSL: &str = include_str!("../shaders/marker.wgsl");
