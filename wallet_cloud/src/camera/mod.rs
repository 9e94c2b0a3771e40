mod fly;
mod orbit;

use bevy::prelude::*;

pub use fly::{fly_camera_plugin, FlyRig, JetpackFuel};
pub use orbit::{orbit_camera_plugin, OrbitRig};

/// Jump request for the active camera rig. The camera-fit step writes this
/// after a snapshot lands; the rig consumes and clears it.
#[derive(Resource, Default)]
pub struct CameraTarget {
    pub target: Option<Vec3>,
    pub look_at: Option<Vec3>,
}
