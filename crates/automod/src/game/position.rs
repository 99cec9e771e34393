/// Player position as the game stores it: three packed little-endian floats.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Axis-aligned box anchored at `origin`, extending by width/height/depth
/// along +x/+y/+z.
#[derive(Debug, Clone, Copy)]
pub struct Volume {
    origin: Vec3,
    width: f32,
    height: f32,
    depth: f32,
}

impl Volume {
    pub fn new(origin: Vec3, width: f32, height: f32, depth: f32) -> Self {
        Self {
            origin,
            width,
            height,
            depth,
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.origin.x
            && point.x <= self.origin.x + self.width
            && point.y >= self.origin.y
            && point.y <= self.origin.y + self.height
            && point.z >= self.origin.z
            && point.z <= self.origin.z + self.depth
    }
}
