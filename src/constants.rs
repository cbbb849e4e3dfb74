// Terrain grid defaults
pub const ROW_COUNT: u32 = 256;
pub const COL_COUNT: u32 = 256;
pub const QUAD_DIMENSION: f32 = 0.5;
pub const MAX_HEIGHT: f32 = 30.0;

// Noise defaults
pub const NOISE_OCTAVES: i32 = 9;
pub const NOISE_PERIOD: f32 = 64.0;
pub const NOISE_PERSISTENCE: f32 = 0.5;
pub const NOISE_LACUNARITY: f32 = 2.0;

// Background generation
pub const LOADER_QUEUE_SIZE: usize = 4;

// Camera / debug overlay
pub const CAMERA_ROTATION_SPEED: f32 = 0.1;
pub const AXIS_LENGTH: f32 = 50.0;

// Input action names
pub const ACTION_TERRAIN_GENERATE: &str = "terrain_generate";
pub const ACTION_DEBUG_TOGGLE: &str = "meshgen_debug_toggle";
pub const ACTION_CAMERA_ROTATE_TOGGLE: &str = "camera_rotate_toggle";
