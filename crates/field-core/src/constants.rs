// Default tuning for the particle field. `FieldOptions::default()` is built
// from these values; hosts override them through the options JSON.

// Population
pub const MAX_PARTICLES: usize = 100; // hard ceiling regardless of screen area
pub const DENSITY_AREA_DIVISOR: f32 = 10_000.0; // px² per particle at density 1
pub const RADIUS_FLOOR: f32 = 0.5; // smallest radius; size target adds on top
pub const SPEED_SPREAD: f32 = 0.4; // max velocity magnitude per unit of speed target

// Palette (alpha is replaced by the opacity target)
pub const DEFAULT_PALETTE: [[u8; 3]; 3] = [
    [130, 60, 200], // violet
    [100, 70, 180], // muted purple
    [80, 90, 220],  // indigo
];

// Proximity graph
pub const MAX_DISTANCE: f32 = 100.0;
pub const MAX_EDGES: usize = 150;
pub const STRIDE_THRESHOLD: usize = 50; // above this, sample every second particle
pub const EDGE_BASE_OPACITY: f32 = 0.15;
pub const EDGE_LINE_WIDTH: f32 = 0.5;
pub const EDGE_COLOR: [u8; 3] = [130, 100, 200];

// Render loop
pub const REBUILD_EVERY: u32 = 3; // frames between proximity rebuilds

// Surface
pub const RESIZE_DEBOUNCE_MS: u32 = 200;

// Reactor hysteresis thresholds
pub const SIZE_THRESHOLD: f32 = 0.2;
pub const SPEED_THRESHOLD: f32 = 0.1;
pub const OPACITY_THRESHOLD: f32 = 0.05;
pub const DENSITY_THRESHOLD: f32 = 3.0;

// Reactor curves as (signal milestone, value) stops
pub const SIZE_STOPS: [(f32, f32); 2] = [(0.0, 1.0), (1.0, 2.0)];
pub const SPEED_STOPS: [(f32, f32); 3] = [(0.0, 0.3), (0.5, 0.8), (1.0, 0.3)];
pub const OPACITY_STOPS: [(f32, f32); 3] = [(0.0, 0.12), (0.5, 0.25), (1.0, 0.15)];
pub const DENSITY_STOPS: [(f32, f32); 3] = [(0.0, 15.0), (0.5, 25.0), (1.0, 18.0)];
