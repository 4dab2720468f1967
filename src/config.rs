use tracing::warn;

pub const MAX_SIZE: usize = 10000; // largest matrix side accepted by the driver
pub const MAX_WORKERS: usize = 10; // largest worker pool accepted by the driver
pub const DEFAULT_SIZE: usize = 1000;
pub const DEFAULT_SLICE_SIZE: usize = 10; // rows per bag-of-tasks claim
pub const DEFAULT_SEED: u64 = 0;
pub const CELL_MODULUS: i32 = 99; // generated cells lie in 0..CELL_MODULUS

/// Clamps a command-line setting to its upper limit, warning when it had to.
pub fn clamp_setting(name: &str, value: usize, max: usize) -> usize {
    if value > max {
        warn!(setting = name, requested = value, max, "clamping setting to its limit");
        max
    } else {
        value
    }
}
