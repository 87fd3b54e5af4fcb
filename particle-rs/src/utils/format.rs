//! Formatting utilities

use glam::Vec3;

/// Format a vector with two decimals per component
pub fn format_vec3(v: Vec3) -> String {
    format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z)
}

/// Format an optional bounding box
pub fn format_bounds(bounds: Option<(Vec3, Vec3)>) -> String {
    match bounds {
        Some((min, max)) => format!("{} .. {}", format_vec3(min), format_vec3(max)),
        None => "-".to_string(),
    }
}

/// Format a live count against capacity
pub fn format_fill(live: usize, capacity: usize) -> String {
    if capacity == 0 {
        return format!("{live}/0");
    }
    let percent = live as f64 / capacity as f64 * 100.0;
    format!("{live}/{capacity} ({percent:.0}%)")
}
