pub mod fibonacci;
pub mod pivot_points;
