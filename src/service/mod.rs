pub mod points;

pub use points::{breakdown, calculate_points, PointsBreakdown};
