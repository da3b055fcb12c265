/// Default tolerance used throughout the geometry layer for coordinate
/// comparisons. Graph identity itself never uses this tolerance — see
/// `precision_decimals` in the tessellator and routing crates — it is
/// reserved for geometric predicates (segment membership, intersection).
pub const DEFAULT_TOLERANCE: f64 = 1e-9;
