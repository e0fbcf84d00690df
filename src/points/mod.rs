mod parser;

pub use parser::{parse_points, ParseWarning, ParsedPoints, Point};
