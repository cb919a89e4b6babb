//! TSPLIB reader.
//!
//! Accepts the symmetric `TSP` files with `EDGE_WEIGHT_TYPE : EUC_2D` and a
//! `NODE_COORD_SECTION`, e.g.
//!
//! ```text
//! NAME : qa194
//! TYPE : TSP
//! DIMENSION : 194
//! EDGE_WEIGHT_TYPE : EUC_2D
//! NODE_COORD_SECTION
//! 1 24748.3333 50840.0000
//! ...
//! EOF
//! ```
//!
//! Distances are unrounded Euclidean lengths.

use std::fs;
use std::path::Path;

use super::Instance;
use crate::error::InstanceError;
use crate::models::City;

/// Reads and parses a TSPLIB file.
pub fn read_tsplib<P: AsRef<Path>>(path: P) -> Result<Instance, InstanceError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| InstanceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_tsplib(&text)
}

/// Parses TSPLIB text.
///
/// # Examples
///
/// ```
/// use u_tsp::instance::parse_tsplib;
///
/// let text = "NAME : square\nTYPE : TSP\nDIMENSION : 4\nEDGE_WEIGHT_TYPE : EUC_2D\n\
///             NODE_COORD_SECTION\n1 0 0\n2 1 0\n3 1 1\n4 0 1\nEOF\n";
/// let instance = parse_tsplib(text).unwrap();
/// assert_eq!(instance.name(), "square");
/// assert_eq!(instance.n(), 4);
/// ```
pub fn parse_tsplib(text: &str) -> Result<Instance, InstanceError> {
    let mut name = String::new();
    let mut dimension: Option<usize> = None;
    let mut cities: Vec<City> = Vec::new();
    let mut in_coords = false;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line == "EOF" {
            break;
        }

        if in_coords {
            cities.push(parse_coord(line, line_no, cities.len())?);
            continue;
        }

        if line == "NODE_COORD_SECTION" {
            in_coords = true;
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            return Err(parse_error(line_no, format!("unexpected line `{line}`")));
        };
        let value = value.trim();
        match key.trim() {
            "NAME" => name = value.to_string(),
            "COMMENT" => {}
            "TYPE" => {
                if value != "TSP" {
                    return Err(parse_error(line_no, format!("unsupported TYPE `{value}`")));
                }
            }
            "DIMENSION" => {
                let d = value.parse::<usize>().map_err(|_| {
                    parse_error(line_no, format!("invalid DIMENSION `{value}`"))
                })?;
                dimension = Some(d);
            }
            "EDGE_WEIGHT_TYPE" => {
                if value != "EUC_2D" {
                    return Err(parse_error(
                        line_no,
                        format!("unsupported EDGE_WEIGHT_TYPE `{value}`"),
                    ));
                }
            }
            other => {
                log::debug!("tsplib: ignoring header key={other}");
            }
        }
    }

    if let Some(d) = dimension {
        if d != cities.len() {
            return Err(InstanceError::Invalid(format!(
                "DIMENSION is {d} but {} coordinates were read",
                cities.len()
            )));
        }
    }

    Instance::new(name, cities)
}

fn parse_coord(line: &str, line_no: usize, index: usize) -> Result<City, InstanceError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(parse_error(
            line_no,
            format!("expected `id x y`, got {} field(s)", fields.len()),
        ));
    }
    let x = parse_number(fields[1], line_no)?;
    let y = parse_number(fields[2], line_no)?;
    Ok(City::new(index, x, y))
}

fn parse_number(field: &str, line_no: usize) -> Result<f64, InstanceError> {
    field
        .parse::<f64>()
        .map_err(|_| parse_error(line_no, format!("invalid coordinate `{field}`")))
}

fn parse_error(line: usize, reason: String) -> InstanceError {
    InstanceError::Parse { line, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceModel;

    const SQUARE: &str = "\
NAME : square
COMMENT : unit square
TYPE : TSP
DIMENSION : 4
EDGE_WEIGHT_TYPE : EUC_2D
NODE_COORD_SECTION
1 0.0 0.0
2 1.0 0.0
3 1.0 1.0
4 0.0 1.0
EOF
";

    #[test]
    fn test_parse_square() {
        let instance = parse_tsplib(SQUARE).expect("valid");
        assert_eq!(instance.name(), "square");
        assert_eq!(instance.n(), 4);
        let dm = instance.distance_matrix();
        assert!((dm.distance(0, 2) - 2f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_parse_without_eof() {
        let text = "DIMENSION: 2\nNODE_COORD_SECTION\n1 0 0\n2 3 4\n";
        let instance = parse_tsplib(text).expect("valid");
        assert_eq!(instance.n(), 2);
        assert!((instance.distance_matrix().distance(0, 1) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_scientific_notation() {
        let text = "NODE_COORD_SECTION\n1 1.0e+01 0\n2 0 2.5E1\nEOF";
        let instance = parse_tsplib(text).expect("valid");
        assert_eq!(instance.cities()[0].x(), 10.0);
        assert_eq!(instance.cities()[1].y(), 25.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let text = "DIMENSION : 3\nNODE_COORD_SECTION\n1 0 0\n2 1 1\nEOF";
        assert!(matches!(parse_tsplib(text), Err(InstanceError::Invalid(_))));
    }

    #[test]
    fn test_empty_instance() {
        let text = "NAME : nothing\nNODE_COORD_SECTION\nEOF";
        assert!(matches!(parse_tsplib(text), Err(InstanceError::Empty)));
    }

    #[test]
    fn test_bad_coordinate_reports_line() {
        let text = "NODE_COORD_SECTION\n1 0 0\n2 x 1\nEOF";
        match parse_tsplib(text) {
            Err(InstanceError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_weight_type() {
        let text = "EDGE_WEIGHT_TYPE : GEO\nNODE_COORD_SECTION\n1 0 0\nEOF";
        assert!(matches!(parse_tsplib(text), Err(InstanceError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_non_finite_coordinate() {
        let text = "NODE_COORD_SECTION\n1 0 0\n2 inf 1\nEOF";
        assert!(matches!(
            parse_tsplib(text),
            Err(InstanceError::NonFinite { city: 1 })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = read_tsplib("/nonexistent/instance.tsp").expect_err("missing");
        assert!(matches!(err, InstanceError::Io { .. }));
    }
}
