//! XYZ 파일 파싱 모듈.

use std::fs;
use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::geometry::Point;
use crate::models::molecule::{Atom, Molecule};

/// Lines preceding the atom rows: count, then comment.
pub const HEADER_LINES: usize = 2;

/// Fields in an atom row: symbol plus three coordinates.
pub const FIELDS_PER_ROW: usize = 4;

/// Parses XYZ text into a molecule.
///
/// The first line is the declared atom count and the second a free-form
/// comment. Every following non-blank line is `symbol x y z`; `#` starts a
/// comment that runs to end of line.
pub fn parse_xyz(text: &str) -> AppResult<Molecule> {
    let mut lines = text.lines();

    let count_line = lines
        .next()
        .ok_or_else(|| AppError::parse(1, "missing atom count line"))?;
    let comment = lines
        .next()
        .ok_or_else(|| AppError::parse(2, "missing comment line"))?;

    let declared = count_line.trim().parse::<usize>().ok();

    let mut atoms = Vec::with_capacity(declared.unwrap_or(0));
    for (offset, raw) in lines.enumerate() {
        let line_no = offset + HEADER_LINES + 1;
        let content = raw.split('#').next().unwrap_or("");
        let fields: Vec<&str> = content.split_whitespace().collect();

        if fields.is_empty() {
            continue;
        }
        if fields.len() != FIELDS_PER_ROW {
            return Err(AppError::parse(
                line_no,
                format!(
                    "expected {FIELDS_PER_ROW} fields (symbol x y z), found {}",
                    fields.len()
                ),
            ));
        }

        let mut position: Point = [0.0; 3];
        for (axis, field) in fields[1..].iter().enumerate() {
            position[axis] = field.parse::<f64>().map_err(|_| {
                AppError::parse(line_no, format!("invalid coordinate '{field}'"))
            })?;
        }

        atoms.push(Atom::new(fields[0], position));
    }

    match declared {
        Some(count) if count != atoms.len() => {
            tracing::warn!(
                declared = count,
                parsed = atoms.len(),
                "Atom count in header does not match parsed rows"
            );
        }
        None => {
            tracing::warn!(header = %count_line.trim(), "Atom count line is not an integer");
        }
        _ => {}
    }

    Ok(Molecule::new(comment.to_string(), atoms))
}

/// Reads and parses an XYZ file.
///
/// Not memoized: the result depends on the file's contents, not its path.
pub fn load_xyz(path: &Path) -> AppResult<Molecule> {
    let text = fs::read_to_string(path)?;
    let molecule = parse_xyz(&text)?;

    tracing::info!(
        path = %path.display(),
        atoms = molecule.len(),
        "Loaded geometry"
    );

    Ok(molecule)
}
