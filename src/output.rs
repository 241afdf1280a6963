//! Report rendering.

use std::fmt::Write as _;

use serde::Serialize;

use crate::cache::CacheStats;
use crate::error::AppResult;
use crate::models::Bond;

/// Bonds found by one enumeration pass.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub strategy: String,
    #[serde(skip)]
    pub heading: &'static str,
    pub bonds: Vec<BondRecord>,
}

/// Flat, serializable form of a bond.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BondRecord {
    pub first: String,
    pub second: String,
    pub first_index: usize,
    pub second_index: usize,
    pub length: f64,
}

impl From<&Bond> for BondRecord {
    fn from(bond: &Bond) -> Self {
        Self {
            first: bond.first.symbol.clone(),
            second: bond.second.symbol.clone(),
            first_index: bond.first.index,
            second_index: bond.second.index,
            length: bond.length,
        }
    }
}

impl RunReport {
    pub fn new(strategy: &str, heading: &'static str, bonds: &[Bond]) -> Self {
        Self {
            strategy: strategy.to_string(),
            heading,
            bonds: bonds.iter().map(BondRecord::from).collect(),
        }
    }
}

/// Everything a single invocation prints.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub file: String,
    pub comment: String,
    pub atoms: usize,
    pub runs: Vec<RunReport>,
    pub cache: CacheStats,
}

/// One line per bond: `"{a} to {b} : {length}"`.
pub fn format_bond(bond: &BondRecord, precision: usize) -> String {
    format!(
        "{} to {} : {:.*}",
        bond.first, bond.second, precision, bond.length
    )
}

/// Plain-text report. Headings are printed only when several passes ran.
pub fn render_text(report: &Report, precision: usize) -> String {
    let with_headings = report.runs.len() > 1;
    let mut out = String::new();

    for run in &report.runs {
        if with_headings {
            let _ = writeln!(out, "{}", run.heading);
        }
        for bond in &run.bonds {
            let _ = writeln!(out, "{}", format_bond(bond, precision));
        }
    }

    out
}

/// Pretty-printed JSON report.
pub fn render_json(report: &Report) -> AppResult<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bonds() -> Vec<Bond> {
        vec![
            Bond::new((0, "O"), (1, "H"), 0.957_77),
            Bond::new((0, "O"), (2, "H"), 0.957_77),
        ]
    }

    fn report(runs: Vec<RunReport>) -> Report {
        Report {
            file: "water.xyz".to_string(),
            comment: "water".to_string(),
            atoms: 3,
            runs,
            cache: CacheStats { hits: 3, misses: 3 },
        }
    }

    #[test]
    fn test_format_bond_default_precision() {
        let record = BondRecord::from(&sample_bonds()[0]);
        assert_eq!(format_bond(&record, 3), "O to H : 0.958");
    }

    #[test]
    fn test_format_bond_custom_precision() {
        let record = BondRecord::from(&sample_bonds()[0]);
        assert_eq!(format_bond(&record, 1), "O to H : 1.0");
        assert_eq!(format_bond(&record, 5), "O to H : 0.95777");
    }

    #[test]
    fn test_render_text_single_run_has_no_heading() {
        let text = render_text(
            &report(vec![RunReport::new(
                "combinations",
                "itertools combinations",
                &sample_bonds(),
            )]),
            3,
        );
        assert_eq!(text, "O to H : 0.958\nO to H : 0.958\n");
    }

    #[test]
    fn test_render_text_multiple_runs_have_headings() {
        let bonds = sample_bonds();
        let text = render_text(
            &report(vec![
                RunReport::new("nested", "nested for-loops: ", &bonds),
                RunReport::new("lazy", "generator expression: ", &bonds),
            ]),
            3,
        );
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "nested for-loops: ");
        assert_eq!(lines[3], "generator expression: ");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_render_text_no_bonds() {
        let text = render_text(&report(vec![RunReport::new("lazy", "", &[])]), 3);
        assert!(text.is_empty());
    }

    #[test]
    fn test_render_json_shape() {
        let json = render_json(&report(vec![RunReport::new(
            "combinations",
            "itertools combinations",
            &sample_bonds(),
        )]))
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["file"], "water.xyz");
        assert_eq!(parsed["atoms"], 3);
        assert_eq!(parsed["runs"][0]["strategy"], "combinations");
        assert!(parsed["runs"][0].get("heading").is_none());
        assert_eq!(parsed["runs"][0]["bonds"][1]["second_index"], 2);
        assert_eq!(parsed["cache"]["hits"], 3);
    }
}
