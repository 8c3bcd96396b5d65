//! Plain-text TOPTW benchmark instances.
//!
//! ```text
//! <type> <vehicles> <pois> [...]
//! <ignored>
//! <depot row>
//! <poi row> x pois
//! ```
//!
//! Fields are separated by any run of whitespace. Every row starts with
//! `id x y service score`, the depot row included. The depot row carries
//! its window in columns 7 and 8, POI rows in columns 8 and 9. The depot's
//! due time bounds the duration of every route.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::models::{Poi, ProblemError, TimeWindow, TopTwProblem};

const X: usize = 1;
const Y: usize = 2;
const SERVICE: usize = 3;
const SCORE: usize = 4;
const DEPOT_READY: usize = 7;
const DEPOT_DUE: usize = 8;
const POI_READY: usize = 8;
const POI_DUE: usize = 9;

/// Failures while loading an instance.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read instance: {0}")]
    Io(#[from] std::io::Error),
    #[error("instance is empty")]
    MissingHeader,
    #[error("header must read '<type> <vehicles> <pois>', got '{0}'")]
    InvalidHeader(String),
    #[error("expected {expected} POI rows after the depot, found {found}")]
    MissingPoi { expected: usize, found: usize },
    #[error("line {line}: missing column {column}")]
    MissingField { line: usize, column: usize },
    #[error("line {line}: column {column} is not a number: '{value}'")]
    InvalidNumber {
        line: usize,
        column: usize,
        value: String,
    },
    #[error("line {line}: time window [{ready}, {due}] is invalid")]
    InvalidTimeWindow { line: usize, ready: f64, due: f64 },
    #[error(transparent)]
    InvalidProblem(#[from] ProblemError),
}

/// Reads an instance file.
pub fn read_instance<P: AsRef<Path>>(path: P) -> Result<TopTwProblem, LoadError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    debug!(path = %path.as_ref().display(), bytes = text.len(), "read instance");
    parse_instance(&text)
}

/// Parses an instance from its text.
///
/// # Examples
///
/// ```
/// use u_orienteering::io::parse_instance;
///
/// let text = "\
/// 1 2 2 1
/// 0 100
/// 0 0.0 0.0 0 0 0 0 0 100
/// 1 3.0 4.0 2 10 0 1 1 0 50
/// 2 6.0 8.0 2 20 0 1 1 10 60
/// ";
/// let problem = parse_instance(text).unwrap();
/// assert_eq!(problem.poi_count(), 2);
/// assert_eq!(problem.vehicle_count(), 2);
/// assert_eq!(problem.max_time_per_route(), 100.0);
/// assert_eq!(problem.ready_time(2), 10.0);
/// ```
pub fn parse_instance(text: &str) -> Result<TopTwProblem, LoadError> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    let (_, header) = lines.next().ok_or(LoadError::MissingHeader)?;
    let (vehicles, poi_count) = parse_header(header)?;
    // second line holds nothing the model uses
    lines.next();

    let expected_rows = poi_count.saturating_add(1);
    let rows: Vec<(usize, Vec<&str>)> = lines
        .map(|(n, l)| (n, l.split_whitespace().collect::<Vec<_>>()))
        .filter(|(_, fields)| !fields.is_empty())
        .take(expected_rows)
        .collect();
    if rows.len() < expected_rows {
        return Err(LoadError::MissingPoi {
            expected: poi_count,
            found: rows.len().saturating_sub(1),
        });
    }

    let mut pois = Vec::with_capacity(rows.len());
    for (id, (line, fields)) in rows.iter().enumerate() {
        let (ready_col, due_col) = if id == 0 {
            (DEPOT_READY, DEPOT_DUE)
        } else {
            (POI_READY, POI_DUE)
        };
        let x = number(fields, *line, X)?;
        let y = number(fields, *line, Y)?;
        let ready = number(fields, *line, ready_col)?;
        let due = number(fields, *line, due_col)?;
        let window = TimeWindow::new(ready, due).ok_or(LoadError::InvalidTimeWindow {
            line: *line,
            ready,
            due,
        })?;

        let service = number(fields, *line, SERVICE)?;
        let score = number(fields, *line, SCORE)?;
        pois.push(Poi::new(id, x, y, score, service).with_time_window(window));
    }

    let problem = TopTwProblem::new(pois, vehicles)?;
    debug!(
        pois = problem.poi_count(),
        vehicles = problem.vehicle_count(),
        max_time = problem.max_time_per_route(),
        max_distance = problem.distances().max_distance(),
        "parsed instance"
    );
    Ok(problem)
}

fn parse_header(line: &str) -> Result<(usize, usize), LoadError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let invalid = || LoadError::InvalidHeader(line.trim().to_string());
    if fields.len() < 3 {
        return Err(invalid());
    }
    let vehicles = fields[1].parse().map_err(|_| invalid())?;
    let pois = fields[2].parse().map_err(|_| invalid())?;
    Ok((vehicles, pois))
}

fn number(fields: &[&str], line: usize, column: usize) -> Result<f64, LoadError> {
    let raw = fields
        .get(column)
        .ok_or(LoadError::MissingField { line, column })?;
    raw.parse().map_err(|_| LoadError::InvalidNumber {
        line,
        column,
        value: raw.to_string(),
    })
}
