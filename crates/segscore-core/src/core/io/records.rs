use crate::core::geometry::{GeometryError, Polygon};
use crate::core::models::registry::ScanRegistry;
use crate::core::models::scan::VoxelSpacing;
use crate::core::models::slice::ContourSource;
use crate::core::models::structure::Structure;
use nalgebra::Point2;
use std::io::{self, BufRead};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Record grammar, one record per line, fields comma-separated:
///
/// - Polygon record: `scanId,sliceOrdinal,structureName,x1,y1,x2,y2,...`
///   with a 1-based slice ordinal and at least one coordinate pair.
/// - Meta record (truth streams only): `#scanId,0,KIND,...`. The `SIZES`
///   kind, `#scanId,0,SIZES,width,height,sliceCount,dx,dy,dz`, establishes
///   a scan's geometry; every other kind (e.g. `SEED`) is recognized and
///   ignored.
///
/// Whitespace inside a line is stripped before parsing and blank lines are
/// skipped. `#`-prefixed lines in a solution stream are skipped entirely.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error on line {line} ('{content}'): {kind}")]
    Parse {
        line: usize,
        content: String,
        kind: RecordParseErrorKind,
    },
}

#[derive(Debug, Error)]
pub enum RecordParseErrorKind {
    #[error("record has {found} fields; at least {required} are required")]
    MissingFields { found: usize, required: usize },

    #[error("invalid integer in field '{field}' (value: '{value}')")]
    InvalidInt { field: &'static str, value: String },

    #[error("invalid float in field '{field}' (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },

    #[error("unknown structure name '{0}'")]
    UnknownStructure(String),

    #[error("unknown scan id '{0}'")]
    UnknownScan(String),

    #[error("slice ordinal {ordinal} is out of range for scan '{scan}' with {count} slices")]
    SliceOutOfRange {
        scan: String,
        ordinal: usize,
        count: usize,
    },

    #[error("polygon record has no coordinate pairs")]
    MissingCoordinates,

    #[error("odd coordinate count: {0} values do not form (x, y) pairs")]
    TrailingCoordinate(usize),

    #[error("duplicate SIZES header for scan '{0}'")]
    DuplicateSizes(String),

    #[error("degenerate contour: {0}")]
    Geometry(#[from] GeometryError),
}

/// Loads a truth record stream into the registry. Unknown scan ids create
/// new scans; `SIZES` headers must precede the polygon records that
/// reference their scan's slice list.
pub fn load_truth(reader: impl BufRead, registry: &mut ScanRegistry) -> Result<(), RecordError> {
    load(reader, registry, ContourSource::Truth)
}

/// Loads a solution record stream into the registry. Every scan id must
/// already be known from the truth corpus.
pub fn load_solution(reader: impl BufRead, registry: &mut ScanRegistry) -> Result<(), RecordError> {
    load(reader, registry, ContourSource::Solution)
}

fn load(
    reader: impl BufRead,
    registry: &mut ScanRegistry,
    source: ContourSource,
) -> Result<(), RecordError> {
    let mut contours = 0usize;
    for (line_index, line_result) in reader.lines().enumerate() {
        let line_number = line_index + 1;
        let raw = line_result?;
        let line: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if line.is_empty() {
            continue;
        }

        if let Some(meta) = line.strip_prefix('#') {
            if source == ContourSource::Solution {
                continue;
            }
            parse_meta(meta, registry).map_err(|kind| RecordError::Parse {
                line: line_number,
                content: line.clone(),
                kind,
            })?;
            continue;
        }

        parse_contour(&line, registry, source).map_err(|kind| RecordError::Parse {
            line: line_number,
            content: line.clone(),
            kind,
        })?;
        contours += 1;
    }
    debug!(records = contours, ?source, "record stream loaded");
    Ok(())
}

fn parse_meta(meta: &str, registry: &mut ScanRegistry) -> Result<(), RecordParseErrorKind> {
    let fields: Vec<&str> = meta.split(',').collect();
    if fields.len() < 3 {
        return Err(RecordParseErrorKind::MissingFields {
            found: fields.len(),
            required: 3,
        });
    }
    let _: i64 = parse_int(fields[1], "slice ordinal")?;
    let scan = registry.get_or_create(fields[0]);

    if fields[2] == "SIZES" {
        if fields.len() < 9 {
            return Err(RecordParseErrorKind::MissingFields {
                found: fields.len(),
                required: 9,
            });
        }
        let width = parse_int(fields[3], "width")?;
        let height = parse_int(fields[4], "height")?;
        let slice_count = parse_int(fields[5], "slice count")?;
        let spacing = VoxelSpacing {
            dx: parse_float(fields[6], "dx")?,
            dy: parse_float(fields[7], "dy")?,
            dz: parse_float(fields[8], "dz")?,
        };
        if !scan.set_geometry(width, height, slice_count, spacing) {
            return Err(RecordParseErrorKind::DuplicateSizes(scan.id().to_string()));
        }
    }
    // Every other meta kind (e.g. SEED markers) is recognized but unused.
    Ok(())
}

fn parse_contour(
    line: &str,
    registry: &mut ScanRegistry,
    source: ContourSource,
) -> Result<(), RecordParseErrorKind> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 3 {
        return Err(RecordParseErrorKind::MissingFields {
            found: fields.len(),
            required: 3,
        });
    }
    let id = fields[0];
    let ordinal: usize = parse_int(fields[1], "slice ordinal")?;
    let structure = Structure::from_name(fields[2])
        .ok_or_else(|| RecordParseErrorKind::UnknownStructure(fields[2].to_string()))?;

    let coordinates = &fields[3..];
    if coordinates.is_empty() {
        return Err(RecordParseErrorKind::MissingCoordinates);
    }
    if coordinates.len() % 2 != 0 {
        return Err(RecordParseErrorKind::TrailingCoordinate(coordinates.len()));
    }
    let mut points = Vec::with_capacity(coordinates.len() / 2);
    for pair in coordinates.chunks_exact(2) {
        let x = parse_float(pair[0], "x")?;
        let y = parse_float(pair[1], "y")?;
        points.push(Point2::new(x, y));
    }

    let scan = match source {
        ContourSource::Truth => registry.get_or_create(id),
        ContourSource::Solution => registry
            .get_mut(id)
            .ok_or_else(|| RecordParseErrorKind::UnknownScan(id.to_string()))?,
    };
    let count = scan.slice_count();
    let slice = scan
        .slice_mut(ordinal)
        .ok_or_else(|| RecordParseErrorKind::SliceOutOfRange {
            scan: id.to_string(),
            ordinal,
            count,
        })?;
    slice.add_contour(source, structure, Polygon::new(points)?);
    Ok(())
}

fn parse_int<T: FromStr>(value: &str, field: &'static str) -> Result<T, RecordParseErrorKind> {
    value.parse().map_err(|_| RecordParseErrorKind::InvalidInt {
        field,
        value: value.to_string(),
    })
}

fn parse_float(value: &str, field: &'static str) -> Result<f64, RecordParseErrorKind> {
    value
        .parse()
        .map_err(|_| RecordParseErrorKind::InvalidFloat {
            field,
            value: value.to_string(),
        })
}
