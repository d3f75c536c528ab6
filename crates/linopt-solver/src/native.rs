//! Native full-fidelity problem format.
//!
//! A JSON document wrapping the complete [`Model`]: names, bounds, kinds,
//! matrix, objective, basis and both solution tracks.

use crate::config::ProbFlags;
use crate::error::IoError;
use linopt_core::Model;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

const FORMAT_NAME: &str = "linopt-prob";
const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct Document<'a> {
    format: &'a str,
    version: u32,
    model: &'a Model,
}

#[derive(Deserialize)]
struct OwnedDocument {
    format: String,
    version: u32,
    model: Model,
}

/// Write `model` in the native format.
///
/// JSON has no encoding for infinity or NaN, so a model holding one is
/// refused before the target file is touched.
pub fn write_prob(model: &Model, flags: ProbFlags, path: &Path) -> Result<(), IoError> {
    if let Some(item) = first_non_finite(model) {
        return Err(IoError::write(
            path,
            format!("{} is not a finite number", item),
        ));
    }
    let file = File::create(path).map_err(|err| IoError::write(path, err.to_string()))?;
    let mut writer = BufWriter::new(file);
    let document = Document {
        format: FORMAT_NAME,
        version: FORMAT_VERSION,
        model,
    };
    let encoded = if flags.contains(ProbFlags::PRETTY) {
        serde_json::to_writer_pretty(&mut writer, &document)
    } else {
        serde_json::to_writer(&mut writer, &document)
    };
    encoded.map_err(|err| IoError::write(path, err.to_string()))?;
    writer
        .flush()
        .map_err(|err| IoError::write(path, err.to_string()))?;

    debug!(
        component = "io",
        operation = "write_prob",
        status = "success",
        path = %path.display(),
        rows = model.num_rows() as u64,
        columns = model.num_cols() as u64,
        "Wrote native problem file"
    );
    Ok(())
}

fn first_non_finite(model: &Model) -> Option<String> {
    let scalars = [
        ("objective constant", model.obj_constant()),
        ("basic objective value", model.obj_val()),
        ("integer objective value", model.mip_obj_val()),
    ];
    if let Some((name, _)) = scalars.iter().find(|(_, value)| !value.is_finite()) {
        return Some((*name).to_string());
    }

    for i in 1..=model.num_rows() {
        let values = [
            model.row_lb(i),
            model.row_ub(i),
            model.row_prim(i),
            model.row_dual(i),
            model.mip_row_val(i),
        ];
        if values.iter().any(|value| !value.is_finite()) {
            return Some(format!("a value of row {}", i));
        }
        if model.mat_row(i).values().iter().any(|value| !value.is_finite()) {
            return Some(format!("a coefficient in row {}", i));
        }
    }
    for j in 1..=model.num_cols() {
        let values = [
            model.col_lb(j),
            model.col_ub(j),
            model.obj_coef(j),
            model.col_prim(j),
            model.col_dual(j),
            model.mip_col_val(j),
        ];
        if values.iter().any(|value| !value.is_finite()) {
            return Some(format!("a value of column {}", j));
        }
    }
    None
}

/// Read a model written by [`write_prob`].
pub fn read_prob(path: &Path) -> Result<Model, IoError> {
    let file = File::open(path).map_err(|err| IoError::read(path, err.to_string()))?;
    let document: OwnedDocument = serde_json::from_reader(BufReader::new(file))
        .map_err(|err| IoError::read(path, err.to_string()))?;
    if document.format != FORMAT_NAME {
        return Err(IoError::read(
            path,
            format!("unexpected format '{}'", document.format),
        ));
    }
    if document.version != FORMAT_VERSION {
        return Err(IoError::read(
            path,
            format!("unsupported version {}", document.version),
        ));
    }
    document
        .model
        .check_consistency()
        .map_err(|err| IoError::read(path, err.to_string()))?;

    debug!(
        component = "io",
        operation = "read_prob",
        status = "success",
        path = %path.display(),
        rows = document.model.num_rows() as u64,
        columns = document.model.num_cols() as u64,
        "Read native problem file"
    );
    Ok(document.model)
}
