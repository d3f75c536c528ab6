//! Conversion between a linopt model and HiGHS column-wise data.

use crate::ffi::{
    HighsError, LpData, SENSE_MAXIMIZE, SENSE_MINIMIZE, VAR_TYPE_CONTINUOUS, VAR_TYPE_INTEGER,
    highs_int,
};
use highs_sys::HighsInt;
use linopt_core::{Bounds, ColumnKind, Model, Sense, UNBOUNDED};

/// Map the finite "no bound" sentinel onto IEEE infinity.
fn to_highs_limit(value: f64) -> f64 {
    if value >= UNBOUNDED {
        f64::INFINITY
    } else if value <= -UNBOUNDED {
        f64::NEG_INFINITY
    } else {
        value
    }
}

pub(crate) fn highs_sense(sense: Sense) -> HighsInt {
    match sense {
        Sense::Minimize => SENSE_MINIMIZE,
        Sense::Maximize => SENSE_MAXIMIZE,
    }
}

/// Build column-wise data for `model`.
///
/// Integrality is only carried when `with_integrality` is set and the model
/// has integer columns, so continuous solves always see the LP relaxation.
pub(crate) fn to_lp(model: &Model, sense: Sense, with_integrality: bool) -> Result<LpData, HighsError> {
    let num_col = model.num_cols();
    let num_row = model.num_rows();
    let nnz = model.num_nz();

    let mut lp = LpData {
        num_col,
        num_row,
        sense: highs_sense(sense),
        offset: model.obj_constant(),
        col_cost: Vec::with_capacity(num_col),
        col_lower: Vec::with_capacity(num_col),
        col_upper: Vec::with_capacity(num_col),
        row_lower: Vec::with_capacity(num_row),
        row_upper: Vec::with_capacity(num_row),
        a_start: Vec::with_capacity(num_col + 1),
        a_index: Vec::with_capacity(nnz),
        a_value: Vec::with_capacity(nnz),
        integrality: None,
    };

    for row in model.rows() {
        lp.row_lower.push(to_highs_limit(row.bounds().lower()));
        lp.row_upper.push(to_highs_limit(row.bounds().upper()));
    }
    for (position, col) in model.columns().iter().enumerate() {
        lp.col_cost.push(col.objective());
        lp.col_lower.push(to_highs_limit(col.bounds().lower()));
        lp.col_upper.push(to_highs_limit(col.bounds().upper()));
        lp.a_start.push(highs_int(lp.a_index.len(), "nonzero")?);
        for (i, value) in model.matrix().col_entries(position + 1) {
            lp.a_index.push(highs_int(i - 1, "row")?);
            lp.a_value.push(value);
        }
    }
    lp.a_start.push(highs_int(lp.a_index.len(), "nonzero")?);

    if with_integrality && model.has_integer_columns() {
        lp.integrality = Some(
            model
                .columns()
                .iter()
                .map(|col| {
                    if col.is_integer() {
                        VAR_TYPE_INTEGER
                    } else {
                        VAR_TYPE_CONTINUOUS
                    }
                })
                .collect(),
        );
    }
    Ok(lp)
}

/// Build a model from data read back out of HiGHS.
///
/// Coefficients with magnitude below `drop_tolerance` are skipped.
pub(crate) fn from_lp(
    lp: &LpData,
    sense: Sense,
    row_names: &[String],
    col_names: &[String],
    drop_tolerance: f64,
) -> Model {
    let mut model = Model::new();
    model.set_sense(sense);
    model.set_obj_constant(lp.offset);
    model.add_rows(lp.num_row);
    model.add_cols(lp.num_col);

    for (r, name) in row_names.iter().enumerate().take(lp.num_row) {
        model.set_row_name(r + 1, name.as_str());
    }
    for (c, name) in col_names.iter().enumerate().take(lp.num_col) {
        model.set_col_name(c + 1, name.as_str());
    }
    for r in 0..lp.num_row {
        let bounds = Bounds::from_limits(lp.row_lower[r], lp.row_upper[r]);
        model.set_row_bounds(r + 1, bounds.kind(), bounds.lower(), bounds.upper());
    }
    for c in 0..lp.num_col {
        let bounds = Bounds::from_limits(lp.col_lower[c], lp.col_upper[c]);
        model.set_col_bounds(c + 1, bounds.kind(), bounds.lower(), bounds.upper());
        model.set_obj_coef(c + 1, lp.col_cost[c]);
    }
    if let Some(integrality) = &lp.integrality {
        for (c, &kind) in integrality.iter().enumerate().take(lp.num_col) {
            if kind != VAR_TYPE_CONTINUOUS {
                model.set_col_kind(c + 1, ColumnKind::Integer);
            }
        }
    }

    let mut rows = Vec::with_capacity(lp.a_value.len());
    let mut cols = Vec::with_capacity(lp.a_value.len());
    let mut values = Vec::with_capacity(lp.a_value.len());
    for c in 0..lp.num_col {
        let start = usize::try_from(lp.a_start[c]).unwrap_or(0);
        let end = usize::try_from(lp.a_start[c + 1]).unwrap_or(start);
        for k in start..end {
            let value = lp.a_value[k];
            if value.abs() < drop_tolerance {
                continue;
            }
            rows.push(usize::try_from(lp.a_index[k]).unwrap_or(0) + 1);
            cols.push(c + 1);
            values.push(value);
        }
    }
    if let Err(err) = model.load_matrix(&rows, &cols, &values) {
        // HiGHS hands back a validated matrix; a rejection here means the
        // buffers were misread, so keep the structure and drop the entries.
        tracing::warn!(
            component = "io",
            operation = "import_matrix",
            status = "error",
            error = %err,
            "Discarded constraint matrix read from HiGHS"
        );
    }
    model
}

/// Row names for writing: empty ones become `R<i>`, spaces become `blank`.
pub(crate) fn row_names_for_write(model: &Model, blank: Option<char>) -> Vec<String> {
    model
        .rows()
        .iter()
        .enumerate()
        .map(|(r, row)| export_name(row.name(), 'R', r + 1, blank))
        .collect()
}

/// Column names for writing: empty ones become `C<j>`, spaces become `blank`.
pub(crate) fn col_names_for_write(model: &Model, blank: Option<char>) -> Vec<String> {
    model
        .columns()
        .iter()
        .enumerate()
        .map(|(c, col)| export_name(col.name(), 'C', c + 1, blank))
        .collect()
}

fn export_name(name: &str, prefix: char, number: usize, blank: Option<char>) -> String {
    if name.is_empty() {
        return format!("{}{}", prefix, number);
    }
    match blank {
        Some(replacement) => name.replace(' ', &replacement.to_string()),
        None => name.to_string(),
    }
}
