//! FFI bindings to the HiGHS C API.
//!
//! This module contains the unsafe code for talking to the C library. Every
//! other module goes through [`HighsHandle`].
#![allow(unsafe_code)]

use highs_sys::HighsInt;
use std::ffi::{CString, c_void};
use std::fmt;
use std::path::Path;
use std::ptr::NonNull;
use tracing::{debug, trace};

pub(crate) const STATUS_ERROR: HighsInt = -1;
pub(crate) const STATUS_OK: HighsInt = 0;

pub(crate) const SENSE_MINIMIZE: HighsInt = 1;
pub(crate) const SENSE_MAXIMIZE: HighsInt = -1;

const MATRIX_FORMAT_COLWISE: HighsInt = 1;
const BASIS_VALID: HighsInt = 1;
const MAXIMUM_STRING_LENGTH: usize = 512;

pub(crate) const VAR_TYPE_CONTINUOUS: HighsInt = 0;
pub(crate) const VAR_TYPE_INTEGER: HighsInt = 1;

/// Errors returned by the HiGHS handle wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighsError {
    /// A string handed to the C API contained an interior NUL byte.
    InvalidString { what: &'static str },
    /// A C API call returned the error status.
    CallFailed { call: &'static str, status: i32 },
    /// The model is too large for HiGHS integer indices.
    TooLarge { what: &'static str, count: usize },
}

impl HighsError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            HighsError::InvalidString { .. } => "HIGHS_INVALID_STRING",
            HighsError::CallFailed { .. } => "HIGHS_CALL_FAILED",
            HighsError::TooLarge { .. } => "HIGHS_MODEL_TOO_LARGE",
        }
    }
}

impl fmt::Display for HighsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighsError::InvalidString { what } => {
                write!(f, "[{}] {} contains a NUL byte", self.code(), what)
            }
            HighsError::CallFailed { call, status } => {
                write!(f, "[{}] {} returned status {}", self.code(), call, status)
            }
            HighsError::TooLarge { what, count } => write!(
                f,
                "[{}] {} count {} exceeds the HiGHS index range",
                self.code(),
                what,
                count
            ),
        }
    }
}

impl std::error::Error for HighsError {}

fn check(call: &'static str, status: HighsInt) -> Result<HighsInt, HighsError> {
    if status == STATUS_ERROR {
        return Err(HighsError::CallFailed { call, status });
    }
    Ok(status)
}

fn c_string(value: &str, what: &'static str) -> Result<CString, HighsError> {
    CString::new(value).map_err(|_| HighsError::InvalidString { what })
}

pub(crate) fn highs_int(count: usize, what: &'static str) -> Result<HighsInt, HighsError> {
    HighsInt::try_from(count).map_err(|_| HighsError::TooLarge { what, count })
}

/// Column-wise LP/MIP data in the layout the C API expects.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct LpData {
    pub(crate) num_col: usize,
    pub(crate) num_row: usize,
    pub(crate) sense: HighsInt,
    pub(crate) offset: f64,
    pub(crate) col_cost: Vec<f64>,
    pub(crate) col_lower: Vec<f64>,
    pub(crate) col_upper: Vec<f64>,
    pub(crate) row_lower: Vec<f64>,
    pub(crate) row_upper: Vec<f64>,
    /// `num_col + 1` offsets into `a_index` / `a_value`.
    pub(crate) a_start: Vec<HighsInt>,
    pub(crate) a_index: Vec<HighsInt>,
    pub(crate) a_value: Vec<f64>,
    /// Present for MIP models.
    pub(crate) integrality: Option<Vec<HighsInt>>,
}

/// Primal and dual values read back after a run.
#[derive(Debug, Clone, Default)]
pub(crate) struct RawSolution {
    pub(crate) col_value: Vec<f64>,
    pub(crate) col_dual: Vec<f64>,
    pub(crate) row_value: Vec<f64>,
    pub(crate) row_dual: Vec<f64>,
}

/// Owning handle over one HiGHS instance.
///
/// The instance is destroyed when the handle is dropped.
pub struct HighsHandle {
    ptr: NonNull<c_void>,
}

// The instance is only ever reached through `&mut self` or `&self` of its
// unique owner; HiGHS keeps no thread-affine state.
unsafe impl Send for HighsHandle {}

impl HighsHandle {
    /// Create a new HiGHS instance.
    ///
    /// # Panics
    ///
    /// Panics if HiGHS fails to allocate the instance.
    pub fn new() -> Self {
        let raw = unsafe { highs_sys::Highs_create() };
        let Some(ptr) = NonNull::new(raw) else {
            panic!("Highs_create failed to allocate an instance");
        };
        debug!(
            component = "solver",
            operation = "init_highs",
            status = "success",
            "Created HiGHS instance"
        );
        Self { ptr }
    }

    fn raw(&self) -> *mut c_void {
        self.ptr.as_ptr()
    }

    /// Drop the loaded model and any solution.
    pub fn clear_model(&mut self) -> Result<(), HighsError> {
        check("Highs_clearModel", unsafe {
            highs_sys::Highs_clearModel(self.raw())
        })?;
        Ok(())
    }

    /// Restore every option to its default.
    pub fn reset_options(&mut self) -> Result<(), HighsError> {
        check("Highs_resetOptions", unsafe {
            highs_sys::Highs_resetOptions(self.raw())
        })?;
        Ok(())
    }

    pub fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), HighsError> {
        trace!(component = "solver", operation = "set_option", option = name, value, "Setting option");
        let c_name = c_string(name, "option name")?;
        check("Highs_setBoolOptionValue", unsafe {
            highs_sys::Highs_setBoolOptionValue(self.raw(), c_name.as_ptr(), HighsInt::from(value))
        })?;
        Ok(())
    }

    pub fn set_int_option(&mut self, name: &str, value: HighsInt) -> Result<(), HighsError> {
        trace!(component = "solver", operation = "set_option", option = name, value, "Setting option");
        let c_name = c_string(name, "option name")?;
        check("Highs_setIntOptionValue", unsafe {
            highs_sys::Highs_setIntOptionValue(self.raw(), c_name.as_ptr(), value)
        })?;
        Ok(())
    }

    pub fn set_double_option(&mut self, name: &str, value: f64) -> Result<(), HighsError> {
        trace!(component = "solver", operation = "set_option", option = name, value, "Setting option");
        let c_name = c_string(name, "option name")?;
        check("Highs_setDoubleOptionValue", unsafe {
            highs_sys::Highs_setDoubleOptionValue(self.raw(), c_name.as_ptr(), value)
        })?;
        Ok(())
    }

    pub fn set_string_option(&mut self, name: &str, value: &str) -> Result<(), HighsError> {
        trace!(component = "solver", operation = "set_option", option = name, value, "Setting option");
        let c_name = c_string(name, "option name")?;
        let c_value = c_string(value, "option value")?;
        check("Highs_setStringOptionValue", unsafe {
            highs_sys::Highs_setStringOptionValue(self.raw(), c_name.as_ptr(), c_value.as_ptr())
        })?;
        Ok(())
    }

    /// Replace the loaded model.
    pub(crate) fn pass_model(&mut self, lp: &LpData) -> Result<(), HighsError> {
        let num_col = highs_int(lp.num_col, "column")?;
        let num_row = highs_int(lp.num_row, "row")?;
        let num_nz = highs_int(lp.a_value.len(), "nonzero")?;
        let status = unsafe {
            match &lp.integrality {
                Some(integrality) => highs_sys::Highs_passMip(
                    self.raw(),
                    num_col,
                    num_row,
                    num_nz,
                    MATRIX_FORMAT_COLWISE,
                    lp.sense,
                    lp.offset,
                    lp.col_cost.as_ptr(),
                    lp.col_lower.as_ptr(),
                    lp.col_upper.as_ptr(),
                    lp.row_lower.as_ptr(),
                    lp.row_upper.as_ptr(),
                    lp.a_start.as_ptr(),
                    lp.a_index.as_ptr(),
                    lp.a_value.as_ptr(),
                    integrality.as_ptr(),
                ),
                None => highs_sys::Highs_passLp(
                    self.raw(),
                    num_col,
                    num_row,
                    num_nz,
                    MATRIX_FORMAT_COLWISE,
                    lp.sense,
                    lp.offset,
                    lp.col_cost.as_ptr(),
                    lp.col_lower.as_ptr(),
                    lp.col_upper.as_ptr(),
                    lp.row_lower.as_ptr(),
                    lp.row_upper.as_ptr(),
                    lp.a_start.as_ptr(),
                    lp.a_index.as_ptr(),
                    lp.a_value.as_ptr(),
                ),
            }
        };
        check("Highs_passModel", status)?;
        Ok(())
    }

    pub(crate) fn pass_row_name(&mut self, row: usize, name: &str) -> Result<(), HighsError> {
        let c_name = c_string(name, "row name")?;
        let row = highs_int(row, "row")?;
        check("Highs_passRowName", unsafe {
            highs_sys::Highs_passRowName(self.raw(), row, c_name.as_ptr())
        })?;
        Ok(())
    }

    pub(crate) fn pass_col_name(&mut self, col: usize, name: &str) -> Result<(), HighsError> {
        let c_name = c_string(name, "column name")?;
        let col = highs_int(col, "column")?;
        check("Highs_passColName", unsafe {
            highs_sys::Highs_passColName(self.raw(), col, c_name.as_ptr())
        })?;
        Ok(())
    }

    /// Name of the 0-based row, or `None` when the model carries no names.
    pub(crate) fn row_name(&self, row: usize) -> Option<String> {
        let row = highs_int(row, "row").ok()?;
        let mut buf = vec![0u8; MAXIMUM_STRING_LENGTH];
        let status =
            unsafe { highs_sys::Highs_getRowName(self.raw(), row, buf.as_mut_ptr().cast()) };
        (status != STATUS_ERROR).then(|| name_from_buffer(&buf))
    }

    /// Name of the 0-based column, or `None` when the model carries no names.
    pub(crate) fn col_name(&self, col: usize) -> Option<String> {
        let col = highs_int(col, "column").ok()?;
        let mut buf = vec![0u8; MAXIMUM_STRING_LENGTH];
        let status =
            unsafe { highs_sys::Highs_getColName(self.raw(), col, buf.as_mut_ptr().cast()) };
        (status != STATUS_ERROR).then(|| name_from_buffer(&buf))
    }

    /// Run the configured solver. Returns the call status (ok or warning).
    pub fn run(&mut self) -> Result<HighsInt, HighsError> {
        check("Highs_run", unsafe { highs_sys::Highs_run(self.raw()) })
    }

    pub fn model_status(&self) -> HighsInt {
        unsafe { highs_sys::Highs_getModelStatus(self.raw()) }
    }

    pub fn objective_value(&self) -> f64 {
        unsafe { highs_sys::Highs_getObjectiveValue(self.raw()) }
    }

    pub fn int_info(&self, name: &str) -> Option<HighsInt> {
        let c_name = c_string(name, "info name").ok()?;
        let mut value: HighsInt = 0;
        let status = unsafe {
            highs_sys::Highs_getIntInfoValue(self.raw(), c_name.as_ptr(), &raw mut value)
        };
        (status == STATUS_OK).then_some(value)
    }

    pub fn double_info(&self, name: &str) -> Option<f64> {
        let c_name = c_string(name, "info name").ok()?;
        let mut value = 0.0;
        let status = unsafe {
            highs_sys::Highs_getDoubleInfoValue(self.raw(), c_name.as_ptr(), &raw mut value)
        };
        (status == STATUS_OK).then_some(value)
    }

    pub fn num_col(&self) -> usize {
        let n = unsafe { highs_sys::Highs_getNumCol(self.raw()) };
        usize::try_from(n).unwrap_or(0)
    }

    pub fn num_row(&self) -> usize {
        let n = unsafe { highs_sys::Highs_getNumRow(self.raw()) };
        usize::try_from(n).unwrap_or(0)
    }

    pub fn num_nz(&self) -> usize {
        let n = unsafe { highs_sys::Highs_getNumNz(self.raw()) };
        usize::try_from(n).unwrap_or(0)
    }

    pub(crate) fn solution(&self) -> Result<RawSolution, HighsError> {
        let mut solution = RawSolution {
            col_value: vec![0.0; self.num_col()],
            col_dual: vec![0.0; self.num_col()],
            row_value: vec![0.0; self.num_row()],
            row_dual: vec![0.0; self.num_row()],
        };
        check("Highs_getSolution", unsafe {
            highs_sys::Highs_getSolution(
                self.raw(),
                solution.col_value.as_mut_ptr(),
                solution.col_dual.as_mut_ptr(),
                solution.row_value.as_mut_ptr(),
                solution.row_dual.as_mut_ptr(),
            )
        })?;
        Ok(solution)
    }

    /// Raw (column, row) basis status codes, if a valid basis exists.
    pub(crate) fn basis(&self) -> Option<(Vec<HighsInt>, Vec<HighsInt>)> {
        if self.int_info("basis_validity") != Some(BASIS_VALID) {
            return None;
        }
        let mut col_status = vec![0; self.num_col()];
        let mut row_status = vec![0; self.num_row()];
        let status = unsafe {
            highs_sys::Highs_getBasis(self.raw(), col_status.as_mut_ptr(), row_status.as_mut_ptr())
        };
        (status == STATUS_OK).then_some((col_status, row_status))
    }

    /// Copy the loaded model out column-wise.
    pub(crate) fn lp(&self) -> Result<LpData, HighsError> {
        let mut num_col = highs_int(self.num_col(), "column")?;
        let mut num_row = highs_int(self.num_row(), "row")?;
        let mut num_nz = highs_int(self.num_nz(), "nonzero")?;
        let cols = self.num_col();
        let rows = self.num_row();
        let nz = self.num_nz();

        let mut lp = LpData {
            num_col: cols,
            num_row: rows,
            col_cost: vec![0.0; cols],
            col_lower: vec![0.0; cols],
            col_upper: vec![0.0; cols],
            row_lower: vec![0.0; rows],
            row_upper: vec![0.0; rows],
            a_start: vec![0; cols + 1],
            a_index: vec![0; nz],
            a_value: vec![0.0; nz],
            ..LpData::default()
        };
        let mut integrality = vec![VAR_TYPE_CONTINUOUS; cols];
        let mut sense: HighsInt = SENSE_MINIMIZE;
        let mut offset = 0.0;

        check("Highs_getLp", unsafe {
            highs_sys::Highs_getLp(
                self.raw(),
                MATRIX_FORMAT_COLWISE,
                &raw mut num_col,
                &raw mut num_row,
                &raw mut num_nz,
                &raw mut sense,
                &raw mut offset,
                lp.col_cost.as_mut_ptr(),
                lp.col_lower.as_mut_ptr(),
                lp.col_upper.as_mut_ptr(),
                lp.row_lower.as_mut_ptr(),
                lp.row_upper.as_mut_ptr(),
                lp.a_start.as_mut_ptr(),
                lp.a_index.as_mut_ptr(),
                lp.a_value.as_mut_ptr(),
                integrality.as_mut_ptr(),
            )
        })?;

        // The C API fills num_col start offsets; close the last column here.
        lp.a_start[cols] = num_nz;
        lp.sense = sense;
        lp.offset = offset;
        if integrality.iter().any(|&kind| kind != VAR_TYPE_CONTINUOUS) {
            lp.integrality = Some(integrality);
        }
        Ok(lp)
    }

    pub fn read_model(&mut self, path: &Path) -> Result<HighsInt, HighsError> {
        let c_path = c_string(&path.to_string_lossy(), "path")?;
        check("Highs_readModel", unsafe {
            highs_sys::Highs_readModel(self.raw(), c_path.as_ptr())
        })
    }

    pub fn write_model(&mut self, path: &Path) -> Result<HighsInt, HighsError> {
        let c_path = c_string(&path.to_string_lossy(), "path")?;
        check("Highs_writeModel", unsafe {
            highs_sys::Highs_writeModel(self.raw(), c_path.as_ptr())
        })
    }
}

impl Default for HighsHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for HighsHandle {
    fn drop(&mut self) {
        unsafe { highs_sys::Highs_destroy(self.raw()) };
        trace!(
            component = "solver",
            operation = "destroy_highs",
            status = "success",
            "Destroyed HiGHS instance"
        );
    }
}

fn name_from_buffer(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}
