//! Reading and writing problem files.
//!
//! MPS and CPLEX LP go through the engine's codecs; the native format is
//! handled by [`linopt_solver::native`]. A read builds a complete model
//! first and only then replaces the current one, so a failed read leaves the
//! problem as it was.

use crate::problem::Problem;
use linopt_core::Model;
use linopt_solver::{
    CpxParams, FormatRequest, IoError, MpsFormat, MpsParams, ProbFlags, native,
};
use std::path::Path;
use tracing::{debug, warn};

impl Problem {
    /// Read an MPS file, replacing the current model.
    ///
    /// MPS has no objective direction, so the result always minimizes. The
    /// problem name comes from the `NAME` record and the objective name from
    /// the first `N` row.
    ///
    /// # Errors
    ///
    /// Returns a read [`IoError`] when the file cannot be opened or parsed.
    #[track_caller]
    pub fn read_mps(
        &mut self,
        format: MpsFormat,
        params: Option<&MpsParams>,
        path: impl AsRef<Path>,
    ) -> Result<(), IoError> {
        let request = FormatRequest::Mps(format, params.cloned().unwrap_or_default());
        self.read_with_engine(&request, path.as_ref())
    }

    /// Write the model as an MPS file.
    ///
    /// The problem name goes on the `NAME` record. The objective row keeps
    /// its own name only in free MPS, and only when it is a single token not
    /// used by a constraint row.
    ///
    /// # Errors
    ///
    /// Returns a write [`IoError`] when the engine cannot produce the file.
    #[track_caller]
    pub fn write_mps(
        &mut self,
        format: MpsFormat,
        params: Option<&MpsParams>,
        path: impl AsRef<Path>,
    ) -> Result<(), IoError> {
        let request = FormatRequest::Mps(format, params.cloned().unwrap_or_default());
        self.write_with_engine(&request, path.as_ref())
    }

    /// Read a CPLEX LP file, replacing the current model.
    ///
    /// # Errors
    ///
    /// Returns a read [`IoError`] when the file cannot be opened or parsed.
    #[track_caller]
    pub fn read_lp(&mut self, params: Option<&CpxParams>, path: impl AsRef<Path>) -> Result<(), IoError> {
        let request = FormatRequest::CplexLp(params.copied().unwrap_or_default());
        self.read_with_engine(&request, path.as_ref())
    }

    /// Write the model as a CPLEX LP file.
    ///
    /// The LP format has no record for the problem name, so it is not kept.
    ///
    /// # Errors
    ///
    /// Returns a write [`IoError`] when the engine cannot produce the file.
    #[track_caller]
    pub fn write_lp(&mut self, params: Option<&CpxParams>, path: impl AsRef<Path>) -> Result<(), IoError> {
        let request = FormatRequest::CplexLp(params.copied().unwrap_or_default());
        self.write_with_engine(&request, path.as_ref())
    }

    /// Read a native problem file, replacing the current model and its
    /// stored solutions.
    ///
    /// # Errors
    ///
    /// Returns a read [`IoError`] when the file is missing, malformed or
    /// describes an inconsistent model.
    #[track_caller]
    pub fn read_prob(&mut self, flags: ProbFlags, path: impl AsRef<Path>) -> Result<(), IoError> {
        let path = path.as_ref();
        let inner = self.live_mut();
        let model = native::read_prob(path).inspect_err(|err| io_failed(err, "native"))?;
        debug!(
            component = "problem",
            operation = "read",
            status = "success",
            format = "native",
            flags = flags.bits(),
            rows = model.num_rows() as u64,
            columns = model.num_cols() as u64,
            "Loaded problem"
        );
        inner.model = model;
        inner.engine.reset();
        Ok(())
    }

    /// Write the complete problem state in the native format.
    ///
    /// # Errors
    ///
    /// Returns a write [`IoError`] when the file cannot be created.
    #[track_caller]
    pub fn write_prob(&self, flags: ProbFlags, path: impl AsRef<Path>) -> Result<(), IoError> {
        native::write_prob(self.model(), flags, path.as_ref())
            .inspect_err(|err| io_failed(err, "native"))
    }

    #[track_caller]
    fn read_with_engine(&mut self, request: &FormatRequest, path: &Path) -> Result<(), IoError> {
        let inner = self.live_mut();
        let model: Model = inner
            .engine
            .read(request, path)
            .map_err(|message| IoError::read(path, message))
            .inspect_err(|err| io_failed(err, request.kind()))?;
        debug!(
            component = "problem",
            operation = "read",
            status = "success",
            format = request.kind(),
            rows = model.num_rows() as u64,
            columns = model.num_cols() as u64,
            "Loaded problem"
        );
        inner.model = model;
        Ok(())
    }

    #[track_caller]
    fn write_with_engine(&mut self, request: &FormatRequest, path: &Path) -> Result<(), IoError> {
        let inner = self.live_mut();
        inner
            .engine
            .write(&inner.model, request, path)
            .map_err(|message| IoError::write(path, message))
            .inspect_err(|err| io_failed(err, request.kind()))?;
        debug!(
            component = "problem",
            operation = "write",
            status = "success",
            format = request.kind(),
            path = %path.display(),
            "Wrote problem"
        );
        Ok(())
    }
}

fn io_failed(err: &IoError, format: &str) {
    warn!(
        component = "problem",
        operation = err.operation.as_str(),
        status = "error",
        format,
        code = err.code(),
        error = %err,
        "Problem file operation failed"
    );
}
