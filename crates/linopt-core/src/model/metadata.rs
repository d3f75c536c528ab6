//! Problem, objective, row and column names.

use super::Model;

impl Model {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn objective_name(&self) -> &str {
        &self.objective_name
    }

    pub fn set_objective_name(&mut self, name: impl Into<String>) {
        self.objective_name = name.into();
    }

    #[track_caller]
    pub fn row_name(&self, i: usize) -> &str {
        &self.row_ref(i).name
    }

    #[track_caller]
    pub fn set_row_name(&mut self, i: usize, name: impl Into<String>) {
        self.row_mut(i).name = name.into();
    }

    #[track_caller]
    pub fn col_name(&self, j: usize) -> &str {
        &self.col_ref(j).name
    }

    #[track_caller]
    pub fn set_col_name(&mut self, j: usize, name: impl Into<String>) {
        self.col_mut(j).name = name.into();
    }

    /// Number of the first row named `name`. Empty names never match.
    pub fn find_row(&self, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        self.rows.iter().position(|row| row.name == name).map(|r| r + 1)
    }

    /// Number of the first column named `name`. Empty names never match.
    pub fn find_col(&self, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        self.columns
            .iter()
            .position(|col| col.name == name)
            .map(|c| c + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_default_empty() {
        let mut model = Model::new();
        model.add_rows(1);
        model.add_cols(1);
        assert_eq!(model.name(), "");
        assert_eq!(model.objective_name(), "");
        assert_eq!(model.row_name(1), "");
        assert_eq!(model.col_name(1), "");
    }

    #[test]
    fn test_set_and_find_names() {
        let mut model = Model::new();
        model.add_rows(2);
        model.add_cols(2);
        model.set_name("sample");
        model.set_objective_name("Z");
        model.set_row_name(2, "capacity");
        model.set_col_name(1, "x1");

        assert_eq!(model.name(), "sample");
        assert_eq!(model.objective_name(), "Z");
        assert_eq!(model.row_name(2), "capacity");
        assert_eq!(model.find_row("capacity"), Some(2));
        assert_eq!(model.find_col("x1"), Some(1));
        assert_eq!(model.find_col("x2"), None);
        assert_eq!(model.find_row(""), None);
    }
}
