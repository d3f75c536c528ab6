//! MPS header records HiGHS does not carry through its C API.
//!
//! The problem name lives on the `NAME` record and the objective name on the
//! `N` row of the `ROWS` section. Reading picks both out of the file text;
//! writing stamps them onto the file HiGHS produced.

/// Names found in the header of an MPS file.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Header {
    pub(crate) name: Option<String>,
    pub(crate) objective: Option<String>,
}

/// Scan the records before `COLUMNS` for the problem and objective names.
pub(crate) fn read_header(text: &str) -> Header {
    let mut header = Header::default();
    let mut section = String::new();
    for line in text.lines() {
        if line.trim().is_empty() || line.starts_with('*') {
            continue;
        }
        if !line.starts_with(char::is_whitespace) {
            let keyword = line.split_whitespace().next().unwrap_or_default();
            section = keyword.to_ascii_uppercase();
            if section == "NAME" {
                let rest = line[keyword.len()..].trim();
                header.name = (!rest.is_empty()).then(|| rest.to_string());
            }
            if section == "COLUMNS" {
                break;
            }
            continue;
        }
        if section == "ROWS" && header.objective.is_none() {
            let mut fields = line.split_whitespace();
            if fields.next().is_some_and(|kind| kind.eq_ignore_ascii_case("N")) {
                header.objective = fields.next().map(str::to_string);
            }
        }
    }
    header
}

/// Rewrite the `NAME` record and, when `objective` is given, rename the
/// objective row wherever a row name is expected.
///
/// Renaming rewrites data records with free spacing, so it is only valid for
/// free MPS.
pub(crate) fn stamp_header(text: &str, name: &str, objective: Option<&str>) -> String {
    let mut out = String::with_capacity(text.len() + name.len());
    let mut section = String::new();
    let mut written_objective: Option<String> = None;

    for line in text.lines() {
        let stamped = if line.trim().is_empty() || line.starts_with('*') {
            None
        } else if !line.starts_with(char::is_whitespace) {
            let keyword = line.split_whitespace().next().unwrap_or_default();
            section = keyword.to_ascii_uppercase();
            (section == "NAME" && !name.is_empty()).then(|| format!("NAME          {}", name))
        } else {
            objective.and_then(|objective| {
                rename_objective(line, &section, objective, &mut written_objective)
            })
        };
        out.push_str(stamped.as_deref().unwrap_or(line));
        out.push('\n');
    }
    out
}

fn rename_objective(
    line: &str,
    section: &str,
    objective: &str,
    written: &mut Option<String>,
) -> Option<String> {
    let mut fields: Vec<&str> = line.split_whitespace().collect();
    match section {
        "ROWS" => {
            if written.is_some() || !fields.first()?.eq_ignore_ascii_case("N") {
                return None;
            }
            *written = Some(fields.get(1)?.to_string());
            Some(format!(" N  {}", objective))
        }
        // row names sit in the second and fourth fields
        "COLUMNS" | "RHS" => {
            let from = written.as_deref()?;
            let mut changed = false;
            for position in [1, 3] {
                if fields.get(position) == Some(&from) {
                    fields[position] = objective;
                    changed = true;
                }
            }
            changed.then(|| format!("    {}", fields.join("  ")))
        }
        _ => None,
    }
}
