use nu_ansi_term::Color;
use resfinder_api::{Classification, ClassifyReport, PrefabCandidate};
use resfinder_core::picker::{PickerStatus, PickerView};
use std::fmt::Write;
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};

const VALID: Color = Color::Cyan;
const PENDING: Color = Color::Yellow;

#[derive(Tabled)]
struct ValidRow {
    #[tabled(rename = "Prefab")]
    name: String,
    #[tabled(rename = "Component")]
    component: String,
    #[tabled(rename = "File")]
    file: String,
}

#[derive(Tabled)]
struct UnusableRow {
    #[tabled(rename = "Prefab")]
    name: String,
    #[tabled(rename = "Closest Component")]
    closest: String,
    #[tabled(rename = "Distance")]
    distance: String,
    #[tabled(rename = "File")]
    file: String,
}

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

fn valid_row(candidate: &PrefabCandidate, root: &Path) -> ValidRow {
    let component = match &candidate.classification {
        Classification::Valid { component_type } => component_type.clone(),
        Classification::Invalid { .. } => "-".to_string(),
    };
    ValidRow {
        name: candidate.base_name().to_string(),
        component,
        file: relative(&candidate.file.path, root),
    }
}

fn unusable_row(candidate: &PrefabCandidate, root: &Path) -> UnusableRow {
    let (closest, distance) = match candidate.suggestion() {
        Some(s) => (s.component_name.clone(), s.distance.to_string()),
        None => ("-".to_string(), "-".to_string()),
    };
    UnusableRow {
        name: candidate.base_name().to_string(),
        closest,
        distance,
        file: relative(&candidate.file.path, root),
    }
}

pub fn report(report: &ClassifyReport, root: &Path) -> String {
    let mut out = String::new();

    if report.valid.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            PENDING.paint(format!("No valid prefabs at '{}'", report.resource_path))
        );
    } else {
        let _ = writeln!(
            out,
            "{}",
            VALID.paint(format!(
                "Valid prefabs at '{}' ({})",
                report.resource_path,
                report.valid.len()
            ))
        );
        let rows: Vec<ValidRow> = report.valid.iter().map(|c| valid_row(c, root)).collect();
        let _ = writeln!(out, "{}", Table::new(rows).with(Style::psql()));
    }

    if !report.invalid.is_empty() {
        let _ = writeln!(
            out,
            "\n{}",
            PENDING.paint(format!("Unusable prefabs ({})", report.invalid.len()))
        );
        let rows: Vec<UnusableRow> = report.invalid.iter().map(|c| unusable_row(c, root)).collect();
        let _ = writeln!(out, "{}", Table::new(rows).with(Style::psql()));
    }

    out
}

pub fn picker(view: &PickerView) -> String {
    let color = match view.status {
        PickerStatus::Valid => VALID,
        PickerStatus::Pending => PENDING,
    };

    let mut out = String::new();
    let _ = writeln!(out, "Resource Path: {}", view.resource_path);
    let _ = writeln!(out, "{}", color.paint(&view.header));
    for (ix, option) in view.options.iter().enumerate() {
        let marker = if ix == view.selected_index { ">" } else { " " };
        let _ = writeln!(out, " {} {:>2}  {}", marker, ix, option);
    }

    if !view.unusable.is_empty() {
        let _ = writeln!(out, "{}", PENDING.paint("Unusable Prefabs"));
        for entry in &view.unusable {
            match &entry.hint {
                Some(hint) => {
                    let _ = writeln!(out, "   - {} ({})", entry.name, hint);
                }
                None => {
                    let _ = writeln!(out, "   - {}", entry.name);
                }
            }
        }
    }
    out
}
