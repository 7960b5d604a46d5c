use crate::render;
use resfinder_core::{PickerView, Project, ResourceBinding};
use std::path::PathBuf;
use tracing::info;

pub fn run(
    project: PathBuf,
    binding_file: PathBuf,
    select: Option<String>,
    clear: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let project = Project::open(project)?;
    let mut binding = if binding_file.exists() {
        ResourceBinding::load(&binding_file)?
    } else {
        ResourceBinding::default()
    };

    let report = project
        .classifier()
        .scan(&binding.resource_path(), project.loader())?;
    let view = PickerView::build(&report, &binding);

    let chosen = if clear {
        Some(0)
    } else if let Some(name) = select.as_deref() {
        match view.option_index(name) {
            Some(ix) => Some(ix),
            None => {
                print!("{}", render::picker(&view));
                return Err(
                    format!("'{}' is not a valid prefab at '{}'", name, view.resource_path).into(),
                );
            }
        }
    } else {
        None
    };

    let event = chosen.and_then(|ix| view.choose(ix, project.classifier(), project.loader()));
    let Some(event) = event else {
        print!("{}", render::picker(&view));
        return Ok(());
    };

    binding.apply(event);
    binding.save(&binding_file)?;
    info!(
        "Saved {} (selected: '{}')",
        binding_file.display(),
        binding.selected_component_type
    );

    let view = PickerView::build(&report, &binding);
    print!("{}", render::picker(&view));
    Ok(())
}
