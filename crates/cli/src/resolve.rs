use resfinder_api::ResourcePath;
use resfinder_core::Project;
use std::path::PathBuf;

pub fn run(
    project: PathBuf,
    path: String,
    type_name: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let project = Project::open(project)?;
    let resource_path = ResourcePath::new(&path);

    match project
        .classifier()
        .resolve_by_type(&resource_path, &type_name, project.loader())
    {
        Some((asset, component)) => {
            println!("Component: {}", component.full_name());
            if let Some(file) = &asset.path {
                let shown = file.strip_prefix(project.root()).unwrap_or(file);
                println!("Prefab:    {}", shown.display());
            }
        }
        None => {
            println!("No prefab under '{}' has a '{}' component.", resource_path, type_name);
        }
    }
    Ok(())
}
