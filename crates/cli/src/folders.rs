use resfinder_api::ResourcePath;
use resfinder_core::Project;
use std::path::PathBuf;

pub fn run(project: PathBuf, path: String) -> Result<(), Box<dyn std::error::Error>> {
    let project = Project::open(project)?;
    let resource_path = ResourcePath::new(&path);
    let dirs = project.cache().resolve(&resource_path)?;

    if dirs.is_empty() {
        println!(
            "No '{}' folders contain '{}'.",
            project.config().sentinel,
            resource_path
        );
        return Ok(());
    }

    for dir in dirs.iter() {
        let shown = dir.strip_prefix(project.root()).unwrap_or(dir);
        println!("{}", shown.display());
    }
    Ok(())
}
