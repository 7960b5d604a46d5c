use crate::render;
use resfinder_api::ResourcePath;
use resfinder_core::Project;
use std::path::PathBuf;

pub fn run(project: PathBuf, path: String, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let project = Project::open(project)?;
    let report = project
        .classifier()
        .scan(&ResourcePath::new(&path), project.loader())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::report(&report, project.root()));
    }
    Ok(())
}
