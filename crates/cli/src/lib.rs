mod folders;
mod pick;
mod render;
mod resolve;
mod scan;
mod watch;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "resfinder",
    version,
    about = "Find prefabs named after their root component in Unity resource folders",
    long_about = "Resfinder scans the Resources folders of a Unity project for prefabs whose root \
                  object carries a component with the same type name as the prefab file. Prefabs \
                  that break the rule are listed with the closest component name as a hint."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the resource folders a resource path resolves to
    Dirs {
        /// Path to the Unity project root
        #[arg(value_name = "PROJECT_PATH")]
        project: PathBuf,
        /// Resource path below the Resources folders, e.g. ui/panels
        #[arg(long, default_value = "")]
        path: String,
    },
    /// Classify every prefab under a resource path
    #[command(
        long_about = "Lists usable prefabs and unusable ones. Unusable prefabs come with the \
                      closest component name found on their root object."
    )]
    Scan {
        #[arg(value_name = "PROJECT_PATH")]
        project: PathBuf,
        #[arg(long, default_value = "")]
        path: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or change the prefab selected by a binding file
    #[command(
        long_about = "Reads a JSON binding file ({\"resource_path\": ..., \"selected_component_type\": ...}), \
                      shows the available choices and optionally stores a new selection."
    )]
    Pick {
        #[arg(value_name = "PROJECT_PATH")]
        project: PathBuf,
        /// Binding file to read and update
        #[arg(long, value_name = "FILE")]
        binding: PathBuf,
        /// Prefab name to select
        #[arg(long, conflicts_with = "clear")]
        select: Option<String>,
        /// Clear the current selection
        #[arg(long)]
        clear: bool,
    },
    /// Load the prefab named after a component type and show that component
    Resolve {
        #[arg(value_name = "PROJECT_PATH")]
        project: PathBuf,
        #[arg(long, default_value = "")]
        path: String,
        /// Component type name, short or namespace-qualified
        #[arg(long = "type", value_name = "TYPE")]
        type_name: String,
    },
    /// Re-scan a resource path whenever its folders change
    Watch {
        #[arg(value_name = "PROJECT_PATH")]
        project: PathBuf,
        #[arg(long, default_value = "")]
        path: String,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Watch { .. } => Some("watch"),
        _ => None,
    };
    let _guard = resfinder_core::logging::init_logging(component, true);

    match cli.command {
        Commands::Dirs { project, path } => folders::run(project, path),
        Commands::Scan {
            project,
            path,
            json,
        } => scan::run(project, path, json),
        Commands::Pick {
            project,
            binding,
            select,
            clear,
        } => pick::run(project, binding, select, clear),
        Commands::Resolve {
            project,
            path,
            type_name,
        } => resolve::run(project, path, type_name),
        Commands::Watch { project, path } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(watch::run(project, path))
        }
    }
}
