use crate::render;
use resfinder_api::ResourcePath;
use resfinder_core::Project;
use resfinder_core::watch::spawn_watcher;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub async fn run(project: PathBuf, path: String) -> Result<(), Box<dyn std::error::Error>> {
    let project = Arc::new(Project::open(project)?);
    let resource_path = ResourcePath::new(&path);

    let print_scan = |project: &Project| match project
        .classifier()
        .scan(&resource_path, project.loader())
    {
        Ok(report) => print!("{}", render::report(&report, project.root())),
        Err(e) => error!("Scan failed: {}", e),
    };

    print_scan(&project as &Project);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let cancel_token = CancellationToken::new();
    let handle = spawn_watcher(
        project.clone(),
        cancel_token.clone(),
        move |outcome, _paths| {
            if outcome.is_stale() {
                let _ = tx.send(());
            }
        },
    )?;
    info!("Watching for changes. Press Ctrl+C to stop.");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.recv() => {
                if changed.is_none() {
                    break;
                }
                print_scan(&project as &Project);
            }
        }
    }

    cancel_token.cancel();
    let _ = handle.await;
    info!("Watcher stopped.");
    Ok(())
}
