//! End-to-end classification over a Unity project on disk

mod common;

use common::UnityFixture;
use resfinder_api::{AssetLoader, Classification, ResourcePath, Suggestion};
use resfinder_core::{PickerStatus, PickerView, Project, ResfinderError, ResourceBinding};

#[test]
fn test_scan_partitions_prefabs() {
    let mut fx = UnityFixture::new();
    let foo = fx.script("Foo", Some("Game.UI"));
    let baz = fx.script("Baz", None);

    fx.prefab("Resources/ui", "Foo", &[&foo]);
    fx.prefab("Resources/ui", "Bar", &[&baz]);
    fx.write("Assets/Resources/ui/Broken.prefab", "not yaml at all");
    fx.write("Assets/Resources/ui/Foo.prefab.meta", "guid: 1\n");

    let project = Project::open(fx.root()).unwrap();
    let report = project
        .classifier()
        .scan(&ResourcePath::new("ui"), project.loader())
        .unwrap();

    let valid: Vec<_> = report.valid_names().collect();
    assert_eq!(valid, vec!["Foo"]);
    assert_eq!(
        report.valid[0].classification,
        Classification::Valid {
            component_type: "Foo".into()
        }
    );

    let invalid: Vec<_> = report.invalid.iter().map(|c| c.base_name()).collect();
    assert_eq!(invalid, vec!["Bar", "Broken"]);
    assert_eq!(
        report.invalid[0].suggestion(),
        Some(&Suggestion {
            component_name: "Baz".into(),
            distance: 1,
        })
    );
    assert_eq!(report.invalid[1].suggestion(), None);
}

#[test]
fn test_prefabs_merged_across_resources_folders() {
    let mut fx = UnityFixture::new();
    let a = fx.script("Alpha", None);
    let z = fx.script("Zed", None);

    fx.prefab("Resources/fx", "Zed", &[&z]);
    fx.prefab("Game/Resources/fx", "Alpha", &[&a]);
    fx.prefab("Game/Resources/other", "Alpha", &[&a]);

    let project = Project::open(fx.root()).unwrap();
    let files = project
        .classifier()
        .list_prefab_files(&ResourcePath::new("fx"))
        .unwrap();
    let names: Vec<_> = files.iter().map(|f| f.base_name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Zed"]);
}

#[test]
fn test_duplicate_name_loads_first_folder_in_sorted_order() {
    let mut fx = UnityFixture::new();
    let foo = fx.script("Foo", None);
    let other = fx.script("Other", None);

    fx.prefab("Resources/ui", "Foo", &[&foo]);
    let shadowing = fx.prefab("Game/Resources/ui", "Foo", &[&other]);

    let project = Project::open(fx.root()).unwrap();
    let ui = ResourcePath::new("ui");
    let asset = project.loader().load(&ui, "Foo").unwrap();

    // Assets/Game/Resources sorts before Assets/Resources
    assert_eq!(asset.path.as_deref(), Some(shadowing.as_path()));
    assert!(asset.component_named("Other").is_some());
    assert!(asset.component_named("Foo").is_none());

    let report = project.classifier().scan(&ui, project.loader()).unwrap();
    assert_eq!(report.valid_names().count(), 0);
    assert_eq!(report.invalid.len(), 2);
}

#[test]
fn test_loader_reports_namespaced_components() {
    let mut fx = UnityFixture::new();
    let foo = fx.script("Foo", Some("Game.UI"));
    let path = fx.prefab("Resources/ui", "Foo", &[&foo, "ffffffffffffffffffffffffffffffff"]);

    let project = Project::open(fx.root()).unwrap();
    let asset = project
        .loader()
        .load(&ResourcePath::new("ui"), "Foo")
        .unwrap();

    assert_eq!(asset.path.as_deref(), Some(path.as_path()));
    let names: Vec<_> = asset.components.iter().map(|c| c.full_name()).collect();
    // The second script is missing and skipped
    assert_eq!(names, vec!["UnityEngine.Transform", "Game.UI.Foo"]);

    assert!(project.loader().load(&ResourcePath::new("ui"), "Nope").is_none());
    assert!(project.loader().load(&ResourcePath::new("gone"), "Foo").is_none());
}

#[test]
fn test_picker_and_binding_flow() {
    let mut fx = UnityFixture::new();
    let foo = fx.script("Foo", Some("Game"));
    fx.prefab("Resources/ui", "Foo", &[&foo]);

    let project = Project::open(fx.root()).unwrap();
    let mut binding = ResourceBinding::new("ui");

    let report = project
        .classifier()
        .scan(&binding.resource_path(), project.loader())
        .unwrap();
    let view = PickerView::build(&report, &binding);
    assert_eq!(view.status, PickerStatus::Valid);
    assert_eq!(view.selected_index, 0);

    let event = view
        .choose(1, project.classifier(), project.loader())
        .unwrap();
    binding.apply(event);
    assert_eq!(binding.selected_component_type, "Game.Foo");

    let (asset, component) = binding
        .selected_asset(project.classifier(), &project.registry(), project.loader())
        .unwrap();
    assert_eq!(asset.name, "Foo");
    assert_eq!(component.full_name(), "Game.Foo");

    let all = binding
        .find_all_prefabs(project.classifier(), project.loader())
        .unwrap();
    assert_eq!(all.len(), 1);

    let view = PickerView::build(&report, &binding);
    assert_eq!(view.selected_name(), Some("Foo"));
}

#[test]
fn test_unresolvable_selection_is_no_selection() {
    let fx = UnityFixture::new();
    let project = Project::open(fx.root()).unwrap();

    let mut binding = ResourceBinding::new("ui");
    binding.selected_component_type = "Game.Deleted".into();
    assert!(binding.selected_type(&project.registry()).is_none());
    assert!(
        binding
            .selected_asset(project.classifier(), &project.registry(), project.loader())
            .is_none()
    );
}

#[test]
fn test_missing_assets_folder_fails_scan() {
    let temp = tempfile::TempDir::new().unwrap();
    let err = Project::open(temp.path()).err().unwrap();
    assert!(matches!(err, ResfinderError::ScanFailed { .. }));
}

#[test]
fn test_custom_config() {
    let mut fx = UnityFixture::new();
    let foo = fx.script("Foo", None);
    fx.prefab("Res/ui", "Foo", &[&foo]);
    fx.prefab("Resources/ui", "Other", &[&foo]);
    fx.write(".resfinder.json", r#"{ "sentinel": "Res" }"#);

    let project = Project::open(fx.root()).unwrap();
    let report = project
        .classifier()
        .scan(&ResourcePath::new("ui"), project.loader())
        .unwrap();
    assert_eq!(report.valid_names().collect::<Vec<_>>(), vec!["Foo"]);
    assert!(report.invalid.is_empty());
}
