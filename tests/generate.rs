use std::fs;
use std::path::Path;

use routegen::{
    generate, CollisionPolicy, GenerateError, GeneratorConfig, ResolutionMode, SkipReason,
};

const HANDLER: &str = r#"use axum::extract::Path;

pub async fn handler(Path(id): Path<String>) -> String {
    format!("Hello User: {id}")
}
"#;

fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }
}

fn config(root: &Path) -> GeneratorConfig {
    GeneratorConfig::new(root.join("src/app"), root.join("src/generated/app.rs"))
}

#[test]
fn empty_tree_emits_only_preamble() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path(), &[("src/app/notes.txt", "")]);
    let config = config(dir.path());

    let report = generate(&config).unwrap();
    assert!(report.routes.is_empty());

    let output = fs::read_to_string(&config.output).unwrap();
    assert!(output.contains("use axum::Router;"));
    assert!(output.contains("pub fn app() -> Router {\n    Router::new()\n}\n"));
    assert!(!output.contains("mod "));
    assert!(!output.contains(".route("));
}

#[test]
fn nested_directories_become_paths() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(
        dir.path(),
        &[
            ("src/app/a/route.rs", HANDLER),
            ("src/app/b/c/route.rs", HANDLER),
        ],
    );
    let report = generate(&config(dir.path())).unwrap();
    let paths: Vec<&str> = report.routes.paths().collect();
    assert_eq!(paths, ["/a", "/b/c"]);
}

#[test]
fn param_segments_pass_through() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(
        dir.path(),
        &[
            ("src/app/user/:id/route.rs", HANDLER),
            ("src/app/:user/route.rs", HANDLER),
            ("src/app/resource/route.rs", HANDLER),
        ],
    );
    let config = config(dir.path());
    let report = generate(&config).unwrap();

    let paths: Vec<&str> = report.routes.paths().collect();
    assert_eq!(paths, ["/:user", "/resource", "/user/:id"]);

    let output = fs::read_to_string(&config.output).unwrap();
    assert!(output.contains(".route(\"/user/:id\", any(route__::handler))"));
    assert!(output.contains("#[path = \"../app/user/:id/route.rs\"]\nmod route__;"));
}

#[test]
fn same_file_names_get_distinct_modules() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(
        dir.path(),
        &[
            ("src/app/a/route.rs", HANDLER),
            ("src/app/b/route.rs", HANDLER),
        ],
    );
    let config = config(dir.path());
    generate(&config).unwrap();

    let output = fs::read_to_string(&config.output).unwrap();
    assert!(output.contains("#[path = \"../app/a/route.rs\"]\nmod route;\n"));
    assert!(output.contains("#[path = \"../app/b/route.rs\"]\nmod route_;\n"));
    assert!(output.contains(".route(\"/a\", any(route::handler))"));
    assert!(output.contains(".route(\"/b\", any(route_::handler))"));
}

#[test]
fn eager_mode_skips_non_callable_export() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(
        dir.path(),
        &[
            ("src/app/good/route.rs", HANDLER),
            ("src/app/plain/route.rs", "pub const handler: &str = \"just a string\";\n"),
        ],
    );
    let mut config = config(dir.path());
    config.mode = ResolutionMode::Eager;

    let report = generate(&config).unwrap();
    assert!(!report.is_complete());
    assert_eq!(report.routes.paths().collect::<Vec<_>>(), ["/good"]);
    assert_eq!(report.skipped.len(), 1);
    assert!(matches!(report.skipped[0].reason, SkipReason::NotCallable(_)));

    let output = fs::read_to_string(&config.output).unwrap();
    assert!(output.contains("mod route {\nuse axum::extract::Path;"));
    assert!(output.contains(".route(\"/good\", any(route::handler))"));
    assert!(!output.contains("/plain"));
    assert!(!output.contains("just a string"));
}

#[test]
fn eager_mode_load_failure_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(
        dir.path(),
        &[
            ("src/app/a/route.rs", "pub fn handler( {"),
            ("src/app/b/route.rs", HANDLER),
        ],
    );
    let mut config = config(dir.path());
    config.mode = ResolutionMode::Eager;

    let report = generate(&config).unwrap();
    assert_eq!(report.routes.paths().collect::<Vec<_>>(), ["/b"]);
    assert!(matches!(report.skipped[0].reason, SkipReason::LoadFailed(_)));
}

#[test]
fn reruns_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(
        dir.path(),
        &[
            ("src/app/zeta/route.rs", HANDLER),
            ("src/app/alpha/route.rs", HANDLER),
            ("src/app/mid/deep/route.rs", HANDLER),
            ("src/app/route.rs", HANDLER),
        ],
    );
    let config = config(dir.path());

    generate(&config).unwrap();
    let first = fs::read(&config.output).unwrap();
    generate(&config).unwrap();
    let second = fs::read(&config.output).unwrap();
    assert_eq!(first, second);
}

#[test]
fn creates_nested_output_directories() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path(), &[("src/app/a/route.rs", HANDLER)]);
    let mut config = config(dir.path());
    config.output = dir.path().join("out/one/two/three/app.rs");

    generate(&config).unwrap();
    let output = fs::read_to_string(&config.output).unwrap();
    assert!(output.contains("#[path = \"../../../../src/app/a/route.rs\"]"));
}

#[test]
fn manifest_is_written_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(dir.path(), &[("src/app/user/:id/route.rs", HANDLER)]);
    let mut config = config(dir.path());
    let manifest_path = dir.path().join("target/routes.json");
    config.manifest = Some(manifest_path.clone());

    generate(&config).unwrap();
    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(manifest_path).unwrap()).unwrap();
    assert_eq!(manifest["routes"][0]["path"], "/user/:id");
    assert_eq!(manifest["routes"][0]["params"][0], "id");
}

#[test]
fn missing_base_directory_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    assert!(matches!(
        generate(&config),
        Err(GenerateError::Traversal { .. })
    ));
    assert!(!config.output.exists());
}

#[cfg(unix)]
#[test]
fn colliding_paths_abort_unless_overridden() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(
        dir.path(),
        &[
            ("src/app/a/b/route.rs", HANDLER),
            ("src/app/a\\b/route.rs", HANDLER),
        ],
    );
    let mut config = config(dir.path());
    assert!(matches!(
        generate(&config),
        Err(GenerateError::RouteCollision { .. })
    ));
    assert!(!config.output.exists());

    config.on_collision = CollisionPolicy::Override;
    let report = generate(&config).unwrap();
    assert_eq!(report.routes.len(), 1);
    let output = fs::read_to_string(&config.output).unwrap();
    assert_eq!(output.matches(".route(").count(), 1);
}
