use scriptree::config_file::Config;
use scriptree::manifest::Manifest;
use scriptree::render::render;
use scriptree::scripts::ResolveError;
use scriptree::scripts::ScriptMap;
use scriptree::scripts::extract::{Extractor, default_rules};
use scriptree::scripts::graph::ScriptGraph;
use scriptree::tree::TreeNode;
use scriptree::{ResolveOptions, resolve};

const DEMO_MANIFEST: &str = r#"{
  "name": "demo",
  "scripts": {
    "build": "tsc -p .",
    "prebuild": "rimraf dist",
    "test": "npm-run-all -s lint test:*",
    "test:unit": "jest",
    "test:e2e": "cypress run",
    "lint": "eslint src",
    "ci": "npm run build && npm run test && npm run deploy",
    "postinstall": "npm run build"
  }
}"#;

fn write_manifest(dir: &std::path::Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("package.json");
    std::fs::write(&path, content).unwrap();
    path
}

fn load_demo() -> Manifest {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(dir.path(), DEMO_MANIFEST);
    Manifest::from_file(&path).unwrap()
}

fn collect_labels(node: &TreeNode, out: &mut Vec<String>) {
    for child in &node.nodes {
        out.push(child.label.clone());
        collect_labels(child, out);
    }
}

#[test]
fn test_render_full_tree() {
    let manifest = load_demo();
    assert_eq!(manifest.name.as_deref(), Some("demo"));
    let tree = resolve(&manifest.scripts, &ResolveOptions::default()).unwrap();
    let expected = [
        "8 scripts",
        "├─ build → tsc -p .",
        "│  └─ prebuild → rimraf dist",
        "├─ prebuild → rimraf dist",
        "├─ test → npm-run-all -s lint test:*",
        "│  ├─ lint → eslint src",
        "│  ├─ test:unit → jest",
        "│  └─ test:e2e → cypress run",
        "├─ test:unit → jest",
        "├─ test:e2e → cypress run",
        "├─ lint → eslint src",
        "├─ ci → npm run build && npm run test && npm run deploy",
        "│  ├─ build → tsc -p .",
        "│  │  └─ prebuild → rimraf dist",
        "│  └─ test → npm-run-all -s lint test:*",
        "│     ├─ lint → eslint src",
        "│     ├─ test:unit → jest",
        "│     └─ test:e2e → cypress run",
        "└─ postinstall → npm run build",
        "   └─ build → tsc -p .",
        "      └─ prebuild → rimraf dist",
    ];
    assert_eq!(render(&tree), expected.join("\n"));
}

#[test]
fn test_render_pruned_alphabetical_tree() {
    let manifest = load_demo();
    let options = ResolveOptions {
        alpha: true,
        prune: true,
        ..Default::default()
    };
    let tree = resolve(&manifest.scripts, &options).unwrap();
    insta::assert_snapshot!(render(&tree), @r"
    4 scripts
    ├─ build → tsc -p .
    │  └─ prebuild → rimraf dist
    ├─ ci → npm run build && npm run test && npm run deploy
    │  ├─ build → tsc -p .
    │  │  └─ prebuild → rimraf dist
    │  └─ test → npm-run-all -s lint test:*
    │     ├─ lint → eslint src
    │     ├─ test:unit → jest
    │     └─ test:e2e → cypress run
    ├─ lint → eslint src
    └─ test → npm-run-all -s lint test:*
       ├─ lint → eslint src
       ├─ test:unit → jest
       └─ test:e2e → cypress run
    ");
}

#[test]
fn test_no_dangling_names_in_tree() {
    let manifest = load_demo();
    let tree = resolve(&manifest.scripts, &ResolveOptions::default()).unwrap();
    let mut labels = Vec::new();
    collect_labels(&tree, &mut labels);
    for label in &labels {
        let name = label.split(" → ").next().unwrap();
        assert!(
            manifest.scripts.contains_key(name),
            "unknown script in tree: {label}"
        );
    }
    assert!(!labels.iter().any(|l| l.starts_with("deploy")));
}

#[test]
fn test_manifest_without_scripts() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(dir.path(), r#"{"name": "bare"}"#);
    let manifest = Manifest::from_file(&path).unwrap();
    let result = resolve(&manifest.scripts, &ResolveOptions::default());
    match result {
        Err(ResolveError::NoScripts) => {}
        other => panic!("Expected NoScripts, got: {other:?}"),
    }
}

#[test]
fn test_manifest_found_from_subdirectory() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(dir.path(), DEMO_MANIFEST);
    let nested = dir.path().join("src");
    std::fs::create_dir_all(&nested).unwrap();
    assert_eq!(Manifest::find_from(&nested).unwrap(), path);
}

#[test]
fn test_config_adds_invocation_rules() {
    let dir = tempfile::tempdir().unwrap();
    let manifest_path = write_manifest(
        dir.path(),
        r#"{"scripts": {
            "dev": "concurrently -k \"npm:watch\" serve watch:*",
            "serve": "vite",
            "watch:css": "sass --watch",
            "release": "yarn run build",
            "build": "vite build"
        }}"#,
    );
    let config_path = dir.path().join(".scriptree.yaml");
    std::fs::write(
        &config_path,
        "prune: true\nrules:\n  - keyword: concurrently\n    kind: batch\n  - keyword: yarn run\n    kind: single\n",
    )
    .unwrap();

    let manifest = Manifest::from_file(&manifest_path).unwrap();
    let options = ResolveOptions::from(Config::from_file(&config_path).unwrap());
    assert!(options.prune);
    let tree = resolve(&manifest.scripts, &options).unwrap();
    let expected = [
        "4 scripts",
        "├─ dev → concurrently -k \"npm:watch\" serve watch:*",
        "│  ├─ serve → vite",
        "│  └─ watch:css → sass --watch",
        "├─ serve → vite",
        "├─ release → yarn run build",
        "│  └─ build → vite build",
        "└─ build → vite build",
    ];
    assert_eq!(render(&tree), expected.join("\n"));
}

#[test]
fn test_cyclic_scripts_terminate() {
    let scripts: ScriptMap = [
        ("a", "npm run b"),
        ("b", "npm-run-all c a"),
        ("c", "npm run a"),
    ]
    .iter()
    .map(|(n, c)| ((*n).to_string(), (*c).to_string()))
    .collect();
    let tree = resolve(&scripts, &ResolveOptions::default()).unwrap();
    let rendered = render(&tree);
    assert!(rendered.starts_with("3 scripts\n├─ a → npm run b\n│  └─ b → npm-run-all c a\n"));
    assert!(rendered.contains("a ↻ (cycle)"));
}

#[test]
fn test_graph_exposes_entry_facts() {
    let manifest = load_demo();
    let graph =
        ScriptGraph::build(&manifest.scripts, &Extractor::new(&default_rules()).unwrap()).unwrap();
    let build = graph.get("build").unwrap();
    assert_eq!(build.nodes.first().map(String::as_str), Some("prebuild"));
    assert!(graph.get("postinstall").unwrap().is_post);
    assert!(graph.get("test:unit").unwrap().is_explicit_sub);
    assert!(!graph.get("lint").unwrap().is_explicit_sub);
    assert_eq!(graph.get("ci").unwrap().child_names, vec!["build", "test"]);
}

#[test]
fn test_json_output_shape() {
    let scripts: ScriptMap = [("build", "tsc"), ("prebuild", "rimraf dist")]
        .iter()
        .map(|(n, c)| ((*n).to_string(), (*c).to_string()))
        .collect();
    let options = ResolveOptions {
        prune: true,
        ..Default::default()
    };
    let tree = resolve(&scripts, &options).unwrap();
    assert_eq!(
        serde_json::to_value(&tree).unwrap(),
        serde_json::json!({
            "label": "1 script",
            "nodes": [{
                "label": "build → tsc",
                "nodes": [{"label": "prebuild → rimraf dist", "nodes": []}]
            }]
        })
    );
}
