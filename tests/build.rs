use std::fs;
use std::path::Path;

use folio::content::{ContentRecord, ViolationKind};
use folio::Site;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read_json(path: &Path) -> serde_json::Value {
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_build_skips_malformed_file_and_emits_siblings() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(
        root,
        "_posts/2020-01-01-example.md",
        "---\nlayout: post\ntitle: Example\ndate: 2020-01-01\ntags: [a, b]\n---\nHello world",
    );
    write(
        root,
        "_posts/2020-02-01-second.md",
        "---\nlayout: post\ntitle: Second\ndate: 2020-02-01\ntags: [b]\n---\nMore words here",
    );
    write(
        root,
        "_posts/2020-03-01-broken.md",
        "---\nlayout: post\ntitle: Broken\n\nthe closing line never comes\n",
    );
    write(root, "notes.md", "Just text, no front matter.\n");

    let site = Site::new(root).unwrap();
    let report = site.build().unwrap();

    assert_eq!(report.emitted, 3);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0]
        .to_string()
        .contains("2020-03-01-broken.md"));

    let dest = &site.destination_dir;
    assert!(!dest.join("2020/03/01/broken/index.json").exists());

    let example = read_json(&dest.join("2020/01/01/example/index.json"));
    assert_eq!(example["title"], "Example");
    assert_eq!(example["front_matter"]["layout"], "post");
    assert_eq!(example["front_matter"]["date"], "2020-01-01");
    assert_eq!(example["front_matter"]["tags"], serde_json::json!(["a", "b"]));
    assert_eq!(example["next"]["title"], "Second");
    assert!(example["previous"].is_null());
    assert_eq!(example["related"][0]["title"], "Second");

    let notes = read_json(&dest.join("notes/index.json"));
    assert_eq!(notes["kind"], "page");
}

#[test]
fn test_check_reports_missing_post_date() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "_posts/undated.md",
        "---\nlayout: post\ntitle: Undated\n---\nBody\n",
    );

    let site = Site::new(dir.path()).unwrap();
    let report = site.check().unwrap();

    assert_eq!(report.emitted, 1);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].violation.field, "date");
    assert_eq!(report.warnings[0].violation.kind, ViolationKind::Missing);
    assert!(!site.destination_dir.exists());
}

#[test]
fn test_parse_example_record() {
    let record = ContentRecord::parse(
        "---\nlayout: post\ntitle: Example\ndate: 2020-01-01\ntags: [a, b]\n---\nHello world",
        "_posts/2020-01-01-example.md",
    )
    .unwrap();

    assert_eq!(record.front_matter.layout(), Some("post"));
    assert_eq!(record.front_matter.title(), Some("Example"));
    assert_eq!(record.front_matter.tags(), vec!["a", "b"]);
    assert_eq!(record.body, "Hello world");
    assert!(record.validate().is_valid());
}

#[test]
fn test_build_never_writes_outside_destination() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("site");
    write(
        &root,
        "evil.md",
        "---\ntitle: Evil\npermalink: /../../escaped/\n---\nBody\n",
    );
    write(&root, "a.md", "---\ntitle: A\npermalink: /about\n---\n");
    write(&root, "b.md", "---\ntitle: B\npermalink: /about/\n---\n");

    let site = Site::new(&root).unwrap();
    let report = site.build().unwrap();

    assert!(!dir.path().join("escaped").exists());
    assert!(site.destination_dir.join("evil/index.json").exists());
    assert_eq!(report.warnings.len(), 1);

    assert_eq!(report.collisions.len(), 1);
    let about = read_json(&site.destination_dir.join("about/index.json"));
    assert_eq!(about["title"], "A");
}
