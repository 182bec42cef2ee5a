//! Tests for NotesService
//!
//! Reading note files and directories from disk and exporting the JSON database.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use etymon::application::services::{NotesService, ParsedDocument};
use etymon::application::ApplicationError;
use etymon::config::Settings;
use etymon::domain::TreeBuilder;
use etymon::infrastructure::di::ServiceContainer;
use etymon::infrastructure::traits::RealFileSystem;
use etymon::util::testing::init_test_setup;

const SAMPLE: &str = include_str!("resources/notes/sample.txt");

fn service() -> NotesService {
    NotesService::new(
        Arc::new(RealFileSystem),
        TreeBuilder::new(),
        vec!["txt".into(), "md".into()],
    )
}

fn write(dir: &Path, rel: &str, content: &str) -> PathBuf {
    let path = dir.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}

fn note(category: &str, root: &str, word: &str) -> String {
    format!("「{category}」類\n\t-{root}- (x)\n\t\t{word} ({root} = y)\n")
}

// ============================================================
// parse_path() tests
// ============================================================

#[test]
fn given_note_file_when_parse_path_then_returns_single_document() {
    // Arrange
    init_test_setup();
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), "roots.txt", SAMPLE);

    // Act
    let documents = service().parse_path(&path).unwrap();

    // Assert
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].source, path);
    assert_eq!(documents[0].categories.len(), 3);
}

#[test]
fn given_directory_when_parse_path_then_reads_matching_files_in_path_order() {
    // Arrange
    let temp = TempDir::new().unwrap();
    write(temp.path(), "b.txt", &note("B", "b", "Bee"));
    write(temp.path(), "a.txt", &note("A", "a", "Ant"));
    write(temp.path(), "sub/c.md", &note("C", "c", "Cat"));
    write(temp.path(), "etymon_database.json", "[]");

    // Act
    let documents = service().parse_path(temp.path()).unwrap();

    // Assert
    let sources: Vec<PathBuf> = documents.iter().map(|d| d.source.clone()).collect();
    assert_eq!(
        sources,
        vec![
            temp.path().join("a.txt"),
            temp.path().join("b.txt"),
            temp.path().join("sub/c.md"),
        ]
    );
    let names: Vec<String> = ParsedDocument::flatten(documents)
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn given_same_category_in_two_files_when_flattened_then_both_are_kept() {
    // Arrange
    let temp = TempDir::new().unwrap();
    write(temp.path(), "one.txt", &note("A", "a", "Ant"));
    write(temp.path(), "two.txt", &note("A", "b", "Bee"));

    // Act
    let categories = ParsedDocument::flatten(service().parse_path(temp.path()).unwrap());

    // Assert
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, categories[1].name);
}

#[test]
fn given_missing_input_when_parse_path_then_returns_input_not_found() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.txt");

    // Act
    let result = service().parse_path(&missing);

    // Assert
    match result {
        Err(ApplicationError::InputNotFound(path)) => assert_eq!(path, missing),
        other => panic!("expected InputNotFound, got {other:?}"),
    }
}

#[test]
fn given_file_without_categories_when_parse_path_then_document_is_empty() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), "prose.txt", "今天讀了一些字根。\n");

    // Act
    let documents = service().parse_path(&path).unwrap();

    // Assert
    assert_eq!(documents.len(), 1);
    assert!(documents[0].categories.is_empty());
}

// ============================================================
// normalize_file() tests
// ============================================================

#[test]
fn given_full_width_notes_when_normalize_file_then_folds_punctuation() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), "roots.txt", "「移動」類\n－port－ （拿）：\n");

    // Act
    let text = service().normalize_file(&path).unwrap();

    // Assert
    assert_eq!(text, "\"移動\"類\n-port- (拿)：\n");
}

#[test]
fn given_missing_file_when_normalize_file_then_returns_input_not_found() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.txt");

    // Act
    let result = service().normalize_file(&missing);

    // Assert
    assert!(matches!(result, Err(ApplicationError::InputNotFound(p)) if p == missing));
}

// ============================================================
// export_json() tests
// ============================================================

#[test]
fn given_categories_when_export_json_then_writes_camel_case_utf8() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let notes = service();
    let categories = notes.parse_text("-", SAMPLE).categories;
    let output = temp.path().join("out/db.json");

    // Act
    notes.export_json(&categories, &output, true).unwrap();

    // Assert
    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.ends_with('\n'));
    assert!(text.contains("\"rootGroups\""));
    assert!(text.contains("五感與行為"), "CJK should not be escaped");
    assert!(!text.contains("root_groups"));

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let first = &value[0];
    assert_eq!(first["name"], "五感與行為");
    assert_eq!(first["rootGroups"][0]["roots"][0], "dict");
    assert_eq!(first["rootGroups"][0]["meaning"], "說");
    assert_eq!(first["rootGroups"][0]["vocabulary"][0]["word"], "Contradict");
    assert_eq!(
        first["rootGroups"][0]["vocabulary"][0]["definition"],
        "矛盾/反駁"
    );
}

#[test]
fn given_compact_output_when_to_json_then_single_line() {
    // Arrange
    let notes = service();
    let categories = notes.parse_text("-", SAMPLE).categories;

    // Act
    let json = notes.to_json(&categories, false).unwrap();

    // Assert
    assert!(!json.contains('\n'));
    assert!(json.starts_with("[{\"name\":\"五感與行為\",\"rootGroups\":["));
}

#[test]
fn given_no_categories_when_to_json_then_empty_array() {
    assert_eq!(service().to_json(&[], true).unwrap(), "[]");
}

// ============================================================
// ServiceContainer wiring
// ============================================================

#[test]
fn given_settings_when_container_built_then_notes_use_parser_settings() {
    // Arrange
    let temp = TempDir::new().unwrap();
    write(temp.path(), "a.txt", "「A」類\n-a- (1)\n\tApple (a)\n");
    write(temp.path(), "b.note", &note("B", "b", "Bee"));
    let mut settings = Settings::default();
    settings.extensions = vec!["txt".into()];
    settings.parser.definition_placeholder = "待補".into();

    // Act
    let container = ServiceContainer::with_deps(settings, Arc::new(RealFileSystem));
    let categories = ParsedDocument::flatten(container.notes.parse_path(temp.path()).unwrap());

    // Assert
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].root_groups[0].vocabulary[0].definition, "待補");
    let summary = container.notes.summarize(&categories);
    assert_eq!(summary.to_string(), "1 categories, 1 root groups, 1 words (1 pending)");
}
