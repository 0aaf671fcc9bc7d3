//! Integration test: end-to-end legacy path parsing, option normalization,
//! and gallery assembly through the public API.

use mediakit_core::config::MediakitConfig;
use mediakit_core::digest::sha256_hex;
use mediakit_core::gallery::{assemble, GallerySession};
use mediakit_core::locator::{parse_legacy_path, DEFAULT_VERSION};
use mediakit_core::migrate::{migrate_batch, MigrationInput};
use mediakit_core::normalize::{normalize, ConfigDocument, ConfigValue, FlatValue};
use mediakit_core::transform::{SyntaxRecognizer, TransformValue, Transformation};
use mediakit_core::MediaError;
use serde_json::json;

fn flat(pairs: &[(&str, &str)]) -> Vec<(String, FlatValue)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), FlatValue::from(*v)))
        .collect()
}

#[test]
fn legacy_path_with_transformation_and_version() {
    let loc = parse_legacy_path(
        "/abc123/image/upload/w_200,h_200/v1617000000/folder/photo.jpg",
        &SyntaxRecognizer,
    );
    let expected: Transformation = [("w", TransformValue::Int(200)), ("h", TransformValue::Int(200))]
        .into_iter()
        .collect();
    assert_eq!(loc.cloud_token, Some(sha256_hex(b"abc123")));
    assert_eq!(loc.version, 1_617_000_000);
    assert_eq!(loc.transformations, vec![expected]);
    assert_eq!(loc.public_id, "folder/photo");
}

#[test]
fn legacy_path_without_optional_parts() {
    let loc = parse_legacy_path("/abc123/image/upload/folder/photo.jpg", &SyntaxRecognizer);
    assert_eq!(loc.version, DEFAULT_VERSION);
    assert!(loc.transformations.is_empty());
    assert_eq!(loc.public_id, "folder/photo");
}

#[test]
fn injected_recognizer_is_consulted() {
    let only_thumb = |segment: &str| {
        if segment == "thumb" {
            vec![[("t", TransformValue::Text("thumb".into()))]
                .into_iter()
                .collect::<Transformation>()]
        } else {
            Vec::new()
        }
    };
    let loc = parse_legacy_path("/abc123/image/upload/thumb/w_200/photo.jpg", &only_thumb);
    assert_eq!(loc.transformations.len(), 1);
    assert_eq!(loc.public_id, "w_200/photo");
}

#[test]
fn normalizer_example() {
    let doc = normalize(flat(&[
        ("show_arrows", "on"),
        ("thumbnail_props.width", "100"),
        ("useless", "none"),
    ]));
    let mut expected = ConfigDocument::new();
    expected.insert("showArrows", ConfigValue::Bool(true));
    expected.insert(
        "thumbnailProps",
        ConfigValue::Doc(ConfigDocument::single("width", ConfigValue::Int(100))),
    );
    assert_eq!(doc, expected);
}

#[test]
fn dot_expansion_ignores_iteration_order() {
    let forward = normalize(flat(&[("a.b", "1"), ("a.c", "2")]));
    let backward = normalize(flat(&[("a.c", "2"), ("a.b", "1")]));
    assert_eq!(forward, backward);
}

#[test]
fn malformed_custom_json_returns_no_document() {
    let result = assemble(flat(&[("show_arrows", "on")]), "demo", Some("{\"a\":"));
    assert!(matches!(result, Err(MediaError::InvalidCustomConfigJson(_))));
}

#[test]
fn session_uses_configured_container() {
    let cfg = MediakitConfig::default();
    let settings = flat(&[
        ("enable_gallery", "on"),
        ("carousel_location", "left"),
        ("custom_settings", r#"{"zoom":false}"#),
    ]);
    let session = GallerySession::new(settings, || -> anyhow::Result<String> {
        Ok("demo".to_string())
    })
    .with_container(cfg.gallery.container.clone());

    let gallery = session.config().unwrap();
    assert_eq!(gallery.get("container"), Some(&json!(cfg.gallery.container)));
    assert_eq!(gallery.get("carouselLocation"), Some(&json!("left")));
    assert_eq!(gallery.get("zoom"), Some(&json!(false)));
    assert!(gallery.get("enableGallery").is_none());
}

#[test]
fn migration_batch_uses_configured_plugin_version() {
    let cfg = MediakitConfig::default();
    let inputs = vec![
        MigrationInput {
            record_id: 10,
            url: "https://res.example.com/abc123/video/upload/v5/clips/intro.mp4".to_string(),
            stored_public_id: None,
        },
        MigrationInput {
            record_id: 11,
            url: "relative/path.jpg".to_string(),
            stored_public_id: Some("stored/asset".to_string()),
        },
    ];
    let outcomes = migrate_batch(&inputs, &SyntaxRecognizer, &cfg.migration);
    let first = outcomes[0].result.as_ref().unwrap();
    assert_eq!(first.public_id, "clips/intro");
    assert_eq!(first.version, 5);
    assert_eq!(first.plugin_version, cfg.migration.plugin_version);
    let second = outcomes[1].result.as_ref().unwrap();
    assert_eq!(second.public_id, "stored/asset");
    assert_eq!(second.version, DEFAULT_VERSION);
}
