use strata_core::ConfigBuilder;
use strata_sources::{ConfigTree, EnvSource, MapSource, StructuredAdapter, TreeSource};

fn tree_source(name: &str, ordinal: i32, json: &str) -> StructuredAdapter<TreeSource> {
    let tree = ConfigTree::from_json(json).expect("test document must parse");
    StructuredAdapter::new(TreeSource::new(name, tree).with_ordinal(ordinal))
}

#[test]
fn test_document_scalars_through_the_chain() {
    let config = ConfigBuilder::new()
        .with_source(tree_source(
            "app.json",
            100,
            r#"{"server": {"port": 8080, "tls": {"enabled": true}}}"#,
        ))
        .build();

    assert_eq!(config.get_value::<u16>("server.port").unwrap(), 8080);
    assert!(config.get_value::<bool>("server.tls.enabled").unwrap());
}

#[test]
fn test_document_array_converts_to_typed_list() {
    let config = ConfigBuilder::new()
        .with_source(tree_source(
            "app.json",
            100,
            r#"{"limits": [10, 20, 30]}"#,
        ))
        .build();

    assert_eq!(config.get_values::<u32>("limits").unwrap(), vec![10, 20, 30]);
    assert_eq!(config.get_value::<u32>("limits[1]").unwrap(), 20);
}

#[test]
fn test_array_element_with_comma_round_trips() {
    let config = ConfigBuilder::new()
        .with_source(tree_source(
            "app.json",
            100,
            r#"{"names": ["plain", "last, first"]}"#,
        ))
        .build();

    assert_eq!(
        config.get_values::<String>("names").unwrap(),
        vec!["plain", "last, first"]
    );
}

#[test]
fn test_higher_ordinal_document_wins() {
    let config = ConfigBuilder::new()
        .with_source(tree_source("base.json", 100, r#"{"app": {"name": "base"}}"#))
        .with_source(tree_source(
            "override.json",
            400,
            r#"{"app": {"name": "override"}}"#,
        ))
        .build();

    let resolved = config.config_value("app.name");
    assert_eq!(resolved.value(), Some("override"));
    assert_eq!(resolved.source_name(), Some("override.json"));
    assert_eq!(resolved.source_ordinal(), 400);
}

#[test]
fn test_profiles_resolve_inside_documents() {
    let config = ConfigBuilder::new()
        .with_source(tree_source(
            "app.json",
            100,
            r#"{
                "config": {"profile": "docker,prod"},
                "%docker": {"greeting": "from-docker"},
                "%prod": {"greeting": "from-prod"}
            }"#,
        ))
        .build();

    assert_eq!(
        config.get_value::<String>("greeting").unwrap(),
        "from-prod"
    );
}

#[test]
fn test_env_overrides_documents() {
    let env = EnvSource::with_vars([("APP_NAME".to_string(), "from-env".to_string())]);

    let config = ConfigBuilder::new()
        .with_source(tree_source("app.json", 100, r#"{"app": {"name": "from-file"}}"#))
        .with_source(env)
        .build();

    // env ordinal 300 beats the document's 100
    assert_eq!(config.get_value::<String>("app.name").unwrap(), "from-env");
}

#[test]
fn test_interpolation_spans_sources() {
    let config = ConfigBuilder::new()
        .with_source(tree_source(
            "app.json",
            100,
            r#"{"url": "https://${host}/api"}"#,
        ))
        .with_source(
            MapSource::new("overrides")
                .with_ordinal(400)
                .with_entry("host", "example.com"),
        )
        .build();

    assert_eq!(
        config.get_value::<String>("url").unwrap(),
        "https://example.com/api"
    );
}

#[test]
fn test_property_names_span_documents_and_maps() {
    let config = ConfigBuilder::new()
        .with_source(tree_source(
            "app.json",
            100,
            r#"{"a": {"b": 1}, "list": ["x"]}"#,
        ))
        .with_source(MapSource::new("extra").with_entry("c", "2"))
        .build();

    let names = config.property_names();
    assert!(names.contains("a.b"));
    assert!(names.contains("list[0]"));
    assert!(names.contains("c"));
}
