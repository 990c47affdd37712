//! Integration test: drive the engine the way the agent's
//! configuration prompts do.
//!
//! A schema document is decoded and parsed once, then properties are
//! enumerated, values are validated by declared type, and dependency
//! constraints are consulted before a property is treated as
//! applicable.

use strand_schema::{decode, Capacity, Rejection, Schema, SchemaError, ValueType};

const LISTENER_SCHEMA: &str = r#"{
    "type": "object",
    "properties": {
        "port": {"type": "integer", "minimum": 1, "maximum": 65535},
        "name": {"type": "string", "minLength": 1}
    },
    "required": ["port"]
}"#;

const AGENT_SCHEMA: &str = r#"{
    "type": "object",
    "title": "Agent configuration",
    "dependencies": {"proxy_port": ["proxy_host"]},
    "properties": {
        "proxy_host": {"type": "string", "format": "hostname"},
        "proxy_port": {"type": "integer", "minimum": 1, "maximum": 65535},
        "log_level": {"type": "string", "enum": ["error", "warn", "info", "debug"]},
        "telemetry": {
            "type": "object",
            "properties": {
                "interval": {"type": "number", "minimum": 0.5, "multipleOf": 0.5},
                "enabled": {"type": "boolean"}
            },
            "required": ["interval"]
        }
    }
}"#;

fn property<'doc>(
    schema: &Schema<'doc>,
    parent: strand_schema::ItemRef,
    name: &str,
) -> strand_schema::ItemRef {
    schema
        .properties(parent)
        .find(|(key, _)| *key == Some(name))
        .map(|(_, item)| item)
        .unwrap_or_else(|| panic!("no property {name}"))
}

#[test]
fn listener_schema_end_to_end() {
    let doc = decode(LISTENER_SCHEMA).unwrap();
    let schema = Schema::parse(&doc, Capacity::Dynamic).unwrap();
    assert_eq!(schema.node_count(), 3);
    assert_eq!(schema.type_of(schema.root()), ValueType::Object);

    let port = property(&schema, schema.root(), "port");
    let name = property(&schema, schema.root(), "name");

    assert!(schema.is_required(port));
    assert!(!schema.is_required(name));

    assert_eq!(schema.validate_integer(port, "8080"), Ok(()));
    assert_eq!(
        schema.validate_integer(port, "70000"),
        Err(Rejection::AboveMaximum)
    );
    // Unsupplied and not required is fine; unsupplied and required is not.
    assert_eq!(schema.validate_string(name, ""), Ok(()));
    assert_eq!(schema.validate_integer(port, ""), Err(Rejection::Required));
}

#[test]
fn listener_schema_in_fixed_buffer_mode() {
    let doc = decode(LISTENER_SCHEMA).unwrap();
    let budget = Capacity::for_document(&doc);
    assert_eq!(budget, Capacity::Fixed(3));

    let schema = Schema::parse(&doc, budget).unwrap();
    let port = property(&schema, schema.root(), "port");
    assert_eq!(schema.validate_integer(port, "8080"), Ok(()));

    // One node short: parsing must fail whole, not truncate.
    let err = Schema::parse(&doc, Capacity::Fixed(2)).unwrap_err();
    assert!(matches!(err, SchemaError::Full { capacity: 2 }));
}

#[test]
fn agent_schema_full_walkthrough() {
    let doc = decode(AGENT_SCHEMA).unwrap();
    let schema = Schema::parse(&doc, Capacity::Dynamic).unwrap();
    assert_eq!(schema.node_count(), 7);
    assert_eq!(schema.title(schema.root()), Some("Agent configuration"));

    let root = schema.root();
    let log_level = property(&schema, root, "log_level");
    let proxy_port = property(&schema, root, "proxy_port");
    let telemetry = property(&schema, root, "telemetry");
    let interval = property(&schema, telemetry, "interval");
    let enabled = property(&schema, telemetry, "enabled");

    // Enum-constrained string with the enumerated rejection message.
    assert_eq!(schema.validate_string(log_level, "info"), Ok(()));
    let err = schema.validate_string(log_level, "loud").unwrap_err();
    assert_eq!(
        err.to_string(),
        "value not in accepted list (acceptable values are: error, warn, info, debug)"
    );

    // Real with an epsilon-tolerant multipleOf.
    assert_eq!(schema.validate_real(interval, "1.5"), Ok(()));
    assert_eq!(schema.validate_real(interval, "0.7"), Err(Rejection::NotMultiple));
    assert_eq!(
        schema.validate_real(interval, "0.4"),
        Err(Rejection::BelowMinimum)
    );
    assert_eq!(schema.validate_real(interval, ""), Err(Rejection::Required));

    // Boolean spellings.
    assert_eq!(schema.validate_bool(enabled, "on"), Ok(()));
    assert_eq!(schema.validate_bool(enabled, "FALSE"), Ok(()));
    assert_eq!(
        schema.validate_bool(enabled, "enabled"),
        Err(Rejection::InvalidBoolean)
    );

    // proxy_port only applies once proxy_host has been supplied.
    assert!(!schema.dependencies_achieved(proxy_port, &[]));
    assert!(!schema.dependencies_achieved(proxy_port, &["log_level"]));
    assert!(schema.dependencies_achieved(proxy_port, &["proxy_host"]));
    assert_eq!(schema.validate_integer(proxy_port, "3128"), Ok(()));
}

#[test]
fn rejection_does_not_poison_the_engine() {
    let doc = decode(LISTENER_SCHEMA).unwrap();
    let schema = Schema::parse(&doc, Capacity::Dynamic).unwrap();
    let port = property(&schema, schema.root(), "port");

    assert!(schema.validate_integer(port, "not a number").is_err());
    assert_eq!(schema.validate_integer(port, "443"), Ok(()));
    assert!(schema.validate_integer(port, "0").is_err());
    assert_eq!(schema.validate_integer(port, "65535"), Ok(()));
}

#[test]
fn malformed_documents_never_yield_partial_schemas() {
    // Undecodable text surfaces the decoder's error.
    assert!(matches!(decode("{oops"), Err(SchemaError::Decode(_))));

    // A shape violation deep in the tree fails the whole parse.
    let doc = decode(
        r#"{
            "type": "object",
            "properties": {
                "a": {"type": "integer"},
                "b": {
                    "type": "object",
                    "properties": {
                        "c": {"type": "integer", "multipleOf": "three"}
                    }
                }
            }
        }"#,
    )
    .unwrap();
    let err = Schema::parse(&doc, Capacity::Dynamic).unwrap_err();
    assert_eq!(
        err.to_string(),
        "malformed schema: 'multipleOf' is not of correct type"
    );
}
