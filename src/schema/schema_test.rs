//! Tests for schema generation and validation.

#[cfg(test)]
mod tests {
    use crate::schema::*;
    use crate::value::{classify, from_json, Kind, Value};
    use pretty_assertions::assert_eq;

    fn json(text: &str) -> Value {
        from_json(text).unwrap()
    }

    /// Checks that every node's type matches the classifier.
    fn assert_type_fidelity(value: &Value, node: &SchemaNode) {
        assert_eq!(node.kind, classify(value), "type of {}", value);
        match value {
            Value::Map(map) => {
                let properties = node.properties.as_ref().expect("object has properties");
                for (key, child) in map.iter() {
                    assert_type_fidelity(child, &properties[key]);
                }
            }
            Value::List(items) => match &node.items {
                Some(SchemaItems::Single(schema)) => {
                    for item in items {
                        assert_type_fidelity(item, schema);
                    }
                }
                Some(SchemaItems::Tuple(schemas)) => {
                    for item in items {
                        assert!(schemas.iter().any(|s| s.kind == classify(item)));
                    }
                }
                None => assert!(items.is_empty()),
            },
            _ => {}
        }
    }

    #[test]
    fn test_type_fidelity() {
        let docs = [
            r#"{"id":7,"price":9.5,"whole":3.0,"name":"x","ok":true,"none":null,"tags":["a","b"],"nested":{"list":[{"k":1}]}}"#,
            r#"[1, "two", null, [3.5]]"#,
            r#""plain""#,
            "false",
        ];
        for text in docs {
            let doc = json(text);
            let schema = generate_json_schema(&doc, &SchemaOptions::default());
            assert_type_fidelity(&doc, &schema);
        }
    }

    #[test]
    fn test_object_schema() {
        let schema = generate_json_schema(&json(r#"{"a":1,"b":null}"#), &SchemaOptions::default());
        assert_eq!(schema.schema.as_deref(), Some(SCHEMA_DRAFT));
        assert_eq!(schema.kind, Kind::Object);
        assert_eq!(schema.required, Some(vec!["a".to_string()]));
        assert_eq!(schema.additional_properties, Some(false));

        let properties = schema.properties.unwrap();
        assert_eq!(properties["b"].kind, Kind::Null);
        // Only the root is stamped.
        assert_eq!(properties["a"].schema, None);
    }

    #[test]
    fn test_required_and_additional_properties_options() {
        let opts = SchemaOptions {
            required: false,
            additional_properties: true,
            title: Some("Config".to_string()),
            ..SchemaOptions::default()
        };
        let schema = generate_json_schema(&json(r#"{"a":1}"#), &opts);
        assert_eq!(schema.required, None);
        assert_eq!(schema.additional_properties, Some(true));
        assert_eq!(schema.title.as_deref(), Some("Config"));

        let schema = generate_json_schema(&json(r#"{"a":null}"#), &SchemaOptions::default());
        assert_eq!(schema.required, None);
    }

    #[test]
    fn test_array_items() {
        let schema = generate_json_schema(&json(r#"["a","b"]"#), &SchemaOptions::default());
        match schema.items {
            Some(SchemaItems::Single(item)) => assert_eq!(item.kind, Kind::String),
            other => panic!("expected single items schema, got {:?}", other),
        }

        // Bounds are derived from each sample, so different numbers give
        // different element schemas.
        let schema = generate_json_schema(&json("[1, 1, 2, \"x\"]"), &SchemaOptions::default());
        match schema.items {
            Some(SchemaItems::Tuple(items)) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[2].kind, Kind::String);
            }
            other => panic!("expected tuple items schema, got {:?}", other),
        }

        let schema = generate_json_schema(&json("[]"), &SchemaOptions::default());
        assert_eq!(schema.items, None);
    }

    #[test]
    fn test_number_bounds() {
        let bounds = |text: &str| {
            let schema = generate_json_schema(&json(text), &SchemaOptions::default());
            (schema.minimum.unwrap(), schema.maximum.unwrap())
        };
        assert_eq!(bounds("5"), (Value::Int(0), Value::Int(10)));
        assert_eq!(bounds("-3"), (Value::Int(-6), Value::Int(0)));
        assert_eq!(bounds("2.5"), (Value::Int(0), Value::Int(5)));
        assert_eq!(bounds("-0.25"), (Value::Int(-1), Value::Int(0)));
    }

    #[test]
    fn test_string_formats() {
        assert_eq!(detect_format("dev@example.com"), Some(StringFormat::Email));
        assert_eq!(detect_format("https://example.com/a?b=c"), Some(StringFormat::Uri));
        assert_eq!(detect_format("2024-01-15T10:30:00Z"), Some(StringFormat::DateTime));
        assert_eq!(detect_format("2024-01-15"), Some(StringFormat::DateTime));
        assert_eq!(detect_format("2024-01-15 10:30:00"), Some(StringFormat::DateTime));
        assert_eq!(detect_format("20240115"), None);
        assert_eq!(detect_format("hello world"), None);
        assert_eq!(detect_format("well-known"), None);

        let opts = SchemaOptions {
            formats: false,
            ..SchemaOptions::default()
        };
        let schema = generate_json_schema(&json(r#""dev@example.com""#), &opts);
        assert_eq!(schema.format, None);
    }

    #[test]
    fn test_examples_on_leaves() {
        let opts = SchemaOptions {
            examples: true,
            ..SchemaOptions::default()
        };
        let schema = generate_json_schema(&json(r#"{"a":"x"}"#), &opts);
        assert_eq!(schema.examples, None);
        let properties = schema.properties.unwrap();
        assert_eq!(properties["a"].examples, Some(vec![Value::String("x".into())]));
    }

    #[test]
    fn test_serialized_shape() {
        let schema = generate_json_schema(&json(r#"{"n":1}"#), &SchemaOptions::default());
        let text = serde_json::to_string(&schema).unwrap();
        assert_eq!(
            text,
            r#"{"$schema":"https://json-schema.org/draft/2020-12/schema","type":"object","properties":{"n":{"type":"integer","minimum":0,"maximum":2}},"required":["n"],"additionalProperties":false}"#
        );
        let parsed: SchemaNode = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, schema);
    }

    #[test]
    fn test_validate_json_schema() {
        let schema = generate_json_schema(&json(r#"{"a":[1]}"#), &SchemaOptions::default());
        assert_eq!(validate_json_schema(&schema.to_value().unwrap()), Ok(()));

        assert_eq!(
            validate_json_schema(&json(r#"{"type":"object"}"#)),
            Err(SchemaError::MissingSchemaKeyword)
        );
        assert_eq!(
            validate_json_schema(&json(r#"{"$schema":"x"}"#)),
            Err(SchemaError::MissingType)
        );
        assert_eq!(validate_json_schema(&json("[]")), Err(SchemaError::NotAnObject("array")));
    }
}
