//! Tests for JSONPath evaluation, validation and suggestions.

#[cfg(test)]
mod tests {
    use crate::jsonpath::*;
    use crate::value::{from_json, Map, Value};
    use pretty_assertions::assert_eq;

    fn json(text: &str) -> Value {
        from_json(text).unwrap()
    }

    fn store() -> Value {
        json(r#"{"store":{"book":[{"title":"A","price":8},{"title":"B","price":12}],"bicycle":{"color":"red","price":20}}}"#)
    }

    fn paths(results: &[PathResult]) -> Vec<&str> {
        results.iter().map(|r| r.path.as_str()).collect()
    }

    #[test]
    fn test_wildcard_then_property() {
        let doc = json(r#"{"store":{"book":[{"title":"A"},{"title":"B"}]}}"#);
        let results = evaluate_json_path(&doc, "$.store.book[*].title");
        assert_eq!(
            results,
            vec![
                PathResult {
                    path: "$.store.book[0].title".to_string(),
                    value: Value::String("A".into()),
                },
                PathResult {
                    path: "$.store.book[1].title".to_string(),
                    value: Value::String("B".into()),
                },
            ]
        );
    }

    #[test]
    fn test_root_and_empty_expression() {
        let doc = store();
        for expr in ["$", "", "  $  "] {
            let results = evaluate_json_path(&doc, expr);
            assert_eq!(results.len(), 1);
            assert_eq!(results[0].path, "$");
            assert_eq!(results[0].value, doc);
        }
    }

    #[test]
    fn test_index_and_missing_members() {
        let doc = store();
        let results = evaluate_json_path(&doc, "$.store.book[1].price");
        assert_eq!(results[0].value, Value::Int(12));
        assert!(evaluate_json_path(&doc, "$.store.book[5]").is_empty());
        assert!(evaluate_json_path(&doc, "$.store.missing").is_empty());
        assert!(evaluate_json_path(&doc, "$.store.bicycle.color.shade").is_empty());
    }

    #[test]
    fn test_wildcard_over_object() {
        let results = evaluate_json_path(&store(), "$.store.bicycle.*");
        assert_eq!(paths(&results), vec!["$.store.bicycle.color", "$.store.bicycle.price"]);
        let results = evaluate_json_path(&store(), "$.store.bicycle.price.*");
        assert!(results.is_empty());
    }

    #[test]
    fn test_recursive_descent() {
        let results = evaluate_json_path(&store(), "$..price");
        assert_eq!(
            paths(&results),
            vec![
                "$.store.book[0].price",
                "$.store.book[1].price",
                "$.store.bicycle.price",
            ]
        );

        let results = evaluate_json_path(&store(), "$..book[0].title");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].value, Value::String("A".into()));

        let results = evaluate_json_path(&store(), "$.store..color");
        assert_eq!(paths(&results), vec!["$.store.bicycle.color"]);

        assert!(evaluate_json_path(&store(), "$..").is_empty());
    }

    #[test]
    fn test_recursive_descent_into_brackets() {
        let doc = json(r#"{"a":{"b":[1,2]},"c":[3]}"#);
        let results = evaluate_json_path(&doc, "$..[0]");
        assert_eq!(paths(&results), vec!["$.a.b[0]", "$.c[0]"]);

        let results = evaluate_json_path(&doc, "$..[*]");
        assert_eq!(
            paths(&results),
            vec!["$.a", "$.c", "$.a.b", "$.a.b[0]", "$.a.b[1]", "$.c[0]"]
        );
        assert_eq!(validate_json_path("$..[0]"), Ok(()));
    }

    #[test]
    fn test_recursive_wildcard_visits_every_descendant_once() {
        let doc = store();
        let results = evaluate_json_path(&doc, "$..*");
        // store, book, bicycle, two books, four book members, two bicycle members
        assert_eq!(results.len(), 11);
        let mut seen: Vec<&str> = paths(&results);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 11);
    }

    #[test]
    fn test_length_of_array() {
        let results = evaluate_json_path(&store(), "$.store.book.length");
        assert_eq!(
            results,
            vec![PathResult {
                path: "$.store.book.length".to_string(),
                value: Value::Int(2),
            }]
        );
    }

    #[test]
    fn test_digit_member_of_object() {
        let doc = json(r#"{"codes":{"200":"ok"},"top":[["x"]]}"#);
        assert_eq!(evaluate_json_path(&doc, "$.codes.200")[0].value, Value::String("ok".into()));
        assert_eq!(evaluate_json_path(&doc, "$.top[0][0]")[0].path, "$.top[0][0]");
        assert_eq!(evaluate_json_path(&json("[1,2]"), "$[1]")[0].value, Value::Int(2));
    }

    // Keys containing `.`, `[` or `]`, the empty key and a key named `*`
    // render paths that do not select the same node again.
    #[test]
    fn test_paths_are_self_consistent() {
        let docs = [
            store(),
            json(r#"[{"a":[1,[2,3]]},{"b":{"c":null}},"s",true]"#),
            json(r#"{"codes":{"200":"ok","404":{"msg":"gone"}}}"#),
        ];
        for doc in &docs {
            let results = evaluate_json_path(doc, "$..*");
            assert!(!results.is_empty());
            for result in results {
                let again = evaluate_json_path(doc, &result.path);
                assert_eq!(again.len(), 1, "{}", result.path);
                assert_eq!(again[0], result);
            }
        }
    }

    #[test]
    fn test_reserved_keys_do_not_round_trip() {
        let doc = json(r#"{"":1,"*":2,"a.b":3}"#);
        let results = evaluate_json_path(&doc, "$.*");
        assert_eq!(paths(&results), vec!["$.", "$.*", "$.a.b"]);

        assert!(evaluate_json_path(&doc, "$.").is_empty());
        assert_eq!(evaluate_json_path(&doc, "$.*").len(), 3);
        assert!(evaluate_json_path(&doc, "$.a.b").is_empty());
    }

    #[test]
    fn test_validate_json_path() {
        assert_eq!(validate_json_path("$.store.book[*].title"), Ok(()));
        assert_eq!(validate_json_path("$..price"), Ok(()));
        assert_eq!(validate_json_path(""), Err(JsonPathError::Empty));
        assert_eq!(validate_json_path("store.book"), Err(JsonPathError::MissingRoot));
        assert_eq!(
            validate_json_path("$.a[0"),
            Err(JsonPathError::UnbalancedBrackets { open: 1, close: 0 })
        );
        assert_eq!(
            validate_json_path("$.a[?(@.x)]"),
            Err(JsonPathError::UnsupportedSelector("?(@.x)".to_string()))
        );
        assert!(JsonPathError::MissingRoot.to_string().contains("'$'"));
    }

    #[test]
    fn test_query_validates_first() {
        assert!(query(&store(), "store").is_err());
        assert_eq!(query(&store(), "$.store.bicycle.color").unwrap().len(), 1);
    }

    #[test]
    fn test_suggestions_are_breadth_first() {
        let doc = json(r#"{"store":{"book":[{"title":"A"},{"title":"B"}],"name":"x"}}"#);
        assert_eq!(
            get_json_path_suggestions(&doc),
            vec![
                "$",
                "$.store",
                "$.store.book",
                "$.store.name",
                "$.store.book[*]",
                "$.store.book.length",
                "$.store.book[0]",
                "$.store.book[1]",
                "$.store.book[0].title",
                "$.store.book[1].title",
            ]
        );
    }

    #[test]
    fn test_suggestions_sample_three_indices_and_cap() {
        let suggestions = get_json_path_suggestions(&json("[1,2,3,4,5]"));
        assert_eq!(suggestions, vec!["$", "$[*]", "$.length", "$[0]", "$[1]", "$[2]"]);

        let wide: Map = (0..100).map(|i| (format!("k{}", i), Value::Int(i))).collect();
        let suggestions = get_json_path_suggestions(&Value::Map(wide));
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
    }
}
