//! Attribute lookup on an opening-tag fragment.
//!
//! Pairs are consumed left to right, so a key is only ever compared against
//! real keys: `datasource="name"` never satisfies a lookup for `name`.

use super::patterns::ATTRIBUTE;
use crate::model::Attribute;

/// Value of the first attribute whose key equals `name`, ignoring ASCII case.
pub fn attr(fragment: &str, name: &str) -> Option<String> {
    ATTRIBUTE.captures_iter(fragment).find_map(|caps| {
        let key = caps.get(1)?.as_str();
        if !key.eq_ignore_ascii_case(name) {
            return None;
        }
        caps.get(2)
            .or_else(|| caps.get(3))
            .map(|v| v.as_str().to_string())
    })
}

/// Every attribute pair in source order.
pub fn attributes(fragment: &str) -> Vec<Attribute> {
    ATTRIBUTE
        .captures_iter(fragment)
        .filter_map(|caps| {
            let key = caps.get(1)?.as_str().to_string();
            let value = caps.get(2).or_else(|| caps.get(3))?.as_str().to_string();
            Some(Attribute { key, value })
        })
        .collect()
}

/// Every attribute pair except those named in `excluded` (case-insensitive).
pub fn attributes_except(fragment: &str, excluded: &[&str]) -> Vec<Attribute> {
    attributes(fragment)
        .into_iter()
        .filter(|a| !excluded.iter().any(|e| a.key.eq_ignore_ascii_case(e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_double_and_single_quotes() {
        let fragment = r#" name="getUsers" datasource='main' "#;
        assert_eq!(attr(fragment, "name").as_deref(), Some("getUsers"));
        assert_eq!(attr(fragment, "datasource").as_deref(), Some("main"));
    }

    #[test]
    fn test_case_insensitive_key() {
        assert_eq!(attr(r#"ReturnType="string""#, "returntype").as_deref(), Some("string"));
    }

    #[test]
    fn test_key_inside_another_key_or_value() {
        let fragment = r#"datasource="name" username="bob" name="real""#;
        assert_eq!(attr(fragment, "name").as_deref(), Some("real"));
    }

    #[test]
    fn test_missing_and_empty() {
        assert_eq!(attr(r#"name="x""#, "access"), None);
        assert_eq!(attr(r#"name="""#, "name").as_deref(), Some(""));
        assert_eq!(attr("", "name"), None);
    }

    #[test]
    fn test_whitespace_around_equals() {
        assert_eq!(attr("name = \"spaced\"", "name").as_deref(), Some("spaced"));
    }

    #[test]
    fn test_attributes_in_order() {
        let attrs = attributes(r##"component="User" method="save" argumentcollection="#form#""##);
        let keys: Vec<&str> = attrs.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["component", "method", "argumentcollection"]);
        assert_eq!(attrs[2].value, "#form#");
    }

    #[test]
    fn test_attributes_except() {
        let attrs = attributes_except(r#"template="nav.cfm" Name="nav" active="home""#, &["template", "name"]);
        assert_eq!(
            attrs,
            vec![Attribute {
                key: "active".to_string(),
                value: "home".to_string()
            }]
        );
    }

    proptest! {
        #[test]
        fn attr_never_panics(fragment in ".*", name in "[a-z]{0,8}") {
            let _ = attr(&fragment, &name);
        }

        #[test]
        fn attr_finds_value_regardless_of_case(
            key in "[a-z][a-z0-9_]{0,10}",
            value in "[^\"]{0,20}",
            upper in any::<bool>(),
        ) {
            let fragment = format!(r#" other="x" {key}="{value}" "#);
            let lookup = if upper { key.to_ascii_uppercase() } else { key.clone() };
            let expected = if key == "other" { "x".to_string() } else { value };
            prop_assert_eq!(attr(&fragment, &lookup), Some(expected));
        }
    }
}
