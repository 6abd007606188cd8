use arex_config::config::{PropertyError, PropertyStore};

fn store(pairs: &[(&str, &str)]) -> PropertyStore {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn test_raw_string_lookup() {
    let props = store(&[("arex.service.name", "checkout"), ("empty", "")]);

    assert_eq!(props.get_string("arex.service.name"), Some("checkout"));
    assert_eq!(props.get_string("missing"), None);
    // Raw lookups do not treat empty as absent
    assert_eq!(props.get_string("empty"), Some(""));

    assert_eq!(props.get_string_or("missing", "fallback"), "fallback");
    assert_eq!(props.get_string_or("arex.service.name", "fallback"), "checkout");
}

#[test]
fn test_absent_or_blank_values_fall_back() {
    let props = store(&[("empty", ""), ("spaces", "   "), ("tabs", "\t\n ")]);

    for key in ["missing", "empty", "spaces", "tabs"] {
        assert!(props.get_bool(key, true), "{} should fall back", key);
        assert!(!props.get_bool(key, false), "{} should fall back", key);
        assert_eq!(props.get_int(key, 7), 7, "{} should fall back", key);
        assert_eq!(props.get_long(key, -9), -9, "{} should fall back", key);
        assert_eq!(props.get_double(key, 2.5), 2.5, "{} should fall back", key);
    }
}

#[test]
fn test_malformed_values_fall_back() {
    let props = store(&[
        ("flag", "yes"),
        ("count", "12abc"),
        ("big", "99999999999"),
        ("ratio", "one half"),
        ("padded", " 42"),
    ]);

    assert!(props.get_bool("flag", true));
    assert!(!props.get_bool("flag", false));
    assert_eq!(props.get_int("count", 3), 3);
    // Fits in i64 but overflows i32
    assert_eq!(props.get_int("big", 1), 1);
    assert_eq!(props.get_long("big", 1), 99_999_999_999);
    assert_eq!(props.get_double("ratio", 0.25), 0.25);
    // Surrounding whitespace is not stripped before parsing
    assert_eq!(props.get_int("padded", 0), 0);
}

#[test]
fn test_valid_values_override_default() {
    let props = store(&[
        ("on", "true"),
        ("off", "FALSE"),
        ("mixed", "True"),
        ("int", "-17"),
        ("long", "9000000000"),
        ("double", "0.125"),
        ("double_int", "3"),
    ]);

    assert!(props.get_bool("on", false));
    assert!(!props.get_bool("off", true));
    assert!(props.get_bool("mixed", false));
    assert_eq!(props.get_int("int", 0), -17);
    assert_eq!(props.get_long("long", 0), 9_000_000_000);
    assert_eq!(props.get_double("double", 1.0), 0.125);
    assert_eq!(props.get_double("double_int", 1.0), 3.0);
}

#[test]
fn test_typed_lookup_reports_cause() {
    let props = store(&[("blank", "  "), ("bad", "x1")]);

    assert_eq!(
        props.typed::<i32>("nope"),
        Err(PropertyError::Missing("nope".to_string()))
    );
    assert_eq!(
        props.typed::<i32>("blank"),
        Err(PropertyError::Blank("blank".to_string()))
    );
    assert_eq!(
        props.typed::<i32>("bad"),
        Err(PropertyError::Malformed {
            key: "bad".to_string(),
            value: "x1".to_string()
        })
    );

    let err = props.typed::<i64>("bad").unwrap_err();
    assert_eq!(err.to_string(), "property `bad` has malformed value `x1`");
}

#[test]
fn test_lookups_are_repeatable() {
    let props = store(&[("n", "5"), ("s", "v")]);

    assert_eq!(props.get_string("s"), props.get_string("s"));
    assert_eq!(props.get_int("n", 0), props.get_int("n", 0));
    assert_eq!(props.len(), 2);
    assert!(!props.is_empty());
}

#[test]
fn test_bool_and_double_parsing_edges() {
    let props = store(&[
        ("yes", "yes"),
        ("padded_bool", " true"),
        ("suffixed", "1.5d"),
        ("padded_double", " 1.5"),
        ("infinite", "inf"),
        ("not_a_number", "NaN"),
    ]);

    // Unrecognised booleans keep whatever default the caller passed
    assert!(props.get_bool("yes", true));
    assert!(!props.get_bool("yes", false));
    assert!(props.get_bool("padded_bool", true));
    assert!(!props.get_bool("padded_bool", false));

    assert_eq!(props.get_double("suffixed", -1.0), -1.0);
    assert_eq!(props.get_double("padded_double", -1.0), -1.0);
    assert_eq!(props.get_double("infinite", 0.0), f64::INFINITY);
    assert!(props.get_double("not_a_number", 0.0).is_nan());
}
