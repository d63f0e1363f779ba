use hsts_preload::hsts::{
    check_header_string, check_removable_header_string, parse_header_string, MINIMUM_MAX_AGE,
};

#[test]
fn test_canonical_form_round_trips() {
    for raw in [
        "max-age=31536000; includeSubDomains; preload",
        "max-age=10886400; includeSubDomains",
        "max-age=0",
        "preload",
    ] {
        let (header, issues) = parse_header_string(raw);
        assert!(issues.is_empty(), "{}: {:?}", raw, issues);

        let (reparsed, issues) = parse_header_string(&header.to_string());
        assert!(issues.is_empty());
        assert_eq!(reparsed, header);
    }
}

#[test]
fn test_directive_order_does_not_matter() {
    let orders = [
        "max-age=31536000; includeSubDomains; preload",
        "max-age=31536000; preload; includeSubDomains",
        "includeSubDomains; max-age=31536000; preload",
        "includeSubDomains; preload; max-age=31536000",
        "preload; max-age=31536000; includeSubDomains",
        "preload; includeSubDomains; max-age=31536000",
    ];
    let (expected, _) = parse_header_string(orders[0]);
    for raw in orders {
        let (header, issues) = parse_header_string(raw);
        assert_eq!(header, expected, "{}", raw);
        assert!(issues.is_empty(), "{}", raw);
    }
}

#[test]
fn test_repeated_directives_warn_once() {
    for k in 2..5 {
        let raw = vec!["preload"; k].join("; ");
        let (header, issues) = parse_header_string(&raw);
        assert!(header.preload());
        assert_eq!(issues.warning_codes(), vec!["header.parse.repeated.preload"]);

        let raw = vec!["includeSubDomains"; k].join("; ");
        let (_, issues) = parse_header_string(&raw);
        assert_eq!(
            issues.warning_codes(),
            vec!["header.parse.repeated.include_sub_domains"]
        );
    }
}

#[test]
fn test_first_max_age_wins() {
    let (header, issues) = parse_header_string("max-age=100; max-age=200");
    assert_eq!(header.max_age(), Some(100));
    assert_eq!(issues.warning_codes(), vec!["header.parse.repeated.max_age"]);
}

#[test]
fn test_empty_segments_warn_once() {
    let (header, issues) = parse_header_string(";;;preload;;");
    assert!(header.preload());
    assert!(!issues.has_errors());
    assert_eq!(issues.warning_codes(), vec!["header.parse.empty_directive"]);
}

#[test]
fn test_every_unknown_directive_is_reported() {
    let (_, issues) = parse_header_string("foo; bar; foo");
    assert_eq!(
        issues.warning_codes(),
        vec![
            "header.parse.unknown_directive",
            "header.parse.unknown_directive",
            "header.parse.unknown_directive",
        ]
    );
    assert!(issues.warnings[0].message.contains("`foo`"));
    assert!(issues.warnings[1].message.contains("`bar`"));
}

#[test]
fn test_directives_with_extra_characters_are_ignored() {
    let (header, issues) = parse_header_string("preloaded; includeSubDomainsX");
    assert!(!header.preload());
    assert!(!header.include_sub_domains());
    assert_eq!(
        issues.warning_codes(),
        vec![
            "header.parse.invalid.preload",
            "header.parse.invalid.include_sub_domains",
        ]
    );
}

#[test]
fn test_signed_max_age_is_a_syntax_error() {
    for raw in ["max-age=-101", "max-age=+101"] {
        let (header, issues) = parse_header_string(raw);
        assert_eq!(header.max_age(), None);
        assert_eq!(
            issues.error_codes(),
            vec!["header.parse.max_age.non_digit_characters"],
            "{}",
            raw
        );
    }
}

#[test]
fn test_empty_header() {
    let issues = check_header_string("");
    assert_eq!(
        issues.error_codes(),
        vec![
            "header.preloadable.include_sub_domains.missing",
            "header.preloadable.preload.missing",
            "header.preloadable.max_age.missing",
        ]
    );
    assert_eq!(issues.warning_codes(), vec!["header.parse.empty"]);
}

#[test]
fn test_minimum_max_age_is_clean() {
    let issues = check_header_string("includeSubDomains; preload; max-age=10886400");
    assert!(issues.is_empty(), "{:?}", issues);
    assert_eq!(MINIMUM_MAX_AGE, 10886400);
}

#[test]
fn test_zero_max_age_is_too_low() {
    let issues = check_header_string("includeSubDomains; preload; max-age=0");
    assert_eq!(
        issues.error_codes(),
        vec!["header.preloadable.max_age.too_low"]
    );
    assert!(issues.errors[0].message.contains("10886400"));
    assert!(issues.errors[0].message.contains("max-age=0"));
}

#[test]
fn test_one_below_minimum() {
    let issues = check_header_string("includeSubDomains; preload; max-age=10886399");
    assert_eq!(
        issues.error_codes(),
        vec!["header.preloadable.max_age.too_low"]
    );
}

#[test]
fn test_over_ten_years_is_a_warning() {
    let issues = check_header_string("max-age=315360001; includeSubDomains; preload");
    assert!(!issues.has_errors());
    assert_eq!(
        issues.warning_codes(),
        vec!["header.preloadable.max_age.over_10_years"]
    );
}

#[test]
fn test_misspelled_include_sub_domains() {
    let issues = check_header_string("max-age=31536000; includesubdomains; preload");
    assert!(!issues.has_errors());
    assert_eq!(
        issues.warning_codes(),
        vec!["header.parse.spelling.include_sub_domains"]
    );
}

#[test]
fn test_removal_header() {
    assert!(check_removable_header_string("max-age=0").is_empty());
    assert!(check_removable_header_string("max-age=31536000; includeSubDomains").is_empty());

    let issues = check_removable_header_string("max-age=31536000; preload; bogus");
    assert_eq!(issues.error_codes(), vec!["header.removable.contains.preload"]);
    assert!(issues.warnings.is_empty());
}
