// Domain module tests.

use super::*;

fn test_extractor() -> TldExtractor {
    TldExtractor::new(tldextract::TldOption::default())
}

#[test]
fn test_registrable_domain_basic() {
    let extractor = test_extractor();
    assert_eq!(
        registrable_domain(&extractor, "www.example.com").unwrap(),
        "example.com"
    );
}

#[test]
fn test_registrable_domain_multiple_subdomains() {
    let extractor = test_extractor();
    assert_eq!(
        registrable_domain(&extractor, "a.b.c.example.com").unwrap(),
        "example.com"
    );
}

#[test]
fn test_registrable_domain_multi_part_suffix() {
    let extractor = test_extractor();
    assert_eq!(
        registrable_domain(&extractor, "shop.example.co.uk").unwrap(),
        "example.co.uk"
    );
}

#[test]
fn test_registrable_domain_of_itself() {
    let extractor = test_extractor();
    assert_eq!(
        registrable_domain(&extractor, "example.com").unwrap(),
        "example.com"
    );
}

#[test]
fn test_bare_suffix_is_not_classifiable() {
    let extractor = test_extractor();
    let err = registrable_domain(&extractor, "com").unwrap_err();
    assert!(matches!(err, ResolutionError::DomainClassificationError(_)));
}

#[test]
fn test_ip_address_is_not_classifiable() {
    let extractor = test_extractor();
    assert!(matches!(
        registrable_domain(&extractor, "192.0.2.1"),
        Err(ResolutionError::DomainClassificationError(_))
    ));
    assert!(matches!(
        registrable_domain(&extractor, "2001:db8::1"),
        Err(ResolutionError::DomainClassificationError(_))
    ));
}

#[test]
fn test_classify_strips_trailing_dot() {
    let extractor = test_extractor();
    let classification = classify(&extractor, "www.example.com.").unwrap();
    assert_eq!(classification.hostname, "www.example.com");
    assert_eq!(classification.registrable_domain, "example.com");
    assert!(!classification.is_registrable());
}

#[test]
fn test_classify_converts_unicode_to_ascii() {
    let extractor = test_extractor();
    let classification = classify(&extractor, "www.bücher.de").unwrap();
    assert_eq!(classification.registrable_domain, "xn--bcher-kva.de");
    assert_eq!(classification.hostname, "www.xn--bcher-kva.de");
}

#[test]
fn test_to_ascii_keeps_ascii_names() {
    assert_eq!(to_ascii("example.com").unwrap(), "example.com");
    assert_eq!(to_ascii("_acme.example.com").unwrap(), "_acme.example.com");
}

#[test]
fn test_to_ascii_rejects_malformed_names() {
    assert!(matches!(
        to_ascii("exa mple.com"),
        Err(ResolutionError::EncodingError { .. })
    ));
    assert!(matches!(
        to_ascii(""),
        Err(ResolutionError::EncodingError { .. })
    ));
}

#[test]
fn test_intermediate_names_most_specific_first() {
    assert_eq!(
        intermediate_names("a.b.c.example.com", "example.com"),
        vec!["b.c.example.com", "c.example.com"]
    );
}

#[test]
fn test_intermediate_names_single_label_subdomain() {
    assert!(intermediate_names("www.example.com", "example.com").is_empty());
}

#[test]
fn test_intermediate_names_for_registrable_domain() {
    assert!(intermediate_names("example.com", "example.com").is_empty());
}

#[test]
fn test_intermediate_names_requires_label_boundary() {
    // "badexample.com" is not below "example.com"
    assert!(intermediate_names("x.badexample.com", "example.com").is_empty());
}

#[test]
fn test_private_suffix_is_its_own_registry() {
    let extractor = test_extractor();
    assert_eq!(
        registrable_domain(&extractor, "foo.github.io").unwrap(),
        "foo.github.io"
    );
    assert_eq!(
        registrable_domain(&extractor, "a.b.blogspot.com").unwrap(),
        "b.blogspot.com"
    );

    let classification = classify(&extractor, "www.foo.github.io").unwrap();
    assert_eq!(classification.registrable_domain, "foo.github.io");
    assert!(intermediate_names(&classification.hostname, "foo.github.io").is_empty());
}

#[test]
fn test_private_wildcard_suffix() {
    let extractor = test_extractor();
    assert_eq!(
        registrable_domain(&extractor, "ec2-192-0-2-1.eu-west-1.compute.amazonaws.com").unwrap(),
        "ec2-192-0-2-1.eu-west-1.compute.amazonaws.com"
    );
}

#[test]
fn test_bare_private_suffix_is_not_classifiable() {
    let extractor = test_extractor();
    let err = registrable_domain(&extractor, "github.io").unwrap_err();
    assert!(matches!(err, ResolutionError::DomainClassificationError(_)));
}

#[test]
fn test_suffix_rules_exception_beats_wildcard() {
    let rules = private::SuffixRules::parse("// comment\n\n*.ck\n!www.ck\nmaps.example\n");
    assert_eq!(rules.suffix_labels("a.b.ck"), Some(2));
    assert_eq!(rules.suffix_labels("shop.www.ck"), Some(1));
    assert_eq!(rules.suffix_labels("x.maps.example"), Some(2));
    assert_eq!(rules.suffix_labels("example"), None);
}
