//! Integration tests for rhtmx-urit templates
//!
//! Tests are organized by feature area:
//! - Matching (named, positional, multi-variable, options)
//! - Generation
//! - Composition (`sub`)
//! - Resolution (`resolve_to`)
//! - Introspection (`template`, `vars`)

use pretty_assertions::assert_eq;
use rhtmx_urit::*;
use uuid::Uuid;

/// Var option that takes over any variable declared as `{name:uuid4}`
struct Uuid4;

impl VarMatchOption for Uuid4 {
    fn applicable(&self, candidate: &VarCandidate<'_>) -> bool {
        candidate.regex_source == "uuid4"
    }

    fn matches(&self, candidate: &VarCandidate<'_>) -> Option<String> {
        Uuid::parse_str(candidate.value)
            .ok()
            .filter(|id| id.get_version_num() == 4)
            .map(|id| id.to_string())
    }
}

/// Fixed option that accepts literals in the first segment only
struct FirstSegmentOnly;

impl FixedMatchOption for FirstSegmentOnly {
    fn matches(&self, value: &str, expected: &str, path_pos: usize, _: &PathVars) -> bool {
        path_pos == 0 && value == expected
    }
}

/// Var option that declines every value of `a`
struct DeclineA;

impl VarMatchOption for DeclineA {
    fn applicable(&self, candidate: &VarCandidate<'_>) -> bool {
        candidate.name == "a"
    }

    fn matches(&self, _: &VarCandidate<'_>) -> Option<String> {
        None
    }
}

// ============================================================================
// Matching
// ============================================================================

#[test]
fn test_match_named() {
    let template = Template::new("/foo/{foo}/bar/{bar:[a-z]+}").unwrap();

    let vars = template.matches("/foo/fooey/bar/abc").unwrap();
    assert_eq!(vars.len(), 2);
    assert_eq!(vars.vars_type(), VarsType::Names);
    assert_eq!(vars.get("foo"), Some("fooey"));
    assert_eq!(vars.get(1), Some("abc"));

    assert!(template.matches("/foo/fooey/bar/123").is_none());
    assert!(template.matches("/foo/fooey/baz/abc").is_none());
}

#[test]
fn test_match_segment_count_must_agree() {
    let template = Template::new("/foo/{foo}").unwrap();
    assert!(template.matches("/foo").is_none());
    assert!(template.matches("/foo/a/b").is_none());
    assert!(template.matches("/foo/a/").is_some());
    assert!(template.matches("/foo//a").is_none());
}

#[test]
fn test_match_positional() {
    let template = Template::new("/foo/?/bar/?/?").unwrap();
    let vars = template.matches("/foo/fooey/bar/aaa/bbb").unwrap();
    assert_eq!(vars.vars_type(), VarsType::Positions);
    assert_eq!(vars.len(), 3);
    assert_eq!(vars.get_positional(0), Some("fooey"));
    assert_eq!(vars.get_positional(-1), Some("bbb"));
}

#[test]
fn test_match_full_url() {
    let template = Template::new("/foo/?/bar/?/?").unwrap();
    let vars = template.matches("https://my.org/foo/fooey/bar/aaa/bbb").unwrap();
    assert_eq!(vars.get(0), Some("fooey"));
    assert_eq!(vars.get(2), Some("bbb"));

    let url = url::Url::parse("https://my.org/foo/fooey/bar/aaa/bbb?q=1").unwrap();
    assert!(template.matches_url(&url).is_some());
}

#[test]
fn test_match_request() {
    let template = Template::new("/users/{id:[0-9]+}").unwrap();
    let request = http::Request::builder()
        .uri("https://example.com/users/42?tab=posts")
        .body(())
        .unwrap();
    let vars = template.matches_request(&request).unwrap();
    assert_eq!(vars.get("id"), Some("42"));
}

#[test]
fn test_match_multi_var_segment() {
    let template = Template::new("/--{a:[a-z]+}-{b:[0-9]+}--").unwrap();

    let vars = template.matches("/--abc-123--").unwrap();
    assert_eq!(vars.get("a"), Some("abc"));
    assert_eq!(vars.get("b"), Some("123"));

    assert!(template.matches("/--abc+123--").is_none());
}

#[test]
fn test_match_repeated_name() {
    let template = Template::new("/foo/{foo1}-{foo2}/bar/{bar}-{bar}").unwrap();
    let vars = template.matches("/foo/a-b/bar/c-d").unwrap();
    assert_eq!(vars.get("bar"), Some("c"));
    assert_eq!(vars.get(("bar", 1)), Some("d"));
    assert_eq!(vars.get(("bar", -1)), Some("d"));
    assert_eq!(vars.get_named_last("bar"), Some("d"));
}

#[test]
fn test_match_quoted_literal() {
    let template = Template::new(r#"/files/"a/b"/{name}"#).unwrap();
    assert_eq!(template.parts().len(), 3);
    let vars = template.matches("/files/a/b/readme");
    // the literal is one segment, so a path that splits it never matches
    assert!(vars.is_none());
}

#[test]
fn test_case_insensitive_at_construction() {
    let template =
        Template::with_options("/foo/?/bar", &[MatchOption::case_insensitive_fixed()]).unwrap();
    let vars = template.matches("Foo/123/Bar").unwrap();
    assert_eq!(vars.get(0), Some("123"));
}

#[test]
fn test_case_insensitive_per_call() {
    let template = Template::new("/foo/?/bar").unwrap();
    assert!(template.matches("Foo/123/Bar").is_none());

    let vars = template
        .matches_with("Foo/123/Bar", &[MatchOption::case_insensitive_fixed()])
        .unwrap();
    assert_eq!(vars.get(0), Some("123"));
}

#[test]
fn test_fixed_option_decides_over_exact_literal() {
    let template =
        Template::with_options("/foo/bar", &[MatchOption::fixed(FirstSegmentOnly)]).unwrap();
    assert!(template.matches("/foo/bar").is_none());
    assert!(Template::new("/foo/bar").unwrap().matches("/foo/bar").is_some());

    let template = Template::new("/foo/{id}").unwrap();
    assert!(template
        .matches_with("/foo/1", &[MatchOption::fixed(FirstSegmentOnly)])
        .is_some());
}

#[test]
fn test_composite_value_declined_by_option() {
    let template = Template::with_options("/--{a}-{b}--", &[MatchOption::var(DeclineA)]).unwrap();
    let vars = template.matches("/--x-y--").unwrap();
    assert_eq!(vars.len(), 1);
    assert_eq!(vars.get("a"), None);
    assert_eq!(vars.get("b"), Some("y"));

    assert!(template.matches("/--x-y").is_none());
}

#[test]
fn test_var_option_overrides_pattern() {
    let uuid4 = MatchOption::var(Uuid4);
    let template = Template::with_options("/foo/{id:uuid4}", &[uuid4]).unwrap();

    let id = Uuid::new_v4();
    let vars = template.matches(&format!("/foo/{}", id)).unwrap();
    assert_eq!(vars.get("id"), Some(id.to_string().as_str()));

    // the option is applicable, so its rejection stands even though the
    // literal pattern would have matched
    assert!(template.matches("/foo/uuid4").is_none());
    assert!(template.matches("/foo/not-a-uuid").is_none());
}

#[test]
fn test_var_option_with_constrained_neighbour() {
    let template =
        Template::with_options("/foo/{id1:uuid4}/bar/{id2:[0-9]*}", &[MatchOption::var(Uuid4)])
            .unwrap();
    let id = Uuid::new_v4();

    let vars = template.matches(&format!("foo/{}/bar/123", id)).unwrap();
    assert_eq!(vars.get("id1"), Some(id.to_string().as_str()));
    assert_eq!(vars.get("id2"), Some("123"));

    assert!(template.matches(&format!("foo/{}/bar/abc", id)).is_none());
}

#[test]
fn test_var_option_not_applicable_falls_back_to_pattern() {
    let template = Template::with_options("/foo/{id:[0-9]+}", &[MatchOption::var(Uuid4)]).unwrap();
    assert!(template.matches("/foo/123").is_some());
    assert!(template.matches("/foo/abc").is_none());
}

#[test]
fn test_match_does_not_modify_template() {
    let template = Template::new("/foo/{foo}").unwrap();
    let first = template.matches("/foo/a").unwrap();
    let second = template.matches("/foo/b").unwrap();
    assert_eq!(first.get("foo"), Some("a"));
    assert_eq!(second.get("foo"), Some("b"));
    assert_eq!(template.source(), "/foo/{foo}");
}

// ============================================================================
// Generation
// ============================================================================

#[test]
fn test_path_from_named() {
    let template = Template::new("/foo/{foo}/bar/{bar}-{bar}").unwrap();
    let path = template
        .path_from(&PathVars::named(&["foo", "a", "bar", "b", "bar", "c"]))
        .unwrap();
    assert_eq!(path, "/foo/a/bar/b-c");
}

#[test]
fn test_path_from_named_errors() {
    let template = Template::new("/foo/{foo}/bar/{bar}-{bar}").unwrap();

    let err = template.path_from(&PathVars::named(&["foo", "a"])).unwrap_err();
    assert_eq!(err.to_string(), "no var for 'bar'");

    let err = template
        .path_from(&PathVars::named(&["foo", "a", "bar", "b"]))
        .unwrap_err();
    assert_eq!(err.to_string(), "no var for 'bar' (varPosition 2)");
}

#[test]
fn test_path_from_positional_errors() {
    let template = Template::new("/foo/?/bar/?/?").unwrap();
    for (values, expected) in [
        (vec!["a", "b"], "no var for varPosition 3"),
        (vec!["a"], "no var for varPosition 2"),
        (vec![], "no var for varPosition 1"),
    ] {
        let err = template.path_from(&PathVars::positional(values)).unwrap_err();
        assert_eq!(err.to_string(), expected);
    }
}

#[test]
fn test_path_from_regex_check() {
    let template = Template::new("/foo/{foo-id:[a-z]{3}}").unwrap();
    let vars = PathVars::named(&["foo-id", "1"]);

    assert_eq!(template.path_from(&vars).unwrap(), "/foo/1");

    let err = template
        .path_from_with(&vars, &PathFromOptions::new().with_regex_check())
        .unwrap_err();
    assert_eq!(err, GenerationError::NoMatch { name: "foo-id".into() });
}

#[test]
fn test_path_from_round_trip() {
    let template = Template::new("/foo/{foo:[a-z]+}/bar/--{a}-{b:[0-9]+}--").unwrap();
    let vars = template.matches("/foo/fooey/bar/--xx-12--").unwrap();
    let path = template.path_from(&vars).unwrap();
    assert_eq!(path, "/foo/fooey/bar/--xx-12--");
    assert_eq!(template.matches(&path).unwrap(), vars);
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn test_sub_joins_templates() {
    let template = Template::new("/foo/{foo}").unwrap();
    let sub = template.sub("{bar}").unwrap();
    assert_eq!(sub.source(), "/foo/{foo}/{bar}");
    assert_eq!(sub.named_count(), 2);

    let vars = sub.matches("/foo/a/b").unwrap();
    assert_eq!(vars.get("bar"), Some("b"));

    // the receiver is unchanged
    assert_eq!(template.source(), "/foo/{foo}");
    assert_eq!(template.parts().len(), 2);
}

#[test]
fn test_sub_trailing_slash() {
    let template = Template::new("/foo/{foo}/").unwrap();
    let sub = template.sub("{bar}-{baz}/qux").unwrap();
    assert_eq!(sub.source(), "/foo/{foo}/{bar}-{baz}/qux");
    assert_eq!(sub.parts().len(), 4);
}

#[test]
fn test_sub_errors() {
    let template = Template::new("/foo/{foo}").unwrap();

    let err = template.sub("///").unwrap_err();
    assert_eq!(err.to_string(), "path parts cannot be empty");

    let err = template.sub("?").unwrap_err();
    assert_eq!(err.kind(), ParseErrorKind::MixedVarKinds);

    let err = Template::new("/foo/?/").unwrap().sub("{foo}").unwrap_err();
    assert_eq!(err.kind(), ParseErrorKind::MixedVarKinds);
}

#[test]
fn test_sub_keeps_options() {
    let template =
        Template::with_options("/foo", &[MatchOption::case_insensitive_fixed()]).unwrap();
    let sub = template.sub("bar").unwrap();
    assert_eq!(sub.options().fixed_count(), 1);
    assert!(sub.matches("/FOO/BAR").is_some());
}

// ============================================================================
// Resolution
// ============================================================================

const RESOLVE_TEMPLATE: &str = "/foo/{foo:[a-z]*}/bar/--{bar: [a-zA-Z]*}-{bar: [0-9]*}--";

#[test]
fn test_resolve_named_partially() {
    let template = Template::new(RESOLVE_TEMPLATE).unwrap();

    let resolved = template
        .resolve_to(&PathVars::named(&["foo", "fooey", "bar", "abc"]))
        .unwrap();
    assert_eq!(resolved.source(), "/foo/fooey/bar/--abc-{bar:[0-9]*}--");
    assert_eq!(resolved.named_count(), 1);
    assert_eq!(resolved.parts()[3].composite().unwrap().pieces().len(), 5);

    let resolved = template
        .resolve_to(&PathVars::named(&["bar", "abc"]))
        .unwrap();
    assert_eq!(resolved.source(), "/foo/{foo:[a-z]*}/bar/--abc-{bar:[0-9]*}--");
    assert_eq!(resolved.named_count(), 2);
}

#[test]
fn test_resolve_named_fully() {
    let template = Template::new(RESOLVE_TEMPLATE).unwrap();
    let resolved = template
        .resolve_to(&PathVars::named(&["foo", "fooey", "bar", "abc", "bar", "345"]))
        .unwrap();
    assert_eq!(resolved.source(), "/foo/fooey/bar/--abc-345--");
    assert_eq!(resolved.named_count(), 0);
    assert!(resolved.parts().iter().all(PathPart::is_fixed));
    assert!(resolved.matches("/foo/fooey/bar/--abc-345--").is_some());
}

#[test]
fn test_resolve_positional() {
    let template = Template::new("/foo/?/bar/?/baz/?").unwrap();
    let cases: [(&[&str], &str, usize); 4] = [
        (&[], "/foo/?/bar/?/baz/?", 3),
        (&["fooey"], "/foo/fooey/bar/?/baz/?", 2),
        (&["fooey", "barey"], "/foo/fooey/bar/barey/baz/?", 1),
        (&["fooey", "barey", "bazey"], "/foo/fooey/bar/barey/baz/bazey", 0),
    ];
    for (values, source, remaining) in cases {
        let resolved = template
            .resolve_to(&PathVars::positional(values.iter().copied()))
            .unwrap();
        assert_eq!(resolved.source(), source);
        assert_eq!(resolved.positional_count(), remaining);
    }
}

#[test]
fn test_resolve_without_matching_names() {
    let template = Template::new(RESOLVE_TEMPLATE).unwrap();
    let resolved = template.resolve_to(&PathVars::named(&["other", "x"])).unwrap();
    assert_eq!(resolved.template(true), template.template(true));
    assert_eq!(resolved.named_count(), template.named_count());
}

#[test]
fn test_resolve_is_idempotent() {
    let template = Template::new(RESOLVE_TEMPLATE).unwrap();
    let vars = PathVars::named(&["foo", "fooey"]);
    let once = template.resolve_to(&vars).unwrap();
    let twice = once.resolve_to(&PathVars::default()).unwrap();
    assert_eq!(once.template(true), twice.template(true));
    assert_eq!(once.source(), twice.source());
}

// ============================================================================
// Introspection
// ============================================================================

#[test]
fn test_template_strip_regex() {
    let template =
        Template::new("/foo/{fooA: [a-z]*}-{fooB: [a-z]*}/bar/{barA}-{barB}").unwrap();
    assert_eq!(template.template(true), "/foo/{fooA}-{fooB}/bar/{barA}-{barB}");
    assert_eq!(
        template.template(false),
        "/foo/{fooA: [a-z]*}-{fooB: [a-z]*}/bar/{barA}-{barB}"
    );
    assert_eq!(Template::new("/").unwrap().template(true), "/");
}

#[test]
fn test_vars_named() {
    let template = Template::new("/foo/{foo1}-{foo2}/bar/{bar}-{bar}").unwrap();
    let vars = template.vars();
    assert_eq!(vars.len(), 4);

    let positions: Vec<usize> = vars.iter().map(|v| v.position).collect();
    assert_eq!(positions, vec![0, 1, 2, 3]);

    assert_eq!(vars[2].name, "bar");
    assert_eq!(vars[2].named_position, 0);
    assert_eq!(vars[3].name, "bar");
    assert_eq!(vars[3].named_position, 1);
    assert!(vars.iter().all(|v| v.value.is_empty()));
}

#[test]
fn test_vars_positional() {
    let template = Template::new("foo/?/bar/?").unwrap();
    let vars = template.vars();
    assert_eq!(vars.len(), 2);
    assert_eq!(vars[0].position, 0);
    assert_eq!(vars[1].position, 1);
    assert!(vars.iter().all(|v| v.name.is_empty()));
}
