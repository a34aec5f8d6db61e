use super::*;

#[test]
fn plain_lines_pass_through_unchanged_and_in_order() {
    let input = "first line\nsecond line\n  indented\nlast";
    assert_eq!(
        transform(input),
        vec!["first line", "second line", "  indented", "last"]
    );
}

#[test]
fn empty_and_newline_only_inputs_produce_nothing() {
    assert!(transform("").is_empty());
    assert!(transform("\n\n").is_empty());
}

#[test]
fn whitespace_only_lines_are_not_treated_as_blank() {
    assert_eq!(transform("a\n   \nb"), vec!["a", "   ", "b"]);
}

#[test]
fn converts_single_image_tag() {
    assert_eq!(
        transform("![alt text](http://example.com/img.png)"),
        vec!["<img src=\"http://example.com/img.png\" alt=\"alt text\" width=\"300\"><br/>\n"]
    );
}

#[test]
fn mixed_input_keeps_order_and_newline_asymmetry() {
    assert_eq!(
        transform("Hello\n![a](http://x/y.png)"),
        vec![
            "Hello".to_string(),
            "<img src=\"http://x/y.png\" alt=\"a\" width=\"300\"><br/>\n".to_string(),
        ]
    );
}

#[test]
fn blank_lines_between_images_are_dropped() {
    let output = transform("![a](1.png)\n\n\n![b](2.png)\n");
    assert_eq!(output.len(), 2);
    assert!(output[0].contains("src=\"1.png\""));
    assert!(output[1].contains("src=\"2.png\""));
}

#[test]
fn empty_alt_and_url_are_accepted() {
    assert_eq!(
        transform("![]()"),
        vec!["<img src=\"\" alt=\"\" width=\"300\"><br/>\n"]
    );
}

#[test]
fn text_after_closing_paren_is_discarded() {
    assert_eq!(
        transform("![cat](cat.png \"a title\") trailing words"),
        vec!["<img src=\"cat.png \"a title\"\" alt=\"cat\" width=\"300\"><br/>\n"]
    );
    assert_eq!(
        transform("![cat](cat.png) trailing words"),
        vec!["<img src=\"cat.png\" alt=\"cat\" width=\"300\"><br/>\n"]
    );
}

#[test]
fn splits_on_first_separator_only() {
    match classify("![a](b](c)") {
        LineKind::Image(directive) => {
            assert_eq!(directive.alt, "a");
            assert_eq!(directive.url, "b](c");
        }
        other => panic!("expected image directive, got {other:?}"),
    }
}

#[test]
fn later_prefix_occurrences_are_left_alone() {
    match classify("![x ![y](u.png)") {
        LineKind::Image(directive) => {
            assert_eq!(directive.alt, "x ![y");
            assert_eq!(directive.url, "u.png");
        }
        other => panic!("expected image directive, got {other:?}"),
    }
}

#[test]
fn special_characters_are_not_escaped() {
    let output = transform("![<b>\"q\"</b>](javascript:alert('x'))");
    assert_eq!(
        output,
        vec!["<img src=\"javascript:alert('x'\" alt=\"<b>\"q\"</b>\" width=\"300\"><br/>\n"]
    );
}

#[test]
fn prefix_must_be_at_line_start() {
    assert_eq!(classify(" ![a](b.png)"), LineKind::Passthrough);
    assert_eq!(classify("see ![a](b.png)"), LineKind::Passthrough);
}

#[test]
fn classifies_missing_separator_as_malformed() {
    assert_eq!(
        classify("![no separator here"),
        LineKind::Malformed(MalformedReason::MissingAltUrlSeparator)
    );
}

#[test]
fn missing_closing_paren_takes_rest_of_line_as_url() {
    assert_eq!(
        classify("![alt](no-closing-paren.png"),
        LineKind::Image(ImageDirective {
            alt: "alt",
            url: "no-closing-paren.png",
        })
    );
    assert_eq!(
        transform("![a](b.png"),
        vec!["<img src=\"b.png\" alt=\"a\" width=\"300\"><br/>\n"]
    );
}

#[test]
fn malformed_line_passes_through_by_default_and_is_reported() {
    let report = transform_with("intro\n\n![broken\n![ok](ok.png)", MalformedPolicy::Passthrough);

    assert_eq!(report.lines.len(), 3);
    assert_eq!(report.lines[0], "intro");
    assert_eq!(report.lines[1], "![broken");
    assert!(report.lines[2].starts_with("<img src=\"ok.png\""));

    assert_eq!(
        report.malformed,
        vec![MalformedDirective {
            line_number: 3,
            line: "![broken".to_string(),
            reason: MalformedReason::MissingAltUrlSeparator,
        }]
    );
}

#[test]
fn skip_policy_omits_malformed_lines_only() {
    let report = transform_with(
        "![a](a.png)\n![b b.png\nplain",
        MalformedPolicy::Skip,
    );

    assert_eq!(report.lines.len(), 2);
    assert!(report.lines[0].contains("alt=\"a\""));
    assert_eq!(report.lines[1], "plain");
    assert_eq!(report.malformed.len(), 1);
    assert_eq!(report.malformed[0].line_number, 2);
    assert_eq!(
        report.malformed[0].reason,
        MalformedReason::MissingAltUrlSeparator
    );
}

#[test]
fn default_transform_matches_passthrough_policy() {
    let input = "![x\n![y](y.png)";
    assert_eq!(
        transform(input),
        transform_with(input, MalformedPolicy::Passthrough).lines
    );
}

#[test]
fn carriage_returns_are_kept_verbatim() {
    assert_eq!(transform("a\r\nb"), vec!["a\r", "b"]);
}

#[test]
fn report_serializes_lines_and_diagnostics() {
    let report = transform_with("![x", MalformedPolicy::Skip);
    let value = serde_json::to_value(&report).expect("json");
    assert_eq!(value["lines"], serde_json::json!([]));
    assert_eq!(value["malformed"][0]["line_number"], 1);
    assert_eq!(value["malformed"][0]["reason"], "missing_alt_url_separator");
}
