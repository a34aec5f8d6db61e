use converter::{transform, transform_with};
use shared::domain::MalformedPolicy;

const BLOG_POST: &str = "# Trip notes\n\
\n\
Day one was sunny.\n\
![Harbour at dawn](https://cdn.example.com/harbour.jpg)\n\
\n\
![Market stall](https://cdn.example.com/market.jpg \"Saturday market\")\n\
![draft image without url\n\
Back home.\n";

#[test]
fn converts_a_realistic_post() {
    let report = transform_with(BLOG_POST, MalformedPolicy::Passthrough);

    assert_eq!(
        report.lines,
        vec![
            "# Trip notes".to_string(),
            "Day one was sunny.".to_string(),
            "<img src=\"https://cdn.example.com/harbour.jpg\" alt=\"Harbour at dawn\" width=\"300\"><br/>\n"
                .to_string(),
            "<img src=\"https://cdn.example.com/market.jpg \"Saturday market\"\" alt=\"Market stall\" width=\"300\"><br/>\n"
                .to_string(),
            "![draft image without url".to_string(),
            "Back home.".to_string(),
        ]
    );
    assert_eq!(report.malformed.len(), 1);
    assert_eq!(report.malformed[0].line_number, 7);
}

#[test]
fn output_never_contains_empty_lines() {
    let inputs = ["", "\n", "a\n\nb", "\n\n![x](y)\n\n", "![\n\n"];
    for input in inputs {
        for policy in [MalformedPolicy::Passthrough, MalformedPolicy::Skip] {
            let report = transform_with(input, policy);
            assert!(
                report.lines.iter().all(|line| !line.is_empty()),
                "empty line in output for {input:?}"
            );
        }
    }
}

#[test]
fn transform_is_deterministic() {
    assert_eq!(transform(BLOG_POST), transform(BLOG_POST));
}

#[test]
fn unterminated_url_still_converts() {
    let report = transform_with("![a](b.png", MalformedPolicy::Skip);
    assert_eq!(
        report.lines,
        vec!["<img src=\"b.png\" alt=\"a\" width=\"300\"><br/>\n".to_string()]
    );
    assert!(report.malformed.is_empty());
    assert_eq!(transform("![a](b.png"), report.lines);
}
