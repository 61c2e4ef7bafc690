// User-facing error text. Editors match on these strings, so they are
// pinned with inline snapshots.

use insta::assert_snapshot;
use sharpscan::diagnostics::write_error;
use sharpscan::{ScanError, scan_source};

fn message(src: &str) -> String {
    scan_source(src).expect_err("source should fail to scan").to_string()
}

#[test]
fn unbalanced_braces() {
    assert_snapshot!(message("namespace N { class A {"), @"Reached EOF with missing close curly brackets.");
}

#[test]
fn unterminated_comment_reports_detection_line() {
    assert_snapshot!(message("class A { }\n/* never\nclosed"), @"Line: 3 - Unterminated comment");
}

#[test]
fn unterminated_string() {
    assert_snapshot!(message("class A { string s = \"open; }"), @"Line: 1 - Unterminated String");
}

#[test]
fn unterminated_verbatim_string_spanning_lines() {
    assert_snapshot!(message("var s = @\"one\ntwo\nthree"), @"Line: 3 - Unterminated String");
}

#[test]
fn unexpected_token() {
    assert_snapshot!(message("class A : B<int { }"), @"Line: 1 - Unexpected token: {");
}

#[test]
fn unexpected_eof_token() {
    assert_snapshot!(message("class A : B<int,"), @"Line: 1 - Unexpected token: EOF");
}

#[test]
fn extra_close_brace() {
    assert_snapshot!(message("class A { }\n\n}"), @"Line: 3 - Unexpected token: }");
}

#[test]
fn expected_identifier() {
    assert_snapshot!(message("class A : { }"), @"Line: 1 - Expected Identifier, found: {");
}

#[test]
fn expected_close_bracket() {
    assert_snapshot!(message("class A : B<int[4]> { }"), @"Line: 1 - Expected ], found: Number");
}

#[test]
fn struct_without_name() {
    assert_snapshot!(message("struct {"), @"Line: 1 - Expected Identifier after keyword `struct`, found {");
}

#[test]
fn struct_without_body() {
    assert_snapshot!(message("struct S : IEquatable<S>"), @"Line: 1 - Expected { after struct decl, found EOF");
}

#[test]
fn namespace_inside_type() {
    assert_snapshot!(message("class C {\n  namespace N { }\n}"), @"Line: 2 - Found namespace nested inside type.");
}

#[test]
fn unexpected_character_text() {
    let err = ScanError::UnexpectedCharacter { line: 7 };
    assert_snapshot!(err.to_string(), @"Line: 7 - Unexpected character.");
}

#[test]
fn report_names_file_and_message() {
    let src = "class A\n{\n  namespace N { }\n}";
    let err = scan_source(src).unwrap_err();
    let mut out = Vec::new();
    write_error(src, "Player.cs", &err, false, &mut out).unwrap();
    let report = String::from_utf8(out).unwrap();
    assert!(report.contains("Player.cs"), "{report}");
    assert!(report.contains("Found namespace nested inside type."), "{report}");
    assert!(report.contains("namespace N { }"), "{report}");
}

#[test]
fn report_for_unanchored_error() {
    let src = "class A {";
    let err = scan_source(src).unwrap_err();
    let mut out = Vec::new();
    write_error(src, "Open.cs", &err, false, &mut out).unwrap();
    let report = String::from_utf8(out).unwrap();
    assert!(report.contains("Reached EOF with missing close curly brackets."), "{report}");
}
