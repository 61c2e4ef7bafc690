// Property-based tests for the declaration scanner.
//
// Generated scripts are built from names and member snippets whose expected
// declarations are known up front, so the properties check naming, nesting
// and brace accounting rather than specific examples.

use proptest::prelude::*;
use sharpscan::lexer::Lexer;
use sharpscan::lexer::token::Token;
use sharpscan::{ScanError, scan_source};

// =============================================================================
// Generators
// =============================================================================

/// Capitalized, so never one of the lowercase keywords.
fn arb_type_name() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z0-9_]{0,8}"
}

fn arb_namespace() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_type_name(), 0..3)
}

/// Member text that contains braces, strings and comments but no
/// declarations of its own.
fn arb_member() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "int x = 1;",
        "public float Speed { get; set; } = 2.5f;",
        "void M() { if (a < b) { c(); } }",
        "// } stray brace in a comment",
        "/* { */",
        "string s = \"{ not a block\";",
        "string v = @\"}\"\"\";",
        "char c = '}';",
        "private Dictionary<string, List<(int id, float w)>> map = new();",
        "T Get<T>() where T : class, new() { return new T(); }",
        "[Export] public NodePath Target;",
        "#region members",
    ])
}

fn arb_members() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_member(), 0..4).prop_map(|m| m.join("\n"))
}

// =============================================================================
// Robustness
// =============================================================================

#[test]
fn prop_scanner_never_panics() {
    proptest!(|(source in "\\PC{0,500}")| {
        let _ = scan_source(&source);
    });
}

#[test]
fn prop_scanner_never_panics_on_near_csharp() {
    let piece = prop::sample::select(vec![
        "class", "struct", "namespace", "where", "A", "B", ".", ",", ":", "<", ">", "(",
        ")", "[", "]", "?", "{", "}", ";", "\"s\"", "@\"v\"", "1.5", "new", "\n",
    ]);
    proptest!(|(pieces in prop::collection::vec(piece, 0..60))| {
        let _ = scan_source(&pieces.join(" "));
    });
}

#[test]
fn prop_scanning_is_deterministic() {
    proptest!(|(source in "\\PC{0,300}")| {
        prop_assert_eq!(scan_source(&source), scan_source(&source));
    });
}

#[test]
fn prop_lexer_iteration_terminates() {
    proptest!(|(source in "\\PC{0,300}")| {
        // every token consumes input, so iteration ends within len + 1 steps
        let count = Lexer::new(&source).take(source.len() + 2).count();
        prop_assert!(count <= source.len() + 1);
    });
}

#[test]
fn prop_lexer_line_stays_within_input() {
    proptest!(|(source in "[a-z{}\"/*\n ]{0,200}")| {
        let last_line = source.matches('\n').count() + 1;
        let mut lexer = Lexer::new(&source);
        loop {
            let token = lexer.next_token();
            prop_assert!(lexer.line() <= last_line);
            if !matches!(token, Ok(ref t) if *t != Token::Eof) {
                break;
            }
        }
    });
}

// =============================================================================
// Naming
// =============================================================================

#[test]
fn prop_nested_chain_names() {
    proptest!(|(
        namespace in arb_namespace(),
        chain in prop::collection::vec(arb_type_name(), 1..5),
        members in arb_members(),
    )| {
        let mut src = String::new();
        if !namespace.is_empty() {
            src.push_str(&format!("namespace {} {{\n", namespace.join(".")));
        }
        for name in &chain {
            src.push_str(&format!("class {name} {{\n{members}\n"));
        }
        src.push_str(&"}\n".repeat(chain.len()));
        if !namespace.is_empty() {
            src.push_str("}\n");
        }

        let decls = scan_source(&src).unwrap();
        prop_assert_eq!(decls.len(), chain.len());
        for (depth, decl) in decls.iter().enumerate() {
            prop_assert_eq!(&decl.namespace, &namespace.join("."));
            prop_assert_eq!(&decl.name, &chain[..=depth].join("."));
            prop_assert_eq!(decl.nested, depth > 0);
        }
    });
}

#[test]
fn prop_siblings_keep_order_and_bases() {
    proptest!(|(
        classes in prop::collection::vec((arb_type_name(), prop::collection::vec(arb_type_name(), 0..3)), 1..6),
        members in arb_members(),
    )| {
        let mut src = String::new();
        for (name, bases) in &classes {
            let header = if bases.is_empty() {
                String::new()
            } else {
                format!(" : {}", bases.iter().map(|b| format!("{b}<int>")).collect::<Vec<_>>().join(", "))
            };
            src.push_str(&format!("public class {name}{header}\n{{\n{members}\n}}\n"));
        }

        let decls = scan_source(&src).unwrap();
        prop_assert_eq!(decls.len(), classes.len());
        for (decl, (name, bases)) in decls.iter().zip(&classes) {
            prop_assert_eq!(&decl.name, name);
            prop_assert_eq!(&decl.base, bases);
            prop_assert!(!decl.nested);
        }
    });
}

#[test]
fn prop_generic_classes_never_reported() {
    proptest!(|(name in arb_type_name(), params in prop::collection::vec(arb_type_name(), 1..4))| {
        let src = format!("class {name}<{}> {{ }}", params.join(", "));
        prop_assert!(scan_source(&src).unwrap().is_empty());
    });
}

// =============================================================================
// Brace accounting
// =============================================================================

#[test]
fn prop_missing_close_brace_is_reported() {
    proptest!(|(chain in prop::collection::vec(arb_type_name(), 1..4), members in arb_members())| {
        let mut src = String::new();
        for name in &chain {
            src.push_str(&format!("class {name} {{ {members}\n"));
        }
        src.push_str(&"}\n".repeat(chain.len() - 1));
        prop_assert_eq!(scan_source(&src), Err(ScanError::UnbalancedBraces));
    });
}

#[test]
fn prop_extra_close_brace_is_reported() {
    proptest!(|(name in arb_type_name(), members in arb_members())| {
        let src = format!("class {name} {{ {members}\n}}\n}}");
        let err = scan_source(&src).unwrap_err();
        prop_assert!(matches!(err, ScanError::UnexpectedToken { .. }), "{:?}", err);
    });
}
