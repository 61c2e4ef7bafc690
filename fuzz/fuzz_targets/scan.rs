#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

/// Fragments that steer the scanner into its declaration paths far more
/// often than raw bytes would.
#[derive(Arbitrary, Debug)]
enum Fragment {
    Class,
    Struct,
    Namespace,
    Where,
    New,
    Name,
    Period,
    Comma,
    Colon,
    Question,
    Less,
    Greater,
    ParenOpen,
    ParenClose,
    BracketOpen,
    BracketClose,
    CurlyOpen,
    CurlyClose,
    Semicolon,
    Str,
    Verbatim,
    Comment,
    Newline,
}

impl Fragment {
    fn text(&self) -> &'static str {
        match self {
            Fragment::Class => "class",
            Fragment::Struct => "struct",
            Fragment::Namespace => "namespace",
            Fragment::Where => "where",
            Fragment::New => "new",
            Fragment::Name => "Node",
            Fragment::Period => ".",
            Fragment::Comma => ",",
            Fragment::Colon => ":",
            Fragment::Question => "?",
            Fragment::Less => "<",
            Fragment::Greater => ">",
            Fragment::ParenOpen => "(",
            Fragment::ParenClose => ")",
            Fragment::BracketOpen => "[",
            Fragment::BracketClose => "]",
            Fragment::CurlyOpen => "{",
            Fragment::CurlyClose => "}",
            Fragment::Semicolon => ";",
            Fragment::Str => "\"{\"",
            Fragment::Verbatim => "@\"}\"\"\"",
            Fragment::Comment => "/* } */",
            Fragment::Newline => "\n",
        }
    }
}

fuzz_target!(|fragments: Vec<Fragment>| {
    let source: Vec<&str> = fragments.iter().map(Fragment::text).collect();
    // Should never panic, and must agree with itself
    let first = sharpscan::scan_source(&source.join(" "));
    let second = sharpscan::scan_source(&source.join(" "));
    assert_eq!(first, second);
});
