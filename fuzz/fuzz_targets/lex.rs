#![no_main]
use libfuzzer_sys::fuzz_target;
use sharpscan::lexer::Lexer;
use sharpscan::lexer::token::Token;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let last_line = source.matches('\n').count() + 1;
    let mut lexer = Lexer::new(source);

    // every token consumes input, so end of input arrives within len + 1 calls
    for _ in 0..=source.len() {
        let token = lexer.next_token();
        assert!(lexer.line() <= last_line, "line {} past end of input", lexer.line());
        match token {
            Ok(Token::Eof) | Err(_) => return,
            Ok(_) => {}
        }
    }
    panic!("no end of input after {} tokens", source.len() + 1);
});
