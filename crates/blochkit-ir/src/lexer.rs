//! Lexer for textual history records.

use logos::Logos;

/// Tokens of a history record line such as `ccx q[0],q[1] -> q[2]`.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    // Literals
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u32>().ok())]
    IntLiteral(u32),

    // Identifiers (gate mnemonics and register names)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Punctuation
    #[token("->")]
    Arrow,

    #[token("?")]
    Question,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(",")]
    Comma,
}

/// Tokenize a record line, failing at the first invalid token.
///
/// Returns the byte offset and text of the offending slice on error.
pub fn tokenize(source: &str) -> Result<Vec<Token>, (usize, String)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push(token),
            Err(()) => {
                let span = lexer.span();
                return Err((span.start, format!("Invalid token: '{}'", &source[span])));
            }
        }
    }

    Ok(tokens)
}
