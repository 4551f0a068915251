//! # SU2 Tokenizer
//!
//! Splits an SU2 source into tokens, one line at a time.
//!
//! Tokens never span a line, and each carries the 1-based line it came from.
//! The parser relies on this: a point or element record is exactly the run of
//! tokens that share a line.
//!
//! ## Example
//!
//! ```rust
//! use su2mesh_reader::lexer::{Keyword, TokenKind, Tokenizer};
//!
//! let tokens: Vec<_> = Tokenizer::from_str("NDIME=2 % comment\nNPOIN= 4")
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::Ndime));
//! assert_eq!(tokens[1].kind, TokenKind::Integer(2));
//! assert_eq!(tokens[3].line, 2);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::io::BufRead;

use su2mesh_core::{Result, Su2Error};

// =============================================================================
// TOKEN
// =============================================================================

/// Section keywords of the SU2 grammar, including their trailing `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `NDIME=`
    Ndime,
    /// `NPOIN=`
    Npoin,
    /// `NELEM=`
    Nelem,
    /// `NMARK=`
    Nmark,
    /// `MARKER_TAG=`
    MarkerTag,
    /// `MARKER_ELEMS=`
    MarkerElems,
}

impl Keyword {
    /// Every keyword, in grammar order.
    pub const ALL: [Keyword; 6] = [
        Keyword::Ndime,
        Keyword::Npoin,
        Keyword::Nelem,
        Keyword::Nmark,
        Keyword::MarkerTag,
        Keyword::MarkerElems,
    ];

    /// Returns the keyword as written in a file.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Ndime => "NDIME=",
            Keyword::Npoin => "NPOIN=",
            Keyword::Nelem => "NELEM=",
            Keyword::Nmark => "NMARK=",
            Keyword::MarkerTag => "MARKER_TAG=",
            Keyword::MarkerElems => "MARKER_ELEMS=",
        }
    }

    /// Looks a keyword up by its spelling (with the `=`).
    pub fn from_text(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == text)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Types of tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /// A known section keyword.
    Keyword(Keyword),
    /// A section-like word ending in `=` that the grammar does not know,
    /// such as `FFD_NBOX=`.
    UnknownKeyword,
    /// An integer literal.
    Integer(i64),
    /// A floating-point literal.
    Float(f64),
    /// Anything else (marker names, stray text).
    Word,
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token type.
    pub kind: TokenKind,
    /// Token text, as written.
    pub text: String,
    /// 1-based source line.
    pub line: usize,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    /// Classifies a single whitespace-free piece of text.
    fn classify(text: &str, line: usize) -> Self {
        let kind = if let Some(keyword) = Keyword::from_text(text) {
            TokenKind::Keyword(keyword)
        } else if let Ok(value) = text.parse::<i64>() {
            TokenKind::Integer(value)
        } else if let Ok(value) = text.parse::<f64>() {
            TokenKind::Float(value)
        } else if text.len() > 1 && text.ends_with('=') {
            TokenKind::UnknownKeyword
        } else {
            TokenKind::Word
        };
        Self::new(kind, text, line)
    }

    /// Returns the keyword, if this token is one.
    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(k) => Some(k),
            _ => None,
        }
    }

    /// Returns true for known and unknown section keywords.
    pub fn is_section(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Keyword(_) | TokenKind::UnknownKeyword
        )
    }

    /// Returns the integer value, if this token is an integer literal.
    pub fn as_integer(&self) -> Option<i64> {
        match self.kind {
            TokenKind::Integer(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the numeric value of an integer or float literal.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self.kind {
            TokenKind::Integer(v) => Some(v as f64),
            TokenKind::Float(v) => Some(v),
            _ => None,
        }
    }
}

// =============================================================================
// TOKENIZER
// =============================================================================

/// Streaming SU2 tokenizer.
///
/// Reads one line at a time from any [`BufRead`], so memory use is bounded by
/// the longest line rather than the file size. A `%` starts a comment that
/// runs to the end of the line. A keyword glued to its value (`NDIME=2`) is
/// split into two tokens.
pub struct Tokenizer<R> {
    reader: R,
    buffer: Vec<u8>,
    /// Text of the current line, without comment or line break.
    text: String,
    pending: VecDeque<Token>,
    line: usize,
    done: bool,
}

impl<R: BufRead> Tokenizer<R> {
    /// Create a tokenizer over a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            text: String::new(),
            pending: VecDeque::new(),
            line: 0,
            done: false,
        }
    }

    /// Returns the number of lines read so far.
    ///
    /// Once the input is exhausted this is the last line of the file, which is
    /// where end-of-file errors point.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the text of the line the last token came from, with any
    /// comment removed.
    ///
    /// Only meaningful until the next token is pulled from a later line.
    pub fn line_text(&self) -> &str {
        &self.text
    }

    /// Reads lines until one produces tokens or the input ends.
    fn fill(&mut self) -> Result<()> {
        while self.pending.is_empty() && !self.done {
            self.buffer.clear();
            if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
                self.done = true;
                break;
            }
            self.line += 1;

            // `%` is ASCII, so comments are cut before decoding.
            let content = match self.buffer.iter().position(|&b| b == b'%') {
                Some(comment) => &self.buffer[..comment],
                None => &self.buffer[..],
            };
            let decoded = std::str::from_utf8(content).map_err(|err| Su2Error::MalformedToken {
                line: self.line,
                token: String::from_utf8_lossy(content).trim().to_string(),
                reason: format!("invalid UTF-8: {err}"),
            })?;
            let decoded = if self.line == 1 {
                decoded.trim_start_matches('\u{feff}')
            } else {
                decoded
            };

            self.text.clear();
            self.text.push_str(decoded.trim_end_matches(['\n', '\r']));
            for word in self.text.split_whitespace() {
                split_word(word, self.line, &mut self.pending);
            }
        }
        Ok(())
    }
}

impl<'a> Tokenizer<&'a [u8]> {
    /// Create a tokenizer over an in-memory source.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(source: &'a str) -> Self {
        Self::new(source.as_bytes())
    }
}

impl<R: BufRead> Iterator for Tokenizer<R> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Err(err) = self.fill() {
            self.done = true;
            self.pending.clear();
            return Some(Err(err));
        }
        self.pending.pop_front().map(Ok)
    }
}

/// Pushes the tokens of one whitespace-delimited word.
fn split_word(word: &str, line: usize, out: &mut VecDeque<Token>) {
    if let Some(eq) = word.find('=') {
        let (head, rest) = word.split_at(eq + 1);
        if !rest.is_empty() {
            if let Some(keyword) = Keyword::from_text(head) {
                out.push_back(Token::new(TokenKind::Keyword(keyword), head, line));
                out.push_back(Token::classify(rest, line));
                return;
            }
        }
    }
    out.push_back(Token::classify(word, line));
}

/// Convenience for tests and small inputs: tokenizes a whole string.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Tokenizer::from_str(source).collect()
}
