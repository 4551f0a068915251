//! Section parser.
//!
//! Consumes tokens in the fixed SU2 section order and produces a [`RawMesh`].
//! The first defect aborts the parse.

use std::io::BufRead;

use glam::DVec3;
use su2mesh_core::{
    Dimension, ElementType, IdColumnPolicy, ReaderOptions, Registry, Result, SectionOrder,
    Su2Error,
};

use crate::lexer::{Keyword, Token, Tokenizer};
use crate::records::{RawElement, RawMarker, RawMesh};

/// Upper bound on up-front allocation from a declared count.
///
/// Counts come from the file and are only trusted once the records exist.
const PREALLOCATION_LIMIT: usize = 1 << 16;

/// The counted block being read. Selects the count-mismatch error.
enum Block<'a> {
    Points,
    Elements,
    Marker(&'a str),
}

impl Block<'_> {
    fn mismatch(&self, line: usize, declared: usize, found: usize) -> Su2Error {
        match self {
            Block::Points => Su2Error::PointCountMismatch {
                line,
                declared,
                found,
            },
            Block::Elements => Su2Error::ElementCountMismatch {
                line,
                declared,
                found,
            },
            Block::Marker(name) => Su2Error::MarkerElementCountMismatch {
                line,
                marker: (*name).to_string(),
                declared,
                found,
            },
        }
    }

    fn record_name(&self) -> &'static str {
        match self {
            Block::Points => "point",
            Block::Elements => "element",
            Block::Marker(_) => "marker element",
        }
    }
}

fn malformed(token: &Token, reason: impl Into<String>) -> Su2Error {
    Su2Error::MalformedToken {
        line: token.line,
        token: token.text.clone(),
        reason: reason.into(),
    }
}

fn malformed_record(line: usize, tokens: &[Token], reason: String) -> Su2Error {
    let text: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    Su2Error::MalformedToken {
        line,
        token: text.join(" "),
        reason,
    }
}

fn count(token: &Token) -> Result<usize> {
    token
        .as_integer()
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| malformed(token, "expected a non-negative count"))
}

/// Recursive-descent parser over a token stream.
pub struct Parser<R> {
    tokens: Tokenizer<R>,
    peeked: Option<Token>,
    id_column: IdColumnPolicy,
    section_order: SectionOrder,
}

impl<R: BufRead> Parser<R> {
    /// Create a parser over a tokenizer.
    pub fn new(tokens: Tokenizer<R>, options: &ReaderOptions) -> Self {
        Self {
            tokens,
            peeked: None,
            id_column: options.id_column,
            section_order: options.section_order,
        }
    }

    /// Parses every section of the file.
    pub fn parse(mut self) -> Result<RawMesh> {
        let dimension = self.parse_dimension()?;
        let mut mesh = RawMesh::new(dimension);

        let elements_first = self.section_order == SectionOrder::ElementsFirst
            && self.peek()?.and_then(Token::keyword) == Some(Keyword::Nelem);
        if elements_first {
            log::debug!("reading NELEM= before NPOIN=");
            mesh.elements = self.parse_elements()?;
            self.parse_points(&mut mesh)?;
        } else {
            self.parse_points(&mut mesh)?;
            mesh.elements = self.parse_elements()?;
        }

        mesh.markers = self.parse_markers()?;
        self.finish()?;
        Ok(mesh)
    }

    // -------------------------------------------------------------------------
    // token access
    // -------------------------------------------------------------------------

    fn peek(&mut self) -> Result<Option<&Token>> {
        if self.peeked.is_none() {
            self.peeked = self.tokens.next().transpose()?;
        }
        Ok(self.peeked.as_ref())
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        match self.peeked.take() {
            Some(token) => Ok(Some(token)),
            None => self.tokens.next().transpose(),
        }
    }

    /// Moves every remaining token of `line` into `out`.
    fn take_line(&mut self, line: usize, out: &mut Vec<Token>) -> Result<()> {
        while self.peek()?.is_some_and(|t| t.line == line) {
            out.extend(self.next_token()?);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // headers
    // -------------------------------------------------------------------------

    /// Takes the next token, which must be `keyword`.
    fn expect(&mut self, keyword: Keyword) -> Result<Token> {
        match self.next_token()? {
            Some(t) if t.keyword() == Some(keyword) => Ok(t),
            Some(t) => Err(Su2Error::UnexpectedSection {
                line: t.line,
                found: t.text,
                expected: keyword.as_str(),
            }),
            None => Err(Su2Error::TruncatedFile {
                line: self.tokens.line(),
                section: keyword.as_str(),
            }),
        }
    }

    /// Takes the values following `head` on its line. At least one is required.
    fn values(&mut self, head: &Token, keyword: Keyword) -> Result<Vec<Token>> {
        let mut values = Vec::new();
        self.take_line(head.line, &mut values)?;
        if values.is_empty() {
            return Err(if self.peek()?.is_none() {
                Su2Error::TruncatedFile {
                    line: head.line,
                    section: keyword.as_str(),
                }
            } else {
                malformed(head, "missing value")
            });
        }
        Ok(values)
    }

    /// Reads `keyword` and the values on its line. Returns the keyword's line.
    fn header(&mut self, keyword: Keyword) -> Result<(usize, Vec<Token>)> {
        let head = self.expect(keyword)?;
        let values = self.values(&head, keyword)?;
        Ok((head.line, values))
    }

    /// Reads `MARKER_TAG=` and returns the rest of its line, trimmed.
    fn marker_tag(&mut self) -> Result<(usize, String)> {
        let head = self.expect(Keyword::MarkerTag)?;
        // The tokenizer has not left the keyword's line yet.
        let name = self
            .tokens
            .line_text()
            .split_once(Keyword::MarkerTag.as_str())
            .map(|(_, rest)| rest.trim().to_string())
            .unwrap_or_default();
        self.values(&head, Keyword::MarkerTag)?;
        Ok((head.line, name))
    }

    /// Reads a keyword followed by exactly one count.
    fn single_count(&mut self, keyword: Keyword) -> Result<usize> {
        let (_, values) = self.header(keyword)?;
        if let Some(extra) = values.get(1) {
            return Err(malformed(extra, format!("unexpected value after {keyword}")));
        }
        count(&values[0])
    }

    fn parse_dimension(&mut self) -> Result<Dimension> {
        let (_, values) = self.header(Keyword::Ndime)?;
        if let Some(extra) = values.get(1) {
            return Err(malformed(extra, "unexpected value after NDIME="));
        }
        let token = &values[0];
        let dimension = token
            .as_integer()
            .and_then(Dimension::from_ndime)
            .ok_or_else(|| Su2Error::InvalidDimension {
                line: token.line,
                found: token.text.clone(),
            })?;
        log::debug!("NDIME= {dimension}");
        Ok(dimension)
    }

    // -------------------------------------------------------------------------
    // counted blocks
    // -------------------------------------------------------------------------

    /// Takes the next record line, or reports a short block.
    fn record(&mut self, block: &Block<'_>, declared: usize, found: usize) -> Result<Vec<Token>> {
        match self.next_token()? {
            Some(head) if !head.is_section() => {
                let line = head.line;
                let mut tokens = vec![head];
                self.take_line(line, &mut tokens)?;
                Ok(tokens)
            }
            Some(head) => Err(block.mismatch(head.line, declared, found)),
            None => Err(block.mismatch(self.tokens.line(), declared, found)),
        }
    }

    /// Fails if another record follows a complete block.
    fn end_of_block(&mut self, block: &Block<'_>, declared: usize) -> Result<()> {
        match self.peek()? {
            Some(t) if !t.is_section() => {
                let line = t.line;
                Err(block.mismatch(line, declared, declared + 1))
            }
            _ => Ok(()),
        }
    }

    fn check_id(&self, id: Option<&Token>, block: &Block<'_>, position: usize) -> Result<()> {
        let Some(token) = id else {
            return Ok(());
        };
        let value = token
            .as_integer()
            .ok_or_else(|| malformed(token, "expected an integer id"))?;
        if self.id_column == IdColumnPolicy::Validate
            && usize::try_from(value).ok() != Some(position)
        {
            return Err(Su2Error::IdMismatch {
                line: token.line,
                record: block.record_name(),
                expected: position,
                found: value,
            });
        }
        Ok(())
    }

    fn parse_points(&mut self, mesh: &mut RawMesh) -> Result<()> {
        let (line, values) = self.header(Keyword::Npoin)?;
        if let Some(extra) = values.get(2) {
            return Err(malformed(extra, "unexpected value after NPOIN="));
        }
        let declared = count(&values[0])?;
        mesh.domain_points = values.get(1).map(count).transpose()?;
        if let Some(domain) = mesh.domain_points.filter(|&d| d != declared) {
            log::warn!(
                "line {line}: NPOIN= declares {domain} domain points of {declared}; partitions are not reconciled"
            );
        }
        log::debug!("NPOIN= {declared}");

        let ndime = mesh.dimension.ndime();
        let block = Block::Points;
        mesh.points = Vec::with_capacity(declared.min(PREALLOCATION_LIMIT));
        for position in 0..declared {
            let tokens = self.record(&block, declared, position)?;
            let point = self.point(&tokens, ndime, position)?;
            mesh.points.push(point);
        }
        self.end_of_block(&block, declared)
    }

    /// Reads one point record: `ndime` coordinates, then up to two ids.
    ///
    /// Partitioned files write a local and a global id after the
    /// coordinates. Only the first is checked against position.
    fn point(&self, tokens: &[Token], ndime: usize, position: usize) -> Result<DVec3> {
        let line = tokens[0].line;
        if tokens.len() < ndime || tokens.len() > ndime + 2 {
            return Err(malformed_record(
                line,
                tokens,
                format!(
                    "expected {ndime} coordinates and at most two ids, found {} values",
                    tokens.len()
                ),
            ));
        }

        let mut xyz = [0.0; 3];
        for (slot, token) in xyz.iter_mut().zip(&tokens[..ndime]) {
            *slot = token
                .as_number()
                .ok_or_else(|| malformed(token, "expected a coordinate"))?;
        }
        self.check_id(tokens.get(ndime), &Block::Points, position)?;
        if let Some(global) = tokens.get(ndime + 1) {
            if global.as_integer().is_none() {
                return Err(malformed(global, "expected an integer global id"));
            }
        }
        Ok(DVec3::from_array(xyz))
    }

    fn parse_elements(&mut self) -> Result<Vec<RawElement>> {
        let declared = self.single_count(Keyword::Nelem)?;
        log::debug!("NELEM= {declared}");
        self.element_block(&Block::Elements, declared)
    }

    fn element_block(&mut self, block: &Block<'_>, declared: usize) -> Result<Vec<RawElement>> {
        let mut elements = Vec::with_capacity(declared.min(PREALLOCATION_LIMIT));
        for position in 0..declared {
            let tokens = self.record(block, declared, position)?;
            elements.push(self.element(&tokens, block, position)?);
        }
        self.end_of_block(block, declared)?;
        Ok(elements)
    }

    fn element(&self, tokens: &[Token], block: &Block<'_>, position: usize) -> Result<RawElement> {
        let head = &tokens[0];
        let line = head.line;
        let code = head
            .as_integer()
            .ok_or_else(|| malformed(head, "expected an element type code"))?;
        let element_type = ElementType::from_su2_code(code)
            .ok_or(Su2Error::UnknownElementType { line, code })?;

        let rest = &tokens[1..];
        let n = element_type.num_vertices();
        if rest.len() < n || rest.len() > n + 1 {
            return Err(malformed_record(
                line,
                tokens,
                format!(
                    "{element_type} element expects {n} point indices and an optional id, found {} values",
                    rest.len()
                ),
            ));
        }

        let vertices = rest[..n]
            .iter()
            .map(|t| {
                t.as_integer()
                    .ok_or_else(|| malformed(t, "expected a point index"))
            })
            .collect::<Result<Vec<_>>>()?;
        self.check_id(rest.get(n), block, position)?;

        Ok(RawElement {
            element_type,
            vertices,
            line,
        })
    }

    // -------------------------------------------------------------------------
    // markers
    // -------------------------------------------------------------------------

    fn parse_markers(&mut self) -> Result<Vec<RawMarker>> {
        let declared = self.single_count(Keyword::Nmark)?;
        log::debug!("NMARK= {declared}");

        let mut registry = Registry::with_capacity(declared.min(PREALLOCATION_LIMIT));
        let mut markers = Vec::with_capacity(declared.min(PREALLOCATION_LIMIT));
        for _ in 0..declared {
            let (line, name) = self.marker_tag()?;
            registry.register(name.as_str(), line)?;

            let num_elements = self.single_count(Keyword::MarkerElems)?;
            let elements = self.element_block(&Block::Marker(&name), num_elements)?;
            log::trace!("marker '{name}': {num_elements} elements");

            markers.push(RawMarker {
                name,
                line,
                elements,
            });
        }
        Ok(markers)
    }

    /// Accepts end of input or a trailing section this reader does not use.
    fn finish(&mut self) -> Result<()> {
        match self.peek()? {
            None => Ok(()),
            Some(t) if t.keyword().is_none() && t.is_section() => {
                log::debug!("line {}: ignoring trailing section {}", t.line, t.text);
                Ok(())
            }
            Some(t) => Err(Su2Error::UnexpectedSection {
                line: t.line,
                found: t.text.clone(),
                expected: "end of file",
            }),
        }
    }
}

/// Parses an SU2 source from a buffered reader.
pub fn parse<R: BufRead>(reader: R, options: &ReaderOptions) -> Result<RawMesh> {
    Parser::new(Tokenizer::new(reader), options).parse()
}

/// Parses an in-memory SU2 source.
pub fn parse_str(source: &str, options: &ReaderOptions) -> Result<RawMesh> {
    Parser::new(Tokenizer::from_str(source), options).parse()
}
