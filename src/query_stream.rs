//! Query-line parsing and the result sink.
//!
//! Each query line is `cx cy r`: exactly three optionally signed decimal integers that fit in
//! 32 bits, separated by whitespace. The stream ends at end of input, at a blank line, or at
//! the first line that is not a valid query. Nothing after that point is read.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::AugmentedTree;
use crate::error::{Error, QueryError, Result};

/// One validated circle query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Query {
    /// Center x
    pub cx: i32,
    /// Center y
    pub cy: i32,
    /// Radius, never negative
    pub r: i32,
}

impl Query {
    /// Runs this query against `tree`.
    pub fn count(&self, tree: &AugmentedTree) -> usize {
        tree.count_in_circle(self.cx, self.cy, self.r)
    }
}

/// Parses a single query line.
///
/// A trailing `\n` or `\r\n` is ignored.
///
/// # Errors
/// - [`QueryError::Blank`] for an empty or whitespace-only line.
/// - [`QueryError::WrongTokenCount`] unless there are exactly three tokens.
/// - [`QueryError::InvalidNumber`] for a token that is not a 32-bit decimal integer.
/// - [`QueryError::NegativeRadius`] when `r < 0`.
///
/// # Example
/// ```
/// use avlbox::{Query, parse_query_line};
/// assert_eq!(parse_query_line("3 -4 5\n"), Ok(Query { cx: 3, cy: -4, r: 5 }));
/// assert!(parse_query_line("3 4").is_err());
/// ```
pub fn parse_query_line(line: &str) -> std::result::Result<Query, QueryError> {
    let line = line.trim_end_matches(['\n', '\r']);
    let tokens: Vec<&str> = line.split_ascii_whitespace().collect();

    if tokens.is_empty() {
        return Err(QueryError::Blank);
    }
    let [cx, cy, r] = tokens[..] else {
        return Err(QueryError::WrongTokenCount(tokens.len()));
    };

    let query = Query {
        cx: parse_int(cx)?,
        cy: parse_int(cy)?,
        r: parse_int(r)?,
    };
    if query.r < 0 {
        return Err(QueryError::NegativeRadius(query.r));
    }
    Ok(query)
}

fn parse_int(token: &str) -> std::result::Result<i32, QueryError> {
    token
        .parse()
        .map_err(|_| QueryError::InvalidNumber(token.to_owned()))
}

/// Iterator over the accepted queries of a line-oriented input.
///
/// Yields `Ok(query)` for each valid line. A blank or malformed line ends the stream without
/// an item. A read error is yielded once as `Err` and ends the stream.
#[derive(Debug)]
pub struct QueryStream<R> {
    reader: R,
    line: String,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> QueryStream<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_no: 0,
            done: false,
        }
    }

    /// Number of lines read so far, including a terminating one.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for QueryStream<R> {
    type Item = Result<Query>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        self.line.clear();
        match self.reader.read_line(&mut self.line) {
            Ok(0) => {
                self.done = true;
                debug!(lines = self.line_no, "query stream reached end of input");
                None
            }
            Ok(_) => {
                self.line_no += 1;
                match parse_query_line(&self.line) {
                    Ok(query) => Some(Ok(query)),
                    Err(e) => {
                        self.done = true;
                        if e.is_terminator() {
                            debug!(line = self.line_no, "query stream ended by blank line");
                        } else {
                            warn!(line = self.line_no, error = %e, "query stream ended by invalid line");
                        }
                        None
                    }
                }
            }
            Err(e) => {
                self.done = true;
                Some(Err(Error::Io(e)))
            }
        }
    }
}

/// Answers every query read from `input`, writing one count per line to `output`.
///
/// Returns the number of queries answered. Input ending in a blank or malformed line is a
/// normal end, not an error.
///
/// # Errors
/// Returns [`Error::Io`] if reading `input` or writing `output` fails.
///
/// # Example
/// ```
/// use avlbox::{AugmentedTree, run_queries};
/// let tree: AugmentedTree = [(0, 0), (3, 4), (10, 10)].into_iter().collect();
/// let mut out = Vec::new();
/// let answered = run_queries(&tree, "0 0 5\n0 0 20\n".as_bytes(), &mut out).unwrap();
/// assert_eq!(answered, 2);
/// assert_eq!(out, b"2\n3\n");
/// ```
pub fn run_queries<R: BufRead, W: Write>(
    tree: &AugmentedTree,
    input: R,
    mut output: W,
) -> Result<usize> {
    let mut answered = 0;
    for query in QueryStream::new(input) {
        let count = query?.count(tree);
        writeln!(output, "{count}")?;
        answered += 1;
    }
    output.flush()?;
    debug!(answered, "queries answered");
    Ok(answered)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // LINE PARSING TESTS
    // ============================================================================

    #[test]
    fn test_parse_valid_line() {
        assert_eq!(parse_query_line("0 0 5"), Ok(Query { cx: 0, cy: 0, r: 5 }));
        assert_eq!(parse_query_line("  -1\t+2   3 \r\n"), Ok(Query { cx: -1, cy: 2, r: 3 }));
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(parse_query_line(""), Err(QueryError::Blank));
        assert_eq!(parse_query_line("   \n"), Err(QueryError::Blank));
    }

    #[test]
    fn test_parse_wrong_token_count() {
        assert_eq!(parse_query_line("1 2"), Err(QueryError::WrongTokenCount(2)));
        assert_eq!(parse_query_line("1 2 3 4"), Err(QueryError::WrongTokenCount(4)));
    }

    #[test]
    fn test_parse_rejects_trailing_characters() {
        assert_eq!(
            parse_query_line("1 2 3x"),
            Err(QueryError::InvalidNumber("3x".to_owned()))
        );
        assert_eq!(
            parse_query_line("1.5 2 3"),
            Err(QueryError::InvalidNumber("1.5".to_owned()))
        );
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert_eq!(
            parse_query_line("2147483648 0 1"),
            Err(QueryError::InvalidNumber("2147483648".to_owned()))
        );
        assert!(parse_query_line("-2147483648 2147483647 2147483647").is_ok());
    }

    #[test]
    fn test_parse_rejects_negative_radius() {
        assert_eq!(parse_query_line("0 0 -1"), Err(QueryError::NegativeRadius(-1)));
    }

    // ============================================================================
    // STREAM TESTS
    // ============================================================================

    #[test]
    fn test_stream_stops_at_blank_line() {
        let input = "0 0 5\n1 1 1\n\n2 2 2\n3 3 3\n";
        let mut stream = QueryStream::new(input.as_bytes());
        let queries: Vec<Query> = stream.by_ref().map(|q| q.unwrap()).collect();
        assert_eq!(queries.len(), 2, "Queries after the blank line must not be read");
        assert_eq!(stream.lines_read(), 3);
        assert!(stream.next().is_none(), "Stream stays finished");
    }

    #[test]
    fn test_stream_stops_at_malformed_line() {
        let input = "0 0 5\nfoo\n1 1 1\n";
        let queries: Vec<_> = QueryStream::new(input.as_bytes()).collect();
        assert_eq!(queries.len(), 1);
    }

    #[test]
    fn test_stream_without_trailing_newline() {
        let queries: Vec<_> = QueryStream::new("1 2 3".as_bytes()).collect();
        assert_eq!(queries.len(), 1);
    }

    // ============================================================================
    // SINK TESTS
    // ============================================================================

    #[test]
    fn test_run_queries_scenario_d() {
        let tree: AugmentedTree = [(0, 0), (3, 4), (10, 10)].into_iter().collect();
        let input = "0 0 5\n10 10 0\n\n0 0 100\n";
        let mut out = Vec::new();
        let answered = run_queries(&tree, input.as_bytes(), &mut out).unwrap();
        assert_eq!(answered, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "2\n1\n");
    }

    #[test]
    fn test_run_queries_empty_input() {
        let tree = AugmentedTree::new();
        let mut out = Vec::new();
        assert_eq!(run_queries(&tree, "".as_bytes(), &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }
}
