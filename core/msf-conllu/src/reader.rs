use std::io::{BufRead, Lines};

use nom::{
    branch::alt,
    bytes::complete::take_till,
    character::complete::{char, u32 as number},
    combinator::{all_consuming, map, opt, rest},
    multi::separated_list1,
    sequence::{preceded, separated_pair},
    IResult,
};

use msf_protocol::{FeatureBundle, Node, NodeId, RawLine, Sentence, Upos};

use tracing::debug;

use crate::error::ConlluError;

/// Value of the ID column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdField {
    Word(u32),
    /// Multiword token covering a span of words (`3-4`)
    Range(u32, u32),
    /// Empty node of the enhanced graph (`5.1`)
    Empty(u32, u32),
}

fn id_field(input: &str) -> IResult<&str, IdField> {
    alt((
        map(separated_pair(number, char('-'), number), |(a, b)| IdField::Range(a, b)),
        map(separated_pair(number, char('.'), number), |(a, b)| IdField::Empty(a, b)),
        map(number, IdField::Word),
    ))(input)
}

/// Comment text after the `#` and at most one space, otherwise verbatim.
fn comment(input: &str) -> IResult<&str, &str> {
    preceded(char('#'), preceded(opt(char(' ')), rest))(input)
}

fn columns(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(char('\t'), take_till(|c| c == '\t'))(input)
}

pub fn parse_id(value: &str, line: usize) -> Result<IdField, ConlluError> {
    all_consuming(id_field)(value)
        .map(|(_, id)| id)
        .map_err(|_| ConlluError::BadId {
            line,
            value: value.to_string(),
        })
}

fn parse_head(value: &str, line: usize) -> Result<NodeId, ConlluError> {
    all_consuming(number)(value)
        .map(|(_, head)| NodeId(head))
        .map_err(|_: nom::Err<nom::error::Error<&str>>| ConlluError::BadHead {
            line,
            value: value.to_string(),
        })
}

fn optional(value: &str) -> Option<String> {
    (value != msf_protocol::features::ABSENT).then(|| value.to_string())
}

fn parse_node(id: u32, cols: &[&str], line: usize) -> Result<Node, ConlluError> {
    let upos: Upos = cols[3]
        .parse()
        .map_err(|source| ConlluError::Upos { line, source })?;
    let feats =
        FeatureBundle::parse(cols[5]).map_err(|source| ConlluError::Feats { line, source })?;

    Ok(Node {
        id: NodeId(id),
        form: cols[1].to_string(),
        lemma: cols[2].to_string(),
        upos,
        xpos: optional(cols[4]),
        feats,
        head: parse_head(cols[6], line)?,
        deprel: cols[7].to_string(),
        deps: optional(cols[8]),
        misc: optional(cols[9]),
    })
}

#[derive(Default)]
struct SentenceBuilder {
    sentence: Sentence,
    lines: usize,
}

impl SentenceBuilder {
    fn is_empty(&self) -> bool {
        self.lines == 0
    }

    fn push_line(&mut self, line: &str, line_no: usize) -> Result<(), ConlluError> {
        self.lines += 1;

        if let Ok((_, text)) = comment(line) {
            self.sentence.comments.push(text.to_string());
            return Ok(());
        }

        let (_, cols) = columns(line).map_err(|_| ConlluError::ColumnCount {
            line: line_no,
            found: 0,
        })?;
        // An eleventh (derived) column from an earlier run is ignored.
        if cols.len() < 10 {
            return Err(ConlluError::ColumnCount {
                line: line_no,
                found: cols.len(),
            });
        }

        match parse_id(cols[0], line_no)? {
            IdField::Word(id) => {
                let node = parse_node(id, &cols, line_no)?;
                self.sentence.nodes.push(node);
            }
            IdField::Range(..) | IdField::Empty(..) => self.sentence.raw_lines.push(RawLine {
                position: self.sentence.nodes.len(),
                text: cols[..10].join("\t"),
            }),
        }
        Ok(())
    }
}

/// Streams sentences out of CoNLL-U text.
///
/// A malformed block yields one error and the reader resumes at the next block.
pub struct ConlluReader<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> ConlluReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            lines: input.lines(),
            line_no: 0,
        }
    }

    /// Number of lines consumed so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    fn skip_block(&mut self) {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            match line {
                Ok(line) if line.trim().is_empty() => break,
                Ok(_) => {}
                Err(_) => break,
            }
        }
    }
}

impl<R: BufRead> Iterator for ConlluReader<R> {
    type Item = Result<Sentence, ConlluError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut builder = SentenceBuilder::default();

        loop {
            let line = match self.lines.next() {
                None => break,
                Some(Err(e)) => return Some(Err(e.into())),
                Some(Ok(line)) => line,
            };
            self.line_no += 1;

            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                if builder.is_empty() {
                    continue;
                }
                break;
            }

            if let Err(e) = builder.push_line(line, self.line_no) {
                debug!(line = self.line_no, error = %e, "skipping malformed block");
                self.skip_block();
                return Some(Err(e));
            }
        }

        (!builder.is_empty()).then(|| Ok(builder.sentence))
    }
}

/// Parses a whole document, failing on the first malformed block.
pub fn parse_str(text: &str) -> Result<Vec<Sentence>, ConlluError> {
    ConlluReader::new(text.as_bytes()).collect()
}
