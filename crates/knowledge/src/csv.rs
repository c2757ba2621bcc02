//! Header-less CSV record reader.
//!
//! Supports the subset knowledge files actually use:
//!
//! ```text
//! hello,Hi there!
//! "how are you","Fine, thanks. And you?"
//! quote,"She said ""hi"""
//! ```
//!
//! Grammar (informal):
//! ```text
//! file    = record (NEWLINE record)*
//! record  = field ("," field)*
//! field   = QUOTED | BARE
//! QUOTED  = '"' (any char except '"' | '""')* '"'   (may span lines)
//! NEWLINE = "\n" | "\r\n" | "\r"
//! ```
//!
//! Blank lines are skipped. The reader never fails: an unterminated quote
//! runs to the end of the input, and field-count checks belong to the caller.

/// One parsed row and the line it started on (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Split CSV text into records, preserving order.
pub fn read_records(text: &str) -> Vec<Record> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = RecordReader::default();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if reader.in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    reader.field.push('"');
                }
                '"' => reader.in_quotes = false,
                '\n' => {
                    reader.line += 1;
                    reader.field.push(c);
                }
                _ => reader.field.push(c),
            }
            continue;
        }

        match c {
            '"' if reader.field.is_empty() => {
                reader.in_quotes = true;
                reader.quoted = true;
            }
            ',' => reader.end_field(),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => reader.end_record(),
            _ => reader.field.push(c),
        }
    }

    if !reader.field.is_empty() || !reader.fields.is_empty() || reader.quoted {
        reader.end_record();
    }

    reader.records
}

struct RecordReader {
    records: Vec<Record>,
    fields: Vec<String>,
    field: String,
    in_quotes: bool,
    // Any field of the current record was quoted, so `""` is not a blank line.
    quoted: bool,
    line: usize,
    record_line: usize,
}

impl Default for RecordReader {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            fields: Vec::new(),
            field: String::new(),
            in_quotes: false,
            quoted: false,
            line: 1,
            record_line: 1,
        }
    }
}

impl RecordReader {
    fn end_field(&mut self) {
        self.fields.push(std::mem::take(&mut self.field));
    }

    fn end_record(&mut self) {
        self.end_field();
        let fields = std::mem::take(&mut self.fields);

        let blank = !self.quoted && fields.len() == 1 && fields[0].is_empty();
        if !blank {
            self.records.push(Record {
                line: self.record_line,
                fields,
            });
        }

        self.quoted = false;
        self.line += 1;
        self.record_line = self.line;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(records: &[Record]) -> Vec<Vec<&str>> {
        records
            .iter()
            .map(|r| r.fields.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn reads_bare_fields() {
        let records = read_records("hello,Hi there!\nbye,Goodbye!\n");
        assert_eq!(
            fields(&records),
            vec![vec!["hello", "Hi there!"], vec!["bye", "Goodbye!"]]
        );
    }

    #[test]
    fn quoted_fields_keep_commas_and_escaped_quotes() {
        let records = read_records("\"how are you\",\"Fine, thanks.\"\nquote,\"She said \"\"hi\"\"\"");
        assert_eq!(records[0].fields, vec!["how are you", "Fine, thanks."]);
        assert_eq!(records[1].fields, vec!["quote", "She said \"hi\""]);
    }

    #[test]
    fn blank_lines_are_skipped_but_lines_are_counted() {
        let records = read_records("a,1\n\n\r\nb,2");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line, 1);
        assert_eq!(records[1].line, 4);
    }

    #[test]
    fn crlf_line_endings() {
        let records = read_records("a,1\r\nb,2\r\n");
        assert_eq!(fields(&records), vec![vec!["a", "1"], vec!["b", "2"]]);
    }

    #[test]
    fn quoted_newline_stays_in_field() {
        let records = read_records("multi,\"line one\nline two\"\nnext,row");
        assert_eq!(records[0].fields[1], "line one\nline two");
        assert_eq!(records[1].line, 3);
    }

    #[test]
    fn single_field_rows_are_reported() {
        let records = read_records("lonely\nok,fine");
        assert_eq!(records[0].fields, vec!["lonely"]);
        assert_eq!(records[1].fields.len(), 2);
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let records = read_records("\u{feff}hello,Hi");
        assert_eq!(records[0].fields[0], "hello");
    }

    #[test]
    fn empty_input_has_no_records() {
        assert!(read_records("").is_empty());
    }
}
