//! Uploaded-file parsing for batch prediction.
//!
//! Two input shapes are accepted:
//! - `*.csv`: a header row naming a `URL` column, comma-separated fields
//!   with optional double-quote quoting;
//! - anything else: a headerless list, one URL per line.
//!
//! Parsing failures are whole-file failures: the caller renders the error
//! and must not touch the session history.

use thiserror::Error;

/// Whole-file parse failures. Per-row classification failures are handled
/// by the batch handler, not here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("file is not valid UTF-8 text")]
    NotUtf8,

    #[error("file is empty")]
    Empty,

    #[error("CSV header has no URL column")]
    MissingUrlColumn,

    #[error("malformed CSV row on line {0}")]
    MalformedRow(usize),
}

/// Parse an uploaded file into a list of trimmed URL strings, in file order.
///
/// Rows that are entirely blank are skipped; a row whose URL field is the
/// empty string is kept (it classifies like any other string).
pub fn parse_urls(filename: &str, bytes: &[u8]) -> Result<Vec<String>, BatchError> {
    let text = std::str::from_utf8(bytes).map_err(|_| BatchError::NotUtf8)?;
    if text.trim().is_empty() {
        return Err(BatchError::Empty);
    }

    if has_csv_extension(filename) {
        parse_csv(text)
    } else {
        Ok(parse_plain(text))
    }
}

fn has_csv_extension(filename: &str) -> bool {
    filename
        .rsplit('.')
        .next()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        && filename.contains('.')
}

/// Headerless single column: every non-blank line is one URL.
fn parse_plain(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// CSV with a header row; URLs are taken from the `URL` column.
fn parse_csv(text: &str) -> Result<Vec<String>, BatchError> {
    let mut lines = text.lines().enumerate();

    let (_, header) = lines.next().ok_or(BatchError::Empty)?;
    let header_fields = split_csv_row(header, 1)?;
    let url_index = header_fields
        .iter()
        .position(|field| field.trim().eq_ignore_ascii_case("url"))
        .ok_or(BatchError::MissingUrlColumn)?;

    let mut urls = Vec::new();
    for (i, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = i + 1;
        let fields = split_csv_row(line, line_no)?;
        let url = fields
            .get(url_index)
            .ok_or(BatchError::MalformedRow(line_no))?;
        urls.push(url.trim().to_string());
    }
    Ok(urls)
}

/// Split one CSV line into fields. Supports double-quoted fields with `""`
/// escapes; an unterminated quote is a malformed row.
fn split_csv_row(line: &str, line_no: usize) -> Result<Vec<String>, BatchError> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    if in_quotes {
        return Err(BatchError::MalformedRow(line_no));
    }
    fields.push(field);
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_file_is_one_url_per_line() {
        let urls = parse_urls("urls.txt", b"http://a.com\n  http://b.com  \n\nhttp://c.com\n")
            .unwrap();
        assert_eq!(urls, vec!["http://a.com", "http://b.com", "http://c.com"]);
    }

    #[test]
    fn csv_file_uses_url_column() {
        let data = b"id,URL,notes\n1,http://a.com,first\n2,http://b.com,second\n";
        let urls = parse_urls("batch.csv", data).unwrap();
        assert_eq!(urls, vec!["http://a.com", "http://b.com"]);
    }

    #[test]
    fn csv_extension_is_case_insensitive() {
        let urls = parse_urls("BATCH.CSV", b"URL\nhttp://a.com\n").unwrap();
        assert_eq!(urls, vec!["http://a.com"]);
    }

    #[test]
    fn csv_quoted_fields() {
        let data = b"URL,notes\n\"http://a.com/x,y\",\"says \"\"hi\"\"\"\n";
        let urls = parse_urls("batch.csv", data).unwrap();
        assert_eq!(urls, vec!["http://a.com/x,y"]);
    }

    #[test]
    fn csv_without_url_column_is_rejected() {
        let err = parse_urls("batch.csv", b"id,host\n1,a.com\n").unwrap_err();
        assert_eq!(err, BatchError::MissingUrlColumn);
    }

    #[test]
    fn csv_unterminated_quote_is_malformed() {
        let err = parse_urls("batch.csv", b"URL\n\"http://a.com\n").unwrap_err();
        assert_eq!(err, BatchError::MalformedRow(2));
    }

    #[test]
    fn csv_short_row_is_malformed() {
        let err = parse_urls("batch.csv", b"id,URL\n1\n").unwrap_err();
        assert_eq!(err, BatchError::MalformedRow(2));
    }

    #[test]
    fn empty_file_is_rejected() {
        assert_eq!(parse_urls("urls.txt", b"").unwrap_err(), BatchError::Empty);
        assert_eq!(
            parse_urls("batch.csv", b"  \n \n").unwrap_err(),
            BatchError::Empty
        );
    }

    #[test]
    fn binary_file_is_rejected() {
        let err = parse_urls("urls.txt", &[0xff, 0xfe, 0x00]).unwrap_err();
        assert_eq!(err, BatchError::NotUtf8);
    }

    #[test]
    fn urls_are_trimmed_and_kept_in_file_order() {
        let data = b"URL\n http://z.com \nhttp://a.com\n";
        let urls = parse_urls("batch.csv", data).unwrap();
        assert_eq!(urls, vec!["http://z.com", "http://a.com"]);
    }
}
