//! Line-oriented question/answer over any reader and writer.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Error)]
pub enum PromptError {
    /// Input closed before an answer arrived.
    #[error("end of input")]
    Eof,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Asks questions on `output` and reads one trimmed answer per line from
/// `input`. Unparseable answers are reported and asked again.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `text` followed by a newline.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Print `label` without a newline and read the answer.
    pub fn line(&mut self, label: &str) -> Result<String, PromptError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        // Bytes that are not UTF-8 decode to U+FFFD.
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Err(PromptError::Eof);
        }
        Ok(String::from_utf8_lossy(&raw).trim().to_string())
    }

    pub fn parse_with<T, E: Display>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> Result<T, E>,
    ) -> Result<T, PromptError> {
        loop {
            let answer = self.line(label)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(err) => self.say(&format!("Invalid input: {err}. Try again."))?,
            }
        }
    }

    pub fn value<T>(&mut self, label: &str) -> Result<T, PromptError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.parse_with(label, |s| s.parse::<T>())
    }

    /// Non-empty free text.
    pub fn text(&mut self, label: &str) -> Result<String, PromptError> {
        self.parse_with(label, |s| {
            if s.is_empty() {
                Err("value must not be empty")
            } else {
                Ok(s.to_string())
            }
        })
    }

    /// Blank answers become `None`.
    pub fn optional<T>(&mut self, label: &str) -> Result<Option<T>, PromptError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.parse_with(label, |s| {
            if s.is_empty() {
                Ok(None)
            } else {
                s.parse::<T>().map(Some)
            }
        })
    }

    /// Values separated by whitespace or commas.
    pub fn list<T>(&mut self, label: &str) -> Result<Vec<T>, PromptError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.parse_with(label, |s| {
            s.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|token| !token.is_empty())
                .map(str::parse::<T>)
                .collect::<Result<Vec<T>, _>>()
        })
    }

    pub fn date(&mut self, label: &str) -> Result<NaiveDate, PromptError> {
        self.parse_with(label, |s| NaiveDate::parse_from_str(s, DATE_FORMAT))
    }

    pub fn time(&mut self, label: &str) -> Result<NaiveTime, PromptError> {
        self.parse_with(label, |s| NaiveTime::parse_from_str(s, TIME_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(input: &str) -> Prompt<&[u8], Vec<u8>> {
        Prompt::new(input.as_bytes(), Vec::new())
    }

    fn printed(p: Prompt<&[u8], Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn reasks_until_the_answer_parses() {
        let mut p = prompt("abc\n-3\n35\n");
        assert_eq!(p.value::<u32>("Enter age: ").unwrap(), 35);
        let out = printed(p);
        assert_eq!(out.matches("Enter age: ").count(), 3);
        assert_eq!(out.matches("Invalid input").count(), 2);
    }

    #[test]
    fn closed_input_is_eof() {
        let mut p = prompt("");
        assert!(matches!(p.line("Name: "), Err(PromptError::Eof)));

        let mut p = prompt("oops\n");
        assert!(matches!(p.value::<u32>("Age: "), Err(PromptError::Eof)));
    }

    #[test]
    fn undecodable_bytes_are_an_invalid_answer() {
        let mut p = Prompt::new(&b"\xff\n12\n"[..], Vec::new());
        assert_eq!(p.line("Choice: ").unwrap(), "\u{fffd}");
        assert_eq!(p.value::<u32>("Age: ").unwrap(), 12);

        let mut p = Prompt::new(&b"\xfe\xff\n7\n"[..], Vec::new());
        assert_eq!(p.value::<u32>("Age: ").unwrap(), 7);
        assert!(printed(p).contains("Invalid input"));
    }

    #[test]
    fn dates_times_lists_and_blanks() {
        let mut p = prompt("2025-09-15\n09:30\n1, 3 4\n\n7\n   \nAda\n");
        assert_eq!(
            p.date("Date: ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 15).unwrap()
        );
        assert_eq!(
            p.time("Time: ").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert_eq!(p.list::<u32>("Ids: ").unwrap(), vec![1, 3, 4]);
        assert_eq!(p.optional::<u32>("Maybe: ").unwrap(), None);
        assert_eq!(p.optional::<u32>("Maybe: ").unwrap(), Some(7));
        assert_eq!(p.text("Name: ").unwrap(), "Ada");
    }
}
