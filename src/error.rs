use std::fmt::Display;
use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

pub const EX_USAGE: i32 = 64;
pub const EX_DATAERR: i32 = 65;
pub const EX_IOERR: i32 = 74;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    #[error("Unterminated string.")]
    UnterminatedString { line: u32 },
    #[error("Unexpected character: {character}")]
    UnexpectedCharacter { line: u32, character: char },
    #[error("Invalid number literal: {lexeme}")]
    InvalidNumberLiteral { line: u32, lexeme: String },
}

impl ScanError {
    pub fn line(&self) -> u32 {
        match self {
            ScanError::UnterminatedString { line }
            | ScanError::UnexpectedCharacter { line, .. }
            | ScanError::InvalidNumberLiteral { line, .. } => *line,
        }
    }

    pub fn report(&self) -> Report {
        let location = match self {
            ScanError::UnterminatedString { .. } => String::from("at end"),
            ScanError::UnexpectedCharacter { character, .. } => format!("at '{}'", character),
            ScanError::InvalidNumberLiteral { lexeme, .. } => format!("at '{}'", lexeme),
        };

        Report {
            line: self.line(),
            location: Some(location),
            message: self.to_string(),
        }
    }
}

/// What gets shown to the user when a scan fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub line: u32,
    pub location: Option<String>,
    pub message: String,
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(location) => write!(f, "[line {}] Error {}: {}", self.line, location, self.message),
            None => write!(f, "[line {}] Error: {}", self.line, self.message),
        }
    }
}

#[derive(Error, Debug)]
pub enum LoxError {
    #[error("Could not read source: {0}")]
    Io(#[from] io::Error),
    #[error("Source is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
    #[error("{}", .0.report())]
    Scan(#[from] ScanError),
}

impl LoxError {
    pub fn exit_code(&self) -> i32 {
        match self {
            LoxError::Io(_) => EX_IOERR,
            LoxError::Utf8(_) | LoxError::Scan(_) => EX_DATAERR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_formatting() {
        let err = ScanError::UnexpectedCharacter {
            line: 4,
            character: '@',
        };
        assert_eq!(err.line(), 4);
        assert_eq!(
            err.report().to_string(),
            "[line 4] Error at '@': Unexpected character: @"
        );

        let err = ScanError::UnterminatedString { line: 1 };
        assert_eq!(
            err.report().to_string(),
            "[line 1] Error at end: Unterminated string."
        );
    }

    #[test]
    fn test_report_without_location() {
        let report = Report {
            line: 2,
            location: None,
            message: String::from("Something broke."),
        };
        assert_eq!(report.to_string(), "[line 2] Error: Something broke.");
    }

    #[test]
    fn test_exit_codes() {
        let scan: LoxError = ScanError::UnterminatedString { line: 1 }.into();
        assert_eq!(scan.exit_code(), 65);
        assert_eq!(scan.to_string(), "[line 1] Error at end: Unterminated string.");

        let io: LoxError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert_eq!(io.exit_code(), 74);

        let utf8: LoxError = String::from_utf8(vec![0xff]).unwrap_err().into();
        assert_eq!(utf8.exit_code(), 65);
    }
}
