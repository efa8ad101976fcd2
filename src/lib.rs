pub mod error;
pub mod keywords;
pub mod runner;
pub mod scanner;
pub mod token;

pub use error::{LoxError, Report, ScanError};
pub use scanner::{scan, Scanner};
pub use token::{Literal, Token, TokenType};
