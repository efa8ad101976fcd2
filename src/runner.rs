use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::LoxError;
use crate::scanner::scan;

/// Scan `source` and print one `[kind lexeme literal]` line per token.
///
/// Nothing is written when scanning fails.
pub fn run<W: Write>(source: &str, out: &mut W) -> Result<(), LoxError> {
    let tokens = scan(source)?;
    for token in &tokens {
        writeln!(out, "{}", token)?;
    }
    out.flush()?;

    Ok(())
}

/// Read lines from `input` until it runs dry, printing the tokens of each.
///
/// A line that is not UTF-8 or fails to scan is reported on `errors` and the
/// session carries on. Only I/O failures end it early.
pub fn prompt<R, W, E>(input: &mut R, out: &mut W, errors: &mut E) -> Result<(), LoxError>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    loop {
        out.write_all(b"> ")?;
        out.flush()?;

        let mut buf = Vec::new();
        if input.read_until(b'\n', &mut buf)? == 0 {
            debug!("end of input, leaving prompt");
            writeln!(out)?;
            return Ok(());
        }

        let result = String::from_utf8(buf)
            .map_err(LoxError::from)
            .and_then(|line| run(&line, out));
        match result {
            Ok(()) => {}
            Err(err @ (LoxError::Utf8(_) | LoxError::Scan(_))) => {
                debug!(error = %err, "line rejected at prompt");
                writeln!(errors, "{}", err)?;
                errors.flush()?;
            }
            Err(err) => return Err(err),
        }
    }
}
