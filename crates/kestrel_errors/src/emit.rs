//! Rendering errors to a terminal.

use crate::ParseError;
use codespan_reporting::files::{Error, SimpleFile};
use codespan_reporting::term::{self, termcolor::WriteColor, Config};

/// Render `error` against the file it came from.
pub fn emit(
    writer: &mut dyn WriteColor,
    name: &str,
    source: &str,
    error: &ParseError,
) -> Result<(), Error> {
    let file = SimpleFile::new(name, source);
    term::emit(writer, &Config::default(), &file, &error.to_diagnostic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use codespan_reporting::term::termcolor::NoColor;

    #[test]
    fn renders_message_and_location() {
        let source = "let x = 08n;";
        let err = ParseError::new(ErrorKind::InvalidBigInt, 8..11, source);
        let mut out = NoColor::new(Vec::new());
        emit(&mut out, "main.js", source, &err).unwrap();

        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.contains("error: invalid BigInt literal"));
        assert!(text.contains("main.js:1:9"));
    }
}
