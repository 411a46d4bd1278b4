/*!
Diagnostic reformatting.

glslang reports problems as newline-delimited text, usually prefixed
with `ERROR: ` and sometimes carrying a `line:col` pair; SPIRV-Tools
reports structured records. Both get rendered here into `path:...`
lines suitable for editors and build logs.
*/

use std::path::Path;

use spirv_tools::error::Diagnostic;

/// Reformat a front-end info/debug log into `path:line:col message`
/// lines.
///
/// Every non-empty log line yields one output line. A leading
/// `ERROR: ` marker is dropped. Only the first space-delimited token
/// is examined for a location: it is accepted when splitting it on
/// `:` gives exactly two non-empty components with nothing trailing,
/// so glslang's `0:12:` form stays part of the message text.
pub fn format_frontend_log(path: &Path, log: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for line in log.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let line = line.strip_prefix("ERROR: ").unwrap_or(line);
        let (location, message) = split_location(line);
        lines.push(format!("{}:{} {}", path.display(), location, message.trim()));
    }
    lines
}

/// Split a log line into its leading `line:col` token (or `""`) and
/// the remaining message text.
fn split_location(line: &str) -> (&str, &str) {
    if let Some((token, rest)) = line.split_once(' ') {
        if is_location(token) {
            return (token, rest);
        }
    }
    ("", line)
}

fn is_location(token: &str) -> bool {
    let mut parts = token.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(line), Some(column), None) => !line.is_empty() && !column.is_empty(),
        _ => false,
    }
}

/// Render one validator diagnostic against the module's source path.
///
/// Text-source records carry an editor-style location; the validator
/// counts lines from zero, so the line is bumped by one. Binary
/// records carry a word index instead, and records with neither fall
/// back to the bare path.
pub fn format_validator_diagnostic(path: &Path, diagnostic: &Diagnostic) -> String {
    if diagnostic.is_text {
        format!(
            "{}:{}:{}: {}",
            path.display(),
            diagnostic.line + 1,
            diagnostic.column,
            diagnostic.message
        )
    } else if diagnostic.index != 0 {
        format!(
            "{}[{}] {}",
            path.display(),
            diagnostic.index,
            diagnostic.message
        )
    } else {
        format!("{}: {}", path.display(), diagnostic.message)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use spirv_tools::error::Diagnostic;

    use super::{format_frontend_log, format_validator_diagnostic};

    fn frag(log: &str) -> Vec<String> {
        format_frontend_log(Path::new("shader.frag"), log)
    }

    #[test]
    fn error_line_with_location() {
        assert_eq!(
            frag("ERROR: 3:5 undefined identifier 'foo'\n"),
            vec!["shader.frag:3:5 undefined identifier 'foo'"]
        );
    }

    #[test]
    fn plain_note_has_no_location() {
        assert_eq!(frag("some note\n"), vec!["shader.frag: some note"]);
    }

    #[test]
    fn empty_log_emits_nothing() {
        assert!(frag("").is_empty());
        assert!(frag("\n\n  \n").is_empty());
    }

    #[test]
    fn trailing_colon_token_is_message_text() {
        // glslang's own location form has a trailing colon; the strict
        // two-component rule leaves it in the message.
        assert_eq!(
            frag("ERROR: 0:12: 'main' : illegal use\n"),
            vec!["shader.frag: 0:12: 'main' : illegal use"]
        );
    }

    #[test]
    fn repeated_error_marker_is_stripped_once() {
        assert_eq!(
            frag("ERROR: ERROR: is the message\n"),
            vec!["shader.frag: ERROR: is the message"]
        );
    }

    #[test]
    fn colons_later_in_the_message_are_kept() {
        assert_eq!(
            frag("ERROR: 1:2 expected ':' after case label\n"),
            vec!["shader.frag:1:2 expected ':' after case label"]
        );
    }

    #[test]
    fn multiple_lines_in_order() {
        assert_eq!(
            frag("ERROR: 3:5 one\ntwo\n"),
            vec!["shader.frag:3:5 one", "shader.frag: two"]
        );
    }

    fn diagnostic() -> Diagnostic {
        Diagnostic {
            line: 0,
            column: 0,
            index: 0,
            message: String::from("bad module"),
            notes: String::new(),
            is_text: false,
        }
    }

    #[test]
    fn text_source_presentation() {
        let diagnostic = Diagnostic {
            line: 4,
            column: 2,
            is_text: true,
            ..diagnostic()
        };
        assert_eq!(
            format_validator_diagnostic(Path::new("shader.frag"), &diagnostic),
            "shader.frag:5:2: bad module"
        );
    }

    #[test]
    fn binary_index_presentation() {
        let diagnostic = Diagnostic {
            index: 17,
            ..diagnostic()
        };
        assert_eq!(
            format_validator_diagnostic(Path::new("shader.frag"), &diagnostic),
            "shader.frag[17] bad module"
        );
    }

    #[test]
    fn bare_presentation() {
        assert_eq!(
            format_validator_diagnostic(Path::new("shader.frag"), &diagnostic()),
            "shader.frag: bad module"
        );
    }
}
