use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::core::ast::Node;
use crate::core::parsers::json_tree::parse_tree;
use crate::core::parsers::{ParseError, TemplateParser};

/// Placeholder replaced by the template's file path in a parser command.
pub const FILE_PLACEHOLDER: &str = "{file}";

/// Delegates parsing to an external program.
///
/// The template is written to the program's stdin and a serialized node tree
/// is expected on its stdout. The command line is split on whitespace;
/// a `{file}` argument is replaced with the template's path.
#[derive(Debug, Clone)]
pub struct CommandParser {
    command: String,
}

impl CommandParser {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn spawn_error(&self, source: io::Error) -> ParseError {
        ParseError::Spawn {
            command: self.command.clone(),
            source,
        }
    }
}

impl TemplateParser for CommandParser {
    fn parse(&self, template: &str, file_path: &Path) -> Result<Vec<Node>, ParseError> {
        let path = file_path.display().to_string();
        let mut parts = self.command.split_whitespace();
        let program = parts.next().ok_or_else(|| ParseError::MissingCommand {
            path: path.clone(),
        })?;
        let args: Vec<&str> = parts
            .map(|arg| if arg == FILE_PLACEHOLDER { path.as_str() } else { arg })
            .collect();

        debug!(command = %self.command, file = %path, "running parser command");

        let mut child = Command::new(program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let stdin = child.stdin.take();
        let (output, written) = std::thread::scope(|scope| {
            // Dropping stdin at the end of the thread closes the pipe.
            let writer =
                stdin.map(|mut stdin| scope.spawn(move || stdin.write_all(template.as_bytes())));
            let output = child.wait_with_output();
            let written = match writer {
                Some(writer) => writer
                    .join()
                    .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked"))),
                None => Ok(()),
            };
            (output, written)
        });
        let output = output.map_err(|e| self.spawn_error(e))?;

        // A parser may exit without reading all of its input.
        match written {
            Err(e) if e.kind() != io::ErrorKind::BrokenPipe => return Err(self.spawn_error(e)),
            Err(e) => debug!(command = %self.command, error = %e, "parser closed stdin early"),
            Ok(()) => {}
        }

        if !output.status.success() {
            return Err(ParseError::Command {
                command: self.command.clone(),
                path,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_tree(&stdout).map_err(|source| ParseError::Tree { path, source })
    }
}
