//! Application message types for MRLabel.
//!
//! Every user action is a [`Message`] handled by `LabelerApp::update`, which
//! answers with a [`Reply`]. Messages can be parsed from command lines so the
//! same handlers serve an interactive session, a script file, or tests.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::db::StoredAnnotation;
use crate::model::AnnotationTable;

/// Messages that can be sent to update application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Form
    /// Set the file path field
    SetFile(String),
    /// Set the label field
    SetLabel(String),
    /// Open the native file dialog and fill the file path field
    Browse,
    /// Store the form fields as an annotation
    Submit,
    /// Store an annotation directly, bypassing the form
    Add { file: String, label: String },

    // Store
    /// Show all annotations as a table
    View,
    /// Export annotations with a registered format
    Export {
        /// Format id ("csv", "pdf", "json")
        format: String,
        /// Output path; defaults to the format's file in the export folder
        path: Option<PathBuf>,
    },
    /// Append annotations from a previously exported file
    Import { path: PathBuf },
    /// Upload annotations to the configured database
    Upload,
    /// Show the rows earlier uploads stored in the database
    Db,

    // Session
    /// Show form contents, store size and upload target
    Status,
    /// Show command help
    Help,
    /// End the session
    Quit,
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A titled message for the user, the equivalent of a message box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, message)
    }

    fn new(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Answer to a [`Message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing to show beyond new output-log lines
    None,
    /// Show a notice
    Notice(Notice),
    /// Show the annotation table
    Table(AnnotationTable),
    /// Show rows read back from the upload table
    Stored {
        table: String,
        count: usize,
        rows: Vec<StoredAnnotation>,
    },
    /// Show free-form text (status, help)
    Text(String),
    /// The session should end
    Quit,
}

impl Reply {
    /// The notice carried by this reply, if any.
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Reply::Notice(notice) => Some(notice),
            _ => None,
        }
    }
}

/// Errors produced while parsing a command line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}' (type 'help' for a list)")]
    UnknownCommand(String),

    #[error("'{command}' needs a {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{command}' takes at most {max} argument(s)")]
    TooManyArguments { command: &'static str, max: usize },

    #[error("Unterminated quote")]
    UnterminatedQuote,
}

/// Split a command line into words.
///
/// Single and double quotes group words; inside double quotes a backslash
/// escapes the next character.
pub fn tokenize(line: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped) => current.push(escaped),
                            None => return Err(ParseError::UnterminatedQuote),
                        },
                        Some(other) => current.push(other),
                        None => return Err(ParseError::UnterminatedQuote),
                    }
                }
            }
            '\'' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(other) => current.push(other),
                        None => return Err(ParseError::UnterminatedQuote),
                    }
                }
            }
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            other => {
                in_token = true;
                current.push(other);
            }
        }
    }

    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

fn at_most(command: &'static str, args: &[String], max: usize) -> Result<(), ParseError> {
    if args.len() > max {
        Err(ParseError::TooManyArguments { command, max })
    } else {
        Ok(())
    }
}

fn no_args(
    command: &'static str,
    args: &[String],
    message: Message,
) -> Result<Message, ParseError> {
    at_most(command, args, 0)?;
    Ok(message)
}

/// Value of a single-field command: the text after the command word.
///
/// Unquoted text is kept as typed, inner whitespace included. A quoted value
/// is taken from the tokenizer with its quotes removed.
fn field_value(line: &str, args: &[String]) -> String {
    let rest = line
        .trim_start()
        .split_once(char::is_whitespace)
        .map_or("", |(_, rest)| rest)
        .trim();
    if rest.starts_with('"') || rest.starts_with('\'') {
        args.join(" ")
    } else {
        rest.to_string()
    }
}

impl FromStr for Message {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(line)?;
        let Some((command, args)) = tokens.split_first() else {
            return Err(ParseError::Empty);
        };

        match command.to_ascii_lowercase().as_str() {
            "file" => Ok(Message::SetFile(field_value(line, args))),
            "label" => Ok(Message::SetLabel(field_value(line, args))),
            "browse" => no_args("browse", args, Message::Browse),
            "submit" => no_args("submit", args, Message::Submit),
            "add" => match args {
                [] => Err(ParseError::MissingArgument {
                    command: "add",
                    argument: "file",
                }),
                [_] => Err(ParseError::MissingArgument {
                    command: "add",
                    argument: "label",
                }),
                [file, label @ ..] => Ok(Message::Add {
                    file: file.clone(),
                    label: label.join(" "),
                }),
            },
            "view" | "list" => no_args("view", args, Message::View),
            "export" => {
                at_most("export", args, 2)?;
                let format = args.first().ok_or(ParseError::MissingArgument {
                    command: "export",
                    argument: "format",
                })?;
                Ok(Message::Export {
                    format: format.to_ascii_lowercase(),
                    path: args.get(1).map(PathBuf::from),
                })
            }
            "import" => {
                at_most("import", args, 1)?;
                let path = args.first().ok_or(ParseError::MissingArgument {
                    command: "import",
                    argument: "path",
                })?;
                Ok(Message::Import {
                    path: PathBuf::from(path),
                })
            }
            "upload" => no_args("upload", args, Message::Upload),
            "db" => no_args("db", args, Message::Db),
            "status" => no_args("status", args, Message::Status),
            "help" | "?" => Ok(Message::Help),
            "quit" | "exit" => no_args("quit", args, Message::Quit),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokenize(r#"add "/tmp/my photo.jpg" 'a cat'"#).unwrap(),
            vec!["add", "/tmp/my photo.jpg", "a cat"]
        );
        assert_eq!(
            tokenize(r#"label "say \"hi\"""#).unwrap(),
            vec!["label", r#"say "hi""#]
        );
        assert_eq!(tokenize("  spaced   out  ").unwrap(), vec!["spaced", "out"]);
        assert_eq!(tokenize(r#"file """#).unwrap(), vec!["file", ""]);
        assert_eq!(tokenize(r#"file "open"#), Err(ParseError::UnterminatedQuote));
    }

    #[test]
    fn test_parse_form_commands() {
        assert_eq!(
            "file /tmp/photo.jpg".parse::<Message>(),
            Ok(Message::SetFile("/tmp/photo.jpg".to_string()))
        );
        assert_eq!(
            "label very good review".parse::<Message>(),
            Ok(Message::SetLabel("very good review".to_string()))
        );
        assert_eq!("label".parse::<Message>(), Ok(Message::SetLabel(String::new())));
        assert_eq!(
            "file /tmp/a  b.png".parse::<Message>(),
            Ok(Message::SetFile("/tmp/a  b.png".to_string()))
        );
        assert_eq!(
            "label   two  spaces  ".parse::<Message>(),
            Ok(Message::SetLabel("two  spaces".to_string()))
        );
        assert_eq!(
            r#"file "/tmp/my photo.jpg""#.parse::<Message>(),
            Ok(Message::SetFile("/tmp/my photo.jpg".to_string()))
        );
        assert_eq!(
            r#"label "  padded  ""#.parse::<Message>(),
            Ok(Message::SetLabel("  padded  ".to_string()))
        );
        assert_eq!("SUBMIT".parse::<Message>(), Ok(Message::Submit));
        assert_eq!("browse".parse::<Message>(), Ok(Message::Browse));
        assert_eq!("db".parse::<Message>(), Ok(Message::Db));
    }

    #[test]
    fn test_parse_add() {
        assert_eq!(
            "add /tmp/clip.wav dog bark".parse::<Message>(),
            Ok(Message::Add {
                file: "/tmp/clip.wav".to_string(),
                label: "dog bark".to_string(),
            })
        );
        assert_eq!(
            "add /tmp/clip.wav".parse::<Message>(),
            Err(ParseError::MissingArgument {
                command: "add",
                argument: "label"
            })
        );
    }

    #[test]
    fn test_parse_export_and_import() {
        assert_eq!(
            "export CSV".parse::<Message>(),
            Ok(Message::Export {
                format: "csv".to_string(),
                path: None
            })
        );
        assert_eq!(
            "export pdf out/report.pdf".parse::<Message>(),
            Ok(Message::Export {
                format: "pdf".to_string(),
                path: Some(PathBuf::from("out/report.pdf"))
            })
        );
        assert!(matches!(
            "export".parse::<Message>(),
            Err(ParseError::MissingArgument { .. })
        ));
        assert_eq!(
            "import saved.json".parse::<Message>(),
            Ok(Message::Import {
                path: PathBuf::from("saved.json")
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Message>(), Err(ParseError::Empty));
        assert_eq!(
            "frobnicate".parse::<Message>(),
            Err(ParseError::UnknownCommand("frobnicate".to_string()))
        );
        assert_eq!(
            "upload now".parse::<Message>(),
            Err(ParseError::TooManyArguments {
                command: "upload",
                max: 0
            })
        );
    }
}
