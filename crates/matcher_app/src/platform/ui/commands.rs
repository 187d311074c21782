use std::path::PathBuf;

use matcher_core::{AppViewModel, Msg};
use thiserror::Error;

pub const HELP: &str = "\
Commands (groups and tags are numbered from 1 as shown; quote arguments with spaces):
  jd-file <path>             extract keywords from a JD document
  jd-text <text>             extract keywords from pasted JD text
  add-group                  append an empty group
  remove-group <g>           remove group g
  add <g> [keyword]          open the add-keyword input in group g (commit when given)
  edit <g> <t> [text]        edit tag t of group g (commit when given)
  type [text]                replace the text of the open input
  enter | esc | blur         confirm, cancel or leave the open input
  rm <g> <t>                 remove tag t of group g
  move <g> <t> <to> [pos]    drag tag t of group g into group `to` at position pos
  boolean                    generate the boolean query
  resume <path>              select the resume file
  target <0-100>             set the target match percentage
  pointers                   generate resume pointers
  save <path>                write a Markdown report
  show | wait | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    JdFile(PathBuf),
    JdText(String),
    AddGroup,
    RemoveGroup(usize),
    Add { group: usize, text: Option<String> },
    Edit {
        group: usize,
        tag: usize,
        text: Option<String>,
    },
    Type(String),
    Enter,
    Escape,
    Blur,
    Remove { group: usize, tag: usize },
    Move {
        group: usize,
        tag: usize,
        to: usize,
        position: Option<usize>,
    },
    Boolean,
    Resume(PathBuf),
    Target(u32),
    Pointers,
    Save(PathBuf),
    Show,
    Wait,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try `help`)")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    Usage {
        command: &'static str,
        expected: &'static str,
    },
    #[error("unbalanced quotes: {0}")]
    Quoting(String),
    #[error("'{0}' is not a positive number")]
    NotANumber(String),
    #[error("there is no group {0}")]
    NoSuchGroup(usize),
    #[error("group {group} has no tag {tag}")]
    NoSuchTag { group: usize, tag: usize },
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
///
/// Arguments are split shell-style, so quoted paths and keywords may contain
/// spaces. Free text after the positional arguments is rejoined with single
/// spaces.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let words = shell_words::split(line).map_err(|err| CommandError::Quoting(err.to_string()))?;
    let Some((name, args)) = words.split_first() else {
        return Ok(None);
    };

    let command = match name.as_str() {
        "jd-file" => Command::JdFile(required_path(args, "jd-file")?),
        "jd-text" => Command::JdText(args.join(" ")),
        "add-group" => Command::AddGroup,
        "remove-group" => {
            let [group] = numbers::<1>(args, "remove-group", "<g>")?;
            Command::RemoveGroup(group)
        }
        "add" => {
            let (head, text) = split_numbers(args, 1, "add", "<g> [keyword]")?;
            Command::Add {
                group: head[0],
                text,
            }
        }
        "edit" => {
            let (head, text) = split_numbers(args, 2, "edit", "<g> <t> [text]")?;
            Command::Edit {
                group: head[0],
                tag: head[1],
                text,
            }
        }
        "type" => Command::Type(args.join(" ")),
        "enter" => Command::Enter,
        "esc" | "escape" => Command::Escape,
        "blur" => Command::Blur,
        "rm" => {
            let [group, tag] = numbers::<2>(args, "rm", "<g> <t>")?;
            Command::Remove { group, tag }
        }
        "move" => {
            let values = args
                .iter()
                .map(|arg| parse_position(arg))
                .collect::<Result<Vec<_>, _>>()?;
            match values.as_slice() {
                [group, tag, to] => Command::Move {
                    group: *group,
                    tag: *tag,
                    to: *to,
                    position: None,
                },
                [group, tag, to, position] => Command::Move {
                    group: *group,
                    tag: *tag,
                    to: *to,
                    position: Some(*position),
                },
                _ => {
                    return Err(CommandError::Usage {
                        command: "move",
                        expected: "<g> <t> <to> [pos]",
                    })
                }
            }
        }
        "boolean" => Command::Boolean,
        "resume" => Command::Resume(required_path(args, "resume")?),
        "target" => {
            let value = match args {
                [value] => value.parse::<u32>().ok(),
                _ => None,
            }
            .ok_or(CommandError::Usage {
                command: "target",
                expected: "a number from 0 to 100",
            })?;
            Command::Target(value)
        }
        "pointers" => Command::Pointers,
        "save" => Command::Save(required_path(args, "save")?),
        "show" => Command::Show,
        "wait" => Command::Wait,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

impl Command {
    /// Translate an editor command into core messages, resolving positions
    /// against the view the user is looking at. Commands handled by the
    /// front-end itself (files, save, show, ...) yield no messages.
    pub fn to_msgs(&self, view: &AppViewModel) -> Result<Vec<Msg>, CommandError> {
        let msgs = match self {
            Command::JdText(text) => vec![Msg::JdTextCommitted(text.clone())],
            Command::AddGroup => vec![Msg::AddGroupClicked],
            Command::RemoveGroup(group) => vec![Msg::GroupRemoveClicked {
                group: group_id(view, *group)?,
            }],
            Command::Add { group, text } => {
                let mut msgs = vec![Msg::AddKeywordClicked {
                    group: group_id(view, *group)?,
                }];
                push_commit(&mut msgs, text);
                msgs
            }
            Command::Edit { group, tag, text } => {
                let mut msgs = vec![Msg::TagEditStarted {
                    tag: tag_id(view, *group, *tag)?,
                }];
                push_commit(&mut msgs, text);
                msgs
            }
            Command::Type(text) => vec![Msg::EditorInput(text.clone())],
            Command::Enter => vec![Msg::EditorConfirmed],
            Command::Escape => vec![Msg::EditorCancelled],
            Command::Blur => vec![Msg::EditorBlurred],
            Command::Remove { group, tag } => vec![Msg::TagRemoveClicked {
                tag: tag_id(view, *group, *tag)?,
            }],
            Command::Move {
                group,
                tag,
                to,
                position,
            } => vec![Msg::TagDropped {
                tag: tag_id(view, *group, *tag)?,
                group: group_id(view, *to)?,
                index: position.map_or(usize::MAX, |p| p - 1),
            }],
            Command::Boolean => vec![Msg::GenerateBooleanClicked],
            Command::Target(value) => vec![Msg::TargetMatchChanged(*value)],
            Command::Pointers => vec![Msg::GeneratePointersClicked],
            Command::JdFile(_)
            | Command::Resume(_)
            | Command::Save(_)
            | Command::Show
            | Command::Wait
            | Command::Help
            | Command::Quit => Vec::new(),
        };
        Ok(msgs)
    }
}

fn push_commit(msgs: &mut Vec<Msg>, text: &Option<String>) {
    if let Some(text) = text {
        msgs.push(Msg::EditorInput(text.clone()));
        msgs.push(Msg::EditorConfirmed);
    }
}

fn group_id(view: &AppViewModel, group: usize) -> Result<u64, CommandError> {
    view.group_at(group)
        .ok_or(CommandError::NoSuchGroup(group))
}

fn tag_id(view: &AppViewModel, group: usize, tag: usize) -> Result<u64, CommandError> {
    view.group_at(group)
        .ok_or(CommandError::NoSuchGroup(group))?;
    view.tag_at(group, tag)
        .ok_or(CommandError::NoSuchTag { group, tag })
}

fn required_path(args: &[String], command: &'static str) -> Result<PathBuf, CommandError> {
    match args {
        [path] => Ok(PathBuf::from(path)),
        _ => Err(CommandError::Usage {
            command,
            expected: "<path> (quote paths with spaces)",
        }),
    }
}

fn parse_position(raw: &str) -> Result<usize, CommandError> {
    match raw.parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(CommandError::NotANumber(raw.to_string())),
    }
}

fn numbers<const N: usize>(
    args: &[String],
    command: &'static str,
    expected: &'static str,
) -> Result<[usize; N], CommandError> {
    let values = args
        .iter()
        .map(|arg| parse_position(arg))
        .collect::<Result<Vec<_>, _>>()?;
    values
        .try_into()
        .map_err(|_| CommandError::Usage { command, expected })
}

/// Leading positions followed by optional free text.
fn split_numbers(
    args: &[String],
    count: usize,
    command: &'static str,
    expected: &'static str,
) -> Result<(Vec<usize>, Option<String>), CommandError> {
    if args.len() < count {
        return Err(CommandError::Usage { command, expected });
    }
    let (head, tail) = args.split_at(count);
    let head = head
        .iter()
        .map(|arg| parse_position(arg))
        .collect::<Result<Vec<_>, _>>()?;
    let text = (!tail.is_empty()).then(|| tail.join(" "));
    Ok((head, text))
}
