//! Maps one line of terminal input to a core message, resolving list
//! positions against the view model the user is looking at.

use downloads_core::{AppViewModel, Msg, ProjectRowView, Screen};

pub const HELP: &str = "\
Commands:
  list | refresh          reload the project list
  view <n>                open the transcript of project <n>
  back                    return to the project list
  copy                    copy the open transcript to the clipboard
  download [<n>]          save the transcript of project <n> (or the open one)
  audio <n> [<k>]         save audio file <k> (default 1) of project <n>
  delete [<n>]            delete project <n> (or the open one)
  yes | no                answer a delete confirmation
  help                    show this help
  quit                    exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    Help,
    Quit,
    Redraw,
}

pub fn parse(line: &str, view: &AppViewModel) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Command::Redraw);
    };
    let args: Vec<&str> = words.collect();
    let verb = verb.to_ascii_lowercase();

    if view.delete_prompt.is_some() {
        return match verb.as_str() {
            "y" | "yes" => Ok(Command::Dispatch(Msg::DeleteConfirmed)),
            "n" | "no" => Ok(Command::Dispatch(Msg::DeleteCancelled)),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            _ => Err("Please answer yes or no.".to_string()),
        };
    }

    match verb.as_str() {
        "l" | "list" | "r" | "refresh" => Ok(Command::Dispatch(Msg::RefreshRequested)),
        "v" | "view" => {
            let row = row_arg(view, args.first())?;
            if !row.can_view_transcript {
                return Err(format!("{} has no transcript.", row.title));
            }
            Ok(Command::Dispatch(Msg::ProjectSelected {
                project_id: row.project_id.clone(),
            }))
        }
        "b" | "back" => Ok(Command::Dispatch(Msg::BackToList)),
        "c" | "copy" => match view.screen {
            Screen::Transcript => Ok(Command::Dispatch(Msg::CopyTranscriptClicked)),
            Screen::List => Err("Open a transcript first.".to_string()),
        },
        "d" | "download" => {
            let project_id = target_project(view, args.first())?;
            Ok(Command::Dispatch(Msg::DownloadTranscriptClicked { project_id }))
        }
        "a" | "audio" => {
            let row = row_arg(view, args.first())?;
            let index = match args.get(1) {
                Some(raw) => parse_position(raw)?,
                None => 1,
            };
            let filename = row
                .audio_files
                .get(index - 1)
                .ok_or_else(|| format!("{} has no audio file {index}.", row.title))?;
            Ok(Command::Dispatch(Msg::DownloadAudioClicked {
                project_id: row.project_id.clone(),
                filename: filename.clone(),
            }))
        }
        "delete" | "rm" => {
            let project_id = target_project(view, args.first())?;
            Ok(Command::Dispatch(Msg::DeleteRequested { project_id }))
        }
        "h" | "help" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("Unknown command \"{other}\". Type help for a list.")),
    }
}

/// Project addressed by an explicit position, or the open transcript.
fn target_project(view: &AppViewModel, arg: Option<&&str>) -> Result<String, String> {
    match (arg, &view.transcript) {
        (None, Some(transcript)) if view.screen == Screen::Transcript => {
            Ok(transcript.project_id.clone())
        }
        _ => row_arg(view, arg).map(|row| row.project_id.clone()),
    }
}

fn row_arg<'a>(view: &'a AppViewModel, arg: Option<&&str>) -> Result<&'a ProjectRowView, String> {
    let raw = arg.ok_or_else(|| "Which project? Give its number from the list.".to_string())?;
    let position = parse_position(raw)?;
    view.row(position)
        .ok_or_else(|| format!("No project at position {position}."))
}

fn parse_position(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(format!("\"{raw}\" is not a list position.")),
    }
}
