//! Command line parsing for the interactive session

use std::str::FromStr;
use std::time::Duration;
use tunequeue_core::SongId;

use crate::error::{ConsoleError, Result};

pub const HELP: &str = "\
commands:
  songs               list the song library
  select <id>         select a song
  add [id]            request a song (default: selection)
  play [id]           play a song now (default: selection)
  next                serve the next request
  clear               drop all pending requests
  clear-history       forget recent plays
  toggle              play / pause
  stop                stop and rewind
  seek <percent>      jump within the current song
  tick <seconds>      let time pass
  end                 finish the current song
  fail [message]      simulate a device error
  show                print the player state
  dump                print the player state as JSON
  help                show this text
  quit                leave
";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Songs,
    Select(SongId),
    Add(Option<SongId>),
    Play(Option<SongId>),
    Next,
    Clear,
    ClearHistory,
    Toggle,
    Stop,
    /// Percent of the current song, 0 - 100
    Seek(f64),
    Tick(Duration),
    End,
    Fail(String),
    Show,
    Dump,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ConsoleError;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match name.as_str() {
            "songs" | "ls" => Command::Songs,
            "select" => Command::Select(required_id("select", &args)?),
            "add" | "request" => Command::Add(args.first().map(|id| SongId::new(*id))),
            "play" => Command::Play(args.first().map(|id| SongId::new(*id))),
            "next" | "serve" => Command::Next,
            "clear" => Command::Clear,
            "clear-history" => Command::ClearHistory,
            "toggle" | "pause" => Command::Toggle,
            "stop" => Command::Stop,
            "seek" => Command::Seek(number("seek", &args)?),
            "tick" => {
                let seconds: f64 = number("tick", &args)?;
                let elapsed = Duration::try_from_secs_f64(seconds)
                    .map_err(|err| ConsoleError::invalid_argument("tick", err.to_string()))?;
                Command::Tick(elapsed)
            }
            "end" => Command::End,
            "fail" if args.is_empty() => Command::Fail("device error".to_string()),
            "fail" => Command::Fail(args.join(" ")),
            "show" | "status" => Command::Show,
            "dump" => Command::Dump,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(ConsoleError::UnknownCommand(name)),
        };

        Ok(command)
    }
}

fn required_id(command: &str, args: &[&str]) -> Result<SongId> {
    args.first()
        .map(|id| SongId::new(*id))
        .ok_or_else(|| ConsoleError::invalid_argument(command, "expected a song id"))
}

fn number<T: FromStr>(command: &str, args: &[&str]) -> Result<T> {
    let raw = args
        .first()
        .ok_or_else(|| ConsoleError::invalid_argument(command, "expected a number"))?;
    raw.parse()
        .map_err(|_| ConsoleError::invalid_argument(command, format!("`{}` is not a number", raw)))
}
