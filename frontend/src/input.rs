use clap::{Parser, Subcommand};
use xiangqi::Move;

#[derive(Subcommand, Debug, Eq, PartialEq)]
pub enum Command {
    #[command(alias = "p", about = "move a piece, e.g. `play h1 g3`")]
    Play { from: String, to: String },
    #[command(about = "whether a side is in check, may end the game")]
    Check { side: String },
    #[command(about = "show whether the game is decided")]
    State,
    #[command(about = "list the moves available to the side to move")]
    Moves,
    #[command(about = "print the board")]
    Show,
    #[command(alias = "exit", about = "leave")]
    Quit,
}

#[derive(Parser)]
#[command(
    name = "",
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true,
    next_line_help = false,
    help_template = "{usage-heading} {usage}\n{all-args}"
)]
struct Input {
    #[command(subcommand)]
    command: Command,
}

/// Reads one line of input. A lone move such as `h1g3` is shorthand for
/// `play h1 g3`; blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, clap::Error> {
    let line = line.trim().to_ascii_lowercase();
    let parts: Vec<&str> = line.split_whitespace().collect();

    match parts.as_slice() {
        [] => return Ok(None),
        [single] => {
            if let Ok(mv) = single.parse::<Move>() {
                return Ok(Some(Command::Play {
                    from: mv.from.to_string(),
                    to: mv.to.to_string(),
                }));
            }
        }
        _ => {}
    }

    Input::try_parse_from(parts).map(|Input { command }| Some(command))
}
