mod input;

use chrono::Local;
use clap::Parser;
use env_logger::Target;
use input::Command;
use log::{LevelFilter, info};
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use xiangqi::board::Board;
use xiangqi::display_format::{DisplayFormat, Glyphs};
use xiangqi::{Game, Side};

#[derive(Parser)]
#[command(about = "Two players sharing one terminal")]
struct Arguments {
    #[arg(long, help = "starting position in board text, ranks 10 to 1")]
    fen: Option<String>,

    #[arg(long, default_value_t = false, help = "black moves first")]
    black: bool,

    #[arg(long, default_value_t = false, help = "letters instead of chinese characters")]
    english: bool,

    #[arg(long, default_value_t = false, help = "no colours")]
    plain: bool,

    #[arg(long, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,

    #[arg(long, help = "append log lines to this file instead of stderr")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let arguments = Arguments::parse();
    init_logging(&arguments)?;

    let glyphs = if arguments.english { Glyphs::Letters } else { Glyphs::Chinese };
    DisplayFormat::set_terminal(glyphs, !arguments.plain);

    let turn = if arguments.black { Side::Black } else { Side::Red };
    let board = match &arguments.fen {
        Some(fen) => Board::from_fen(fen)?,
        None => Board::opening(),
    };
    let mut game = Game::new(board, turn)?;
    info!("starting from {}", game.board().fen());

    println!("{}", game.display(DisplayFormat::terminal()));
    if game.game_state().winner().is_some() {
        println!("{}", game.game_state().display(DisplayFormat::terminal()));
    }
    let stdin = std::io::stdin();

    loop {
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let command = match input::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                print!("{err}");
                continue;
            }
        };

        match command {
            Command::Play { from, to } => match game.play_notation(&from, &to) {
                Ok(()) => {
                    println!("{}", game.display(DisplayFormat::terminal()));
                    if game.game_state().winner().is_some() {
                        println!("{}", game.game_state().display(DisplayFormat::terminal()));
                    }
                }
                Err(err) => println!("{err}"),
            },
            Command::Check { side } => {
                let check = game.is_in_check(&side);
                println!("{side} in check: {check}");
            }
            Command::State => println!("{}", game.game_state().display(DisplayFormat::terminal())),
            Command::Moves => {
                let moves = game.legal_moves();
                let listed: Vec<String> = moves.iter().map(ToString::to_string).collect();
                println!("{} to move, {} moves: {}", game.side_to_move(), moves.len(), listed.join(" "));
            }
            Command::Show => println!("{}", game.display(DisplayFormat::terminal())),
            Command::Quit => return Ok(()),
        }
    }
}

fn init_logging(arguments: &Arguments) -> Result<(), Box<dyn Error>> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(arguments.log_level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{style}[{}] [{:5}]{style:#} {}",
                Local::now().format("%T%.3f"),
                record.level(),
                record.args(),
                style = buf.default_level_style(record.level()),
            )
        })
        .target(Target::Stderr);

    if let Some(path) = &arguments.log_file {
        let file = std::fs::OpenOptions::new().append(true).create(true).open(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    Ok(())
}
