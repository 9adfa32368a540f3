mod archive_commands;
mod config;
mod render;
mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use xo_engine::archive::GameArchive;
use xo_engine::games::SessionRng;
use xo_engine::games::tictactoe::{GameSettings, GameState};
use xo_engine::id_generator::generate_bot_name;
use xo_engine::version::VERSION;
use xo_engine::{log, logger, GameId, PlayerId};

use config::{get_config_manager, Config, Validate};

#[derive(Parser)]
#[command(name = "xo", version = VERSION, about = "m,n,k tic-tac-toe against a minimax bot")]
struct Args {
    /// Config file, defaults to xo_config.yaml in the working directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    use_log_prefix: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play against the bot
    Play {
        #[arg(long)]
        size: Option<usize>,
        #[arg(long)]
        win: Option<usize>,
        /// Your name in this game
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bot_first: bool,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Let two bots play each other
    Autoplay {
        #[arg(long)]
        size: Option<usize>,
        #[arg(long)]
        win: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List saved games, newest first
    List,
    /// Replay a saved game move by move
    Inspect { id: String },
    /// Delete one saved game
    Delete { id: String },
    /// Delete all saved games
    Clear,
}

fn game_settings(config: &Config, size: Option<usize>, win: Option<usize>) -> Result<GameSettings, String> {
    let settings = GameSettings {
        board_size: size.unwrap_or(config.game.board_size),
        win_condition: win.unwrap_or(config.game.win_condition),
    };
    settings.validate()?;
    Ok(settings)
}

fn session_rng(seed: Option<u64>) -> SessionRng {
    seed.map(SessionRng::new).unwrap_or_else(SessionRng::from_random)
}

fn save_finished(config: &Config, archive: &GameArchive, game: &GameState) {
    if !config.archive.save {
        return;
    }
    match archive.save(game) {
        Ok(path) => println!("Saved as {} ({})", game.id(), path.display()),
        Err(e) => {
            log!("Failed to save game {}: {}", game.id(), e);
            eprintln!("Could not save game: {}", e);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("xo".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = match get_config_manager(args.config.as_deref()).get_config() {
        Ok(config) => config,
        Err(e) => {
            log!("Failed to load config: {}", e);
            return Err(e.into());
        }
    };
    let archive = GameArchive::new(&config.archive.location);

    match args.command {
        Command::Play { size, win, name, bot_first, seed } => {
            let settings = game_settings(&config, size, win)?;
            let mut rng = session_rng(seed);

            let human = PlayerId::new(name.unwrap_or_else(|| config.players.human_name.clone()));
            let bot = PlayerId::new(config.players.bot_name.clone());
            let bot_first = bot_first || config.players.first_player.bot_moves_first(&mut rng);
            let (player_x, player_o) = if bot_first {
                (bot, human.clone())
            } else {
                (human.clone(), bot)
            };

            let state = GameState::new(settings.board_size, settings.win_condition, player_x, player_o)?;
            let mut input = BufReader::new(tokio::io::stdin()).lines();
            if let Some(game) = session::run_game(state, &[human], &mut input, rng).await? {
                save_finished(&config, &archive, &game);
            }
        }
        Command::Autoplay { size, win, seed } => {
            let settings = game_settings(&config, size, win)?;
            let player_x = generate_bot_name();
            let mut player_o = generate_bot_name();
            while player_o == player_x {
                player_o = generate_bot_name();
            }

            let state = GameState::new(settings.board_size, settings.win_condition, player_x, player_o)?;
            let mut input = BufReader::new(tokio::io::empty()).lines();
            if let Some(game) = session::run_game(state, &[], &mut input, session_rng(seed)).await? {
                save_finished(&config, &archive, &game);
            }
        }
        Command::List => archive_commands::list_games(&archive)?,
        Command::Inspect { id } => archive_commands::inspect_game(&archive, &GameId::new(id))?,
        Command::Delete { id } => archive_commands::delete_game(&archive, &GameId::new(id))?,
        Command::Clear => archive_commands::clear_games(&archive)?,
    }

    Ok(())
}
