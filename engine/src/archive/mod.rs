mod error;
pub mod file_io;
pub mod player;
pub mod store;

pub use error::ArchiveError;
pub use file_io::{generate_archive_filename, load_game, load_game_from_str, save_game, save_game_to_string};
pub use player::HistoryPlayer;
pub use store::GameArchive;

pub const ARCHIVE_FILE_EXTENSION: &str = "xogame";
pub const ARCHIVE_VERSION: u8 = 1;
