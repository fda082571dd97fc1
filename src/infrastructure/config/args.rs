use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "photogrid",
    version,
    about = "Browse Picsum photos and keep a list of favourites",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Photo list API base URL.
    #[arg(long, value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Maximum number of images kept in memory.
    #[arg(long, value_name = "COUNT")]
    pub image_cache_capacity: Option<usize>,

    /// Favourites file path.
    #[arg(long, value_name = "PATH")]
    pub favourites_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Fetch and list the photo grid.
    Photos,
    /// List favourited photos.
    Favourites,
    /// Mark a photo as favourite.
    Favourite {
        /// Photo id.
        id: String,
    },
    /// Remove a photo from favourites.
    Unfavourite {
        /// Photo id.
        id: String,
    },
    /// Load a photo's image and print its dimensions.
    Image {
        /// Photo id.
        id: String,
        /// Load the full-size image instead of the thumbnail.
        #[arg(long)]
        full: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_image_command() {
        let args = CliArgs::parse_from(["photogrid", "image", "42", "--full"]);

        assert_eq!(
            args.command,
            Command::Image {
                id: "42".to_string(),
                full: true
            }
        );
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(CliArgs::try_parse_from(["photogrid"]).is_err());
    }
}
