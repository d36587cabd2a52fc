//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "mediagallery",
    version,
    about = "Media gallery catalog admin, static dataset generator and listing client"
)]
pub struct Cli {
    /// TOML configuration file (default: ./mediagallery.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a model with its usernames
    CreateModel(CreateModelArgs),
    /// Append a post to a model
    CreatePost(CreatePostArgs),
    /// Create posts from a media/{username}/post-{n}/ directory tree
    BulkImport {
        /// Directory containing `media/` (default: dataset.media_root)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },
    /// Write the static JSON dataset under dataset.data_dir
    Generate,
    /// Delete every model, post and media file
    Clear {
        #[arg(long)]
        yes: bool,
    },
    /// Serve dataset.data_dir under /data
    Serve,
    /// Open a listing route (`/`, `/page/3`, `/models`, `/alice`) and print its items
    Browse {
        route: String,
        /// Further pages to fetch after the initial data
        #[arg(long, default_value_t = 0)]
        more: u32,
    },
    /// Search models by name or username
    Search {
        query: String,
        /// Show every match instead of the first page
        #[arg(long)]
        all: bool,
    },
    /// Print the route of a random post
    Random,
    /// Show one post with its media
    ShowPost { username: String, post_count: u32 },
}

#[derive(Debug, Args)]
pub struct CreateModelArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub avatar_url: String,

    #[arg(long)]
    pub location: Option<String>,

    /// Primary username, used in the model's routes
    #[arg(long)]
    pub primary: String,

    /// Additional usernames (repeatable)
    #[arg(long = "alias", value_name = "USERNAME")]
    pub aliases: Vec<String>,
}

#[derive(Debug, Args)]
pub struct CreatePostArgs {
    #[arg(long)]
    pub model_id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub thumbnail_url: String,

    /// Media URL (repeatable, in display order); type follows the extension
    #[arg(long = "media", value_name = "URL", required = true)]
    pub media: Vec<String>,
}
