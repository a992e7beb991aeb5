use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search the book provider by title (needs ALADIN_TTB_KEY).
    Search(SearchArgs),
    /// Normalize a saved provider response without network access.
    Normalize(NormalizeArgs),
    Review {
        #[command(subcommand)]
        command: ReviewCommand,
    },
    Paper {
        #[command(subcommand)]
        command: PaperCommand,
    },
    Tape {
        #[command(subcommand)]
        command: TapeCommand,
    },
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Title query.
    #[arg(long)]
    pub query: String,
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Provider response JSON (object with an `item` array).
    #[arg(long)]
    pub input: String,
}

#[derive(Debug, Subcommand)]
pub enum ReviewCommand {
    /// Print the stored form of a three-part review.
    Encode(ReviewEncodeArgs),
    /// Print the parts of a stored review as JSON.
    Decode(ReviewDecodeArgs),
}

#[derive(Debug, Args)]
pub struct ReviewEncodeArgs {
    #[arg(long, default_value = "")]
    pub purchase: String,

    #[arg(long, default_value = "")]
    pub make: String,

    #[arg(long, default_value = "")]
    pub review: String,
}

#[derive(Debug, Args)]
pub struct ReviewDecodeArgs {
    /// Stored review text (structured JSON or legacy plain text).
    pub raw: String,
}

#[derive(Debug, Args)]
pub struct DataDirArgs {
    /// Directory holding the shelf collections.
    #[arg(long, default_value = "chulbitso-data")]
    pub data_dir: String,
}

#[derive(Debug, Subcommand)]
pub enum PaperCommand {
    Add(PaperAddArgs),
    List(PaperListArgs),
    Remove(RemoveArgs),
}

#[derive(Debug, Args)]
pub struct PaperAddArgs {
    #[command(flatten)]
    pub data: DataDirArgs,

    #[arg(long)]
    pub book_id: String,

    #[arg(long)]
    pub book_title: String,

    #[arg(long)]
    pub content: String,
}

#[derive(Debug, Args)]
pub struct PaperListArgs {
    #[command(flatten)]
    pub data: DataDirArgs,

    /// Only reviews for this book.
    #[arg(long)]
    pub book_id: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum TapeCommand {
    Add(TapeAddArgs),
    List(DataDirArgs),
    Remove(RemoveArgs),
}

#[derive(Debug, Args)]
pub struct TapeAddArgs {
    #[command(flatten)]
    pub data: DataDirArgs,

    #[arg(long)]
    pub title: String,

    /// Episode number, clamped to 0..=9999.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub episode: i64,
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    #[command(flatten)]
    pub data: DataDirArgs,

    #[arg(long)]
    pub id: String,
}
