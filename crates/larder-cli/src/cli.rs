use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "larder",
    about = "Larder — kitchen inventory consumption engine",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List inventory items
    Inventory(InventoryArgs),
    /// Add stock (creates a new item or increments an existing one)
    Add(AddArgs),
    /// Consume ingredients for detected dishes
    Consume(ConsumeArgs),
    /// Prepare a recipe, deducting all ingredients atomically
    Prepare(PrepareArgs),
    /// List recipes
    Recipes(RecipesArgs),
    /// Show the transaction audit log
    Log(LogArgs),
}

#[derive(Args)]
pub struct InventoryArgs {
    /// Only show items below their low-stock threshold
    #[arg(long)]
    pub low: bool,
}

#[derive(Args)]
pub struct AddArgs {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub threshold: Option<f64>,
}

#[derive(Args)]
pub struct ConsumeArgs {
    /// Dish counts as name=count (e.g. burger=2 fries=1)
    pub dishes: Vec<String>,
    /// Read a full detection batch (JSON) from a file instead
    #[arg(long)]
    pub batch: Option<String>,
}

#[derive(Args)]
pub struct PrepareArgs {
    /// Recipe name
    pub recipe: String,
}

#[derive(Args)]
pub struct RecipesArgs {}

#[derive(Args)]
pub struct LogArgs {
    /// Only entries for one item name
    #[arg(long)]
    pub item: Option<String>,
    /// Validate the hash chain before printing
    #[arg(long)]
    pub verify: bool,
}
