use std::fs;
use std::sync::Arc;

use anyhow::{bail, Context};
use colored::Colorize;

use larder_engine::{EngineError, Larder};
use larder_ledger::{InMemoryTransactionLog, Transaction};
use larder_store::{InMemoryInventoryStore, InMemoryRecipeStore};
use larder_types::{DetectionBatch, DishCount};

use crate::cli::{
    AddArgs, Cli, Command, ConsumeArgs, InventoryArgs, LogArgs, OutputFormat, PrepareArgs,
};
use crate::seed;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    // The demo engine is in-memory and freshly seeded on every run.
    let log = Arc::new(InMemoryTransactionLog::new());
    let larder = Larder::new(
        Arc::new(InMemoryInventoryStore::new()),
        Arc::new(InMemoryRecipeStore::new()),
        log.clone(),
    );
    seed::seed(&larder)?;

    match cli.command {
        Command::Inventory(args) => cmd_inventory(&larder, args, &cli.format),
        Command::Add(args) => cmd_add(&larder, args, &cli.format),
        Command::Consume(args) => cmd_consume(&larder, args, &cli.format),
        Command::Prepare(args) => cmd_prepare(&larder, args, &cli.format),
        Command::Recipes(_) => cmd_recipes(&larder, &cli.format),
        Command::Log(args) => cmd_log(&larder, &log, args, &cli.format),
    }
}

fn cmd_inventory(larder: &Larder, args: InventoryArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let items = if args.low {
        larder.list_low_stock()?
    } else {
        larder.list_inventory()?
    };

    if matches!(format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    println!(
        "{:<16} {:>10} {:<7} {:<12} {:>10}",
        "NAME", "QUANTITY", "UNIT", "CATEGORY", "THRESHOLD"
    );
    for item in &items {
        let line = format!(
            "{:<16} {:>10} {:<7} {:<12} {:>10}",
            item.name, item.quantity, item.unit, item.category, item.threshold
        );
        if item.is_low_stock() {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }
    Ok(())
}

fn cmd_add(larder: &Larder, args: AddArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let item = larder.add_inventory_item(
        &args.name,
        args.quantity,
        &args.unit,
        args.category.as_deref(),
        args.threshold,
    )?;

    if matches!(format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&item)?);
    } else {
        println!(
            "{} {} now at {} {}",
            "added".green(),
            item.name,
            item.quantity,
            item.unit
        );
    }
    Ok(())
}

fn cmd_consume(larder: &Larder, args: ConsumeArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let report = if let Some(path) = &args.batch {
        let raw = fs::read_to_string(path).with_context(|| format!("reading batch {path}"))?;
        let batch: DetectionBatch =
            serde_json::from_str(&raw).with_context(|| format!("parsing batch {path}"))?;
        larder.consume_from_detection_batch(&batch)?
    } else {
        if args.dishes.is_empty() {
            bail!("nothing to consume: pass dish counts (e.g. burger=2) or --batch");
        }
        let dishes = args
            .dishes
            .iter()
            .map(|spec| parse_dish_spec(spec))
            .collect::<anyhow::Result<Vec<_>>>()?;
        larder.consume_detected(&dishes)?
    };

    if matches!(format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for delta in &report.updates {
        let line = format!(
            "{:<16} {} -> {} (used {} {})",
            delta.name, delta.previous_quantity, delta.new_quantity, delta.used_quantity, delta.unit
        );
        // Highlight entries where demand exceeded supply and got clamped.
        if delta.used_quantity > delta.previous_quantity {
            println!("{}", line.yellow());
        } else {
            println!("{line}");
        }
    }

    let low = larder.list_low_stock()?;
    if !low.is_empty() {
        let names: Vec<_> = low.iter().map(|item| item.name.as_str()).collect();
        println!("{} {}", "low stock:".red(), names.join(", "));
    }
    Ok(())
}

fn cmd_prepare(larder: &Larder, args: PrepareArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let recipe = larder
        .list_recipes()?
        .into_iter()
        .find(|recipe| recipe.name == args.recipe);
    let Some(recipe) = recipe else {
        let names: Vec<_> = larder
            .list_recipes()?
            .into_iter()
            .map(|recipe| recipe.name)
            .collect();
        bail!("unknown recipe {:?}; available: {}", args.recipe, names.join(", "));
    };

    match larder.prepare_recipe(recipe.id) {
        Ok(report) => {
            if matches!(format, OutputFormat::Json) {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }
            println!("{} {}", "prepared".green(), report.recipe.name);
            for delta in &report.updates {
                println!(
                    "  {:<16} {} -> {} ({})",
                    delta.name, delta.previous_quantity, delta.new_quantity, delta.unit
                );
            }
            Ok(())
        }
        Err(EngineError::InsufficientStock { shortfalls }) => {
            for shortfall in &shortfalls {
                println!(
                    "{}",
                    format!(
                        "  {:<16} required {} {}, available {}",
                        shortfall.name, shortfall.required, shortfall.unit, shortfall.available
                    )
                    .red()
                );
            }
            bail!("insufficient stock for {}", args.recipe);
        }
        Err(err) => Err(err.into()),
    }
}

fn cmd_recipes(larder: &Larder, format: &OutputFormat) -> anyhow::Result<()> {
    let recipes = larder.list_recipes()?;

    if matches!(format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&recipes)?);
        return Ok(());
    }

    for recipe in &recipes {
        println!(
            "{:<28} {:<10} {} ingredient(s)",
            recipe.name,
            recipe.category,
            recipe.ingredients.len()
        );
    }
    Ok(())
}

fn cmd_log(
    larder: &Larder,
    log: &InMemoryTransactionLog,
    args: LogArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    if args.verify {
        log.validate_chain().context("audit chain validation")?;
        if !matches!(format, OutputFormat::Json) {
            println!("{}", "audit chain OK".green());
        }
    }

    let entries: Vec<Transaction> = match &args.item {
        Some(item) => larder.transactions_for_item(item)?,
        None => larder.transactions()?,
    };

    if matches!(format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        println!(
            "{:>4}  {:<8} {:<16} {:>8} {:<6} {}",
            entry.seq, entry.action, entry.item_name, entry.quantity, entry.unit, entry.description
        );
    }
    Ok(())
}

/// Parse a `name=count` dish spec; a bare name means one instance.
fn parse_dish_spec(spec: &str) -> anyhow::Result<DishCount> {
    match spec.split_once('=') {
        Some((name, count)) => {
            let count: u32 = count
                .parse()
                .with_context(|| format!("invalid dish count in {spec:?}"))?;
            if name.is_empty() {
                bail!("empty dish name in {spec:?}");
            }
            Ok(DishCount::new(name, count))
        }
        None => Ok(DishCount::new(spec, 1)),
    }
}
