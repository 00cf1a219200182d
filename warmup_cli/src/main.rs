use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use std::path::{Path, PathBuf};
use warmup_core::*;

#[derive(Parser)]
#[command(name = "warmup")]
#[command(about = "Science-based warmup set calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute warmup sets for an exercise and working weight
    Calc {
        /// Exercise name (see `warmup exercises list`)
        exercise: String,

        /// Working weight
        #[arg(allow_negative_numbers = true)]
        weight: f64,

        #[command(flatten)]
        overrides: PreferenceArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Estimate a one-rep max from a recent set (Brzycki)
    Estimate {
        /// Weight lifted
        #[arg(allow_negative_numbers = true)]
        weight: f64,

        /// Reps completed
        #[arg(allow_negative_numbers = true)]
        reps: i64,

        /// Use the estimate as working weight for this exercise
        #[arg(long)]
        warmup: Option<String>,

        #[command(flatten)]
        overrides: PreferenceArgs,
    },

    /// Browse or extend the exercise library
    Exercises {
        #[command(subcommand)]
        action: ExerciseAction,
    },

    /// Show or change saved preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },

    /// Convert a weight between kilograms and pounds
    Convert {
        #[arg(allow_negative_numbers = true)]
        weight: f64,

        #[arg(long)]
        from: WeightUnit,

        #[arg(long)]
        to: WeightUnit,
    },
}

#[derive(Subcommand)]
enum ExerciseAction {
    /// List exercises
    List {
        /// Only show one classification
        #[arg(long)]
        classification: Option<ExerciseClassification>,
    },

    /// Add a custom exercise
    Add {
        name: String,

        #[arg(long)]
        classification: ExerciseClassification,

        #[arg(long)]
        equipment: EquipmentKind,
    },
}

#[derive(Subcommand)]
enum PrefsAction {
    /// Print the current preferences
    Show,

    /// Update one or more preferences
    Set {
        #[command(flatten)]
        values: PreferenceArgs,
    },
}

/// Per-invocation overrides of the saved preferences
#[derive(clap::Args, Clone, Copy)]
struct PreferenceArgs {
    /// Weight unit (kg, lbs)
    #[arg(long)]
    unit: Option<WeightUnit>,

    /// Experience level (beginner, intermediate, advanced)
    #[arg(long)]
    level: Option<ExperienceLevel>,

    /// Warmup model (progressive, potentiation)
    #[arg(long)]
    model: Option<WarmupModel>,
}

impl PreferenceArgs {
    fn is_empty(&self) -> bool {
        self.unit.is_none() && self.level.is_none() && self.model.is_none()
    }

    fn apply(&self, base: Preferences) -> Preferences {
        Preferences {
            unit: self.unit.unwrap_or(base.unit),
            level: self.level.unwrap_or(base.level),
            model: self.model.unwrap_or(base.model),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        warmup_core::logging::init_with_level("debug");
    } else {
        warmup_core::logging::init();
    }

    let config_path = cli.config.unwrap_or_else(Config::default_config_path);
    let config = Config::load_or_default(&config_path)?;
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Commands::Calc {
            exercise,
            weight,
            overrides,
            format,
        } => cmd_calc(&data_dir, &config, &exercise, weight, overrides, format),
        Commands::Estimate {
            weight,
            reps,
            warmup,
            overrides,
        } => cmd_estimate(&data_dir, &config, weight, reps, warmup.as_deref(), overrides),
        Commands::Exercises { action } => match action {
            ExerciseAction::List { classification } => cmd_list(&data_dir, classification),
            ExerciseAction::Add {
                name,
                classification,
                equipment,
            } => cmd_add(&data_dir, &name, classification, equipment),
        },
        Commands::Prefs { action } => match action {
            PrefsAction::Show => cmd_prefs_show(&config, &config_path),
            PrefsAction::Set { values } => cmd_prefs_set(config, &config_path, values),
        },
        Commands::Convert { weight, from, to } => {
            println!(
                "{} {} = {:.1} {}",
                format_weight(weight),
                from,
                from.convert(weight, to),
                to
            );
            Ok(())
        }
    }
}

fn cmd_calc(
    data_dir: &Path,
    config: &Config,
    exercise_name: &str,
    weight: f64,
    overrides: PreferenceArgs,
    format: OutputFormat,
) -> Result<()> {
    let library = ExerciseStore::in_data_dir(data_dir).load_library()?;
    let exercise = library.require(exercise_name)?;
    let prefs = overrides.apply(config.preferences);

    let sets = compute_warmup_sets(weight, Some(exercise), prefs.model, prefs.level, prefs.unit);
    tracing::debug!("Computed {} warmup sets for {}", sets.len(), exercise.name);

    match format {
        OutputFormat::Table => display_protocol(exercise, weight, &prefs, &sets),
        OutputFormat::Json => println!("{}", export::to_json(&sets)?),
        OutputFormat::Csv => export::write_csv(&sets, io::stdout().lock())?,
    }

    Ok(())
}

fn cmd_estimate(
    data_dir: &Path,
    config: &Config,
    weight: f64,
    reps: i64,
    warmup: Option<&str>,
    overrides: PreferenceArgs,
) -> Result<()> {
    let prefs = overrides.apply(config.preferences);

    let estimate = u32::try_from(reps)
        .ok()
        .and_then(|reps| estimate_one_rep_max(weight, reps));
    let Some(estimate) = estimate else {
        println!("No estimate: weight must be positive and reps between 1 and 36.");
        return Ok(());
    };

    println!("Estimated 1RM: {:.1} {}", estimate, prefs.unit);
    println!("Brzycki formula - indicative only, your real 1RM may differ.");

    if let Some(name) = warmup {
        let library = ExerciseStore::in_data_dir(data_dir).load_library()?;
        let exercise = library.require(name)?;
        let sets =
            compute_warmup_sets(estimate, Some(exercise), prefs.model, prefs.level, prefs.unit);
        display_protocol(exercise, estimate, &prefs, &sets);
    }

    Ok(())
}

fn cmd_list(data_dir: &Path, classification: Option<ExerciseClassification>) -> Result<()> {
    let library = ExerciseStore::in_data_dir(data_dir).load_library()?;
    let exercises = match classification {
        Some(c) => library.exercises_by(c),
        None => library.all_exercises(),
    };

    for exercise in exercises {
        let marker = if library.is_custom(exercise) {
            "  (custom)"
        } else {
            ""
        };
        println!(
            "{:<24} {:<20} {:<10}{}",
            exercise.name, exercise.classification, exercise.equipment, marker
        );
    }

    Ok(())
}

fn cmd_add(
    data_dir: &Path,
    name: &str,
    classification: ExerciseClassification,
    equipment: EquipmentKind,
) -> Result<()> {
    let store = ExerciseStore::in_data_dir(data_dir);
    let library = store.update(|library| {
        library.add_custom(name, classification, equipment)?;
        Ok(())
    })?;
    let added = library.require(name)?;

    println!("✓ Added {} ({}, {})", added.name, classification, equipment);
    Ok(())
}

fn cmd_prefs_show(config: &Config, config_path: &Path) -> Result<()> {
    let prefs = &config.preferences;
    println!("unit:  {}", prefs.unit);
    println!("level: {}", prefs.level);
    println!("model: {}", prefs.model);
    println!("config: {}", config_path.display());
    Ok(())
}

fn cmd_prefs_set(mut config: Config, config_path: &Path, values: PreferenceArgs) -> Result<()> {
    if values.is_empty() {
        println!("Nothing to change. Pass --unit, --level or --model.");
        return Ok(());
    }

    config.preferences = values.apply(config.preferences);
    config.save_to(config_path)?;

    println!("✓ Preferences saved");
    cmd_prefs_show(&config, config_path)
}

fn display_protocol(
    exercise: &Exercise,
    working_weight: f64,
    prefs: &Preferences,
    sets: &[WarmupSet],
) {
    println!();
    println!(
        "  {} ({}, {})",
        exercise.name, exercise.classification, exercise.equipment
    );
    println!(
        "  Working weight: {} {} | Model: {} | Level: {}",
        format_weight(working_weight),
        prefs.unit,
        prefs.model,
        prefs.level
    );
    println!(
        "  Heavy-load threshold: {} {}",
        format_weight(heavy_threshold(prefs.unit, prefs.level)),
        prefs.unit
    );
    println!("  {}", prefs.model.summary());
    println!();

    if sets.is_empty() {
        println!("  No warmup sets: enter a positive working weight.");
        return;
    }

    println!("  {:<5}{:>10}  {:>5}  {:>5}  Note", "Set", "Weight", "Reps", "%");
    for set in sets {
        println!(
            "  {:<5}{:>10}  {:>5}  {:>4}%  {}",
            set.set_number,
            format!("{} {}", format_weight(set.weight), prefs.unit),
            set.reps,
            set.percentage_of_working_weight,
            set.note.map(|n| n.label()).unwrap_or("")
        );
    }

    println!();
    println!("  • Rest 45-60 s between warmup sets.");
    println!("  • Rest 2-3 min before the working set.");
    println!();
}

/// Whole numbers without decimals, everything else to one decimal
fn format_weight(weight: f64) -> String {
    if weight.fract().abs() < 1e-9 {
        format!("{:.0}", weight)
    } else {
        format!("{:.1}", weight)
    }
}
