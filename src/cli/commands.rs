//! Command dispatch and the interactive quiz loops

use std::io::{self, BufRead};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use rand::Rng;
use tracing::{debug, instrument};

use crate::application::services::{GradeReport, PriceSession, QuizQuestion, QuizSession};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{render_tree, Catalog, DomainError};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Run the parsed command line.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, try `itemquiz --help`".to_string(),
        ));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = load_settings(cli)?;
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Play {
            rounds,
            min_tree_size,
            options,
        } => {
            let catalog = load_catalog(cli, &container)?;
            let container = with_quiz_overrides(container, *min_tree_size, *options)?;
            let mut rng = container.rng();
            let stdin = io::stdin();
            play_crafting(&container, &catalog, *rounds, &mut stdin.lock(), &mut rng)
        }
        Commands::Price { rounds } => {
            let catalog = load_catalog(cli, &container)?;
            let mut rng = container.rng();
            let stdin = io::stdin();
            play_price(&container, &catalog, *rounds, &mut stdin.lock(), &mut rng)
        }
        Commands::Tree { item } => {
            let catalog = load_catalog(cli, &container)?;
            show_tree(&container, &catalog, item)
        }
        Commands::Family { item } => {
            let catalog = load_catalog(cli, &container)?;
            show_family(&container, &catalog, item)
        }
        Commands::Stats => {
            let catalog = load_catalog(cli, &container)?;
            show_stats(&container, &catalog);
            Ok(())
        }
        Commands::Config { command } => config_command(&container, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_file(path)?,
        None => {
            let cwd = std::env::current_dir()
                .map_err(|e| InfraError::io("resolve working directory", e))?;
            Settings::load(Some(&cwd))?
        }
    };
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    Ok(settings)
}

fn load_catalog(cli: &Cli, container: &ServiceContainer) -> CliResult<Catalog> {
    let source = container.catalog_source(cli.catalog.clone())?;
    Ok(source.load()?)
}

fn with_quiz_overrides(
    container: ServiceContainer,
    min_tree_size: Option<usize>,
    options: Option<usize>,
) -> CliResult<ServiceContainer> {
    if min_tree_size == Some(0) || options == Some(0) {
        return Err(CliError::InvalidArgs(
            "--min-tree-size and --options must be at least 1".to_string(),
        ));
    }
    if min_tree_size.is_none() && options.is_none() {
        return Ok(container);
    }
    let mut settings = (*container.settings).clone();
    if let Some(size) = min_tree_size {
        settings.quiz.min_tree_size = size;
    }
    if let Some(count) = options {
        settings.quiz.option_count = count;
    }
    Ok(ServiceContainer::with_deps(settings, container.fs))
}

/// Read one trimmed line; None on end of input.
fn read_line(input: &mut impl BufRead) -> CliResult<Option<String>> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| InfraError::io("read answer", e))?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Map "1,3 4" style input onto option names. Unknown numbers are reported and skipped.
pub fn parse_selection(line: &str, options: &[String]) -> Vec<String> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .filter_map(|token| match token.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => Some(options[n - 1].clone()),
            _ => {
                output::warning(&format!("ignoring '{}'", token));
                None
            }
        })
        .unique()
        .collect()
}

fn print_question(question: &QuizQuestion) {
    output::header(&format!(
        "Which of these go into {} ({}g)?",
        question.root_name, question.root_price
    ));
    if question.options.is_empty() {
        output::detail("(no options this round, submit an empty answer)");
    }
    for (i, option) in question.options.iter().enumerate() {
        output::option(i + 1, option);
    }
}

fn print_report(report: &GradeReport) {
    for mark in &report.marks {
        output::answer_mark(&mark.name, mark.is_correct, mark.checked);
    }
    output::verdict(
        report.correct,
        report.consecutive_correct,
        report.previous_consecutive_correct,
    );
    output::action("Tree", &report.correct_answers.join(", "));
}

/// Interactive crafting quiz. `q` or end of input quits.
#[instrument(level = "debug", skip_all)]
pub fn play_crafting<R: Rng + ?Sized>(
    container: &ServiceContainer,
    catalog: &Catalog,
    rounds: Option<usize>,
    input: &mut impl BufRead,
    rng: &mut R,
) -> CliResult<()> {
    let engine = &container.quiz;
    let mut state = QuizSession::new();
    let mut played = 0usize;

    while rounds.map_or(true, |max| played < max) {
        let (posed, question) = engine.pose_question(catalog, state, rng)?;
        print_question(&question);
        output::prompt("Numbers (e.g. 1,3), empty for none, q to quit:");

        let Some(line) = read_line(input)? else {
            break;
        };
        if line.eq_ignore_ascii_case("q") {
            break;
        }
        let answers = parse_selection(&line, &question.options);
        let (graded, report) = engine.grade(posed, &answers)?;
        print_report(&report);
        println!();

        state = engine.next_question(graded);
        played += 1;
    }
    debug!("played {} rounds", played);
    Ok(())
}

/// Interactive price quiz. `q` or end of input quits.
#[instrument(level = "debug", skip_all)]
pub fn play_price<R: Rng + ?Sized>(
    container: &ServiceContainer,
    catalog: &Catalog,
    rounds: Option<usize>,
    input: &mut impl BufRead,
    rng: &mut R,
) -> CliResult<()> {
    let quiz = &container.price;
    let mut state = PriceSession::new();
    let mut played = 0usize;

    while rounds.map_or(true, |max| played < max) {
        let (posed, question) = quiz.pose_question(catalog, state, rng)?;
        output::header(&format!("How much does {} cost?", question.item_name));
        output::prompt("Price:");

        let Some(line) = read_line(input)? else {
            break;
        };
        if line.eq_ignore_ascii_case("q") {
            break;
        }
        let guess = match line.parse::<u32>() {
            Ok(guess) => Some(guess),
            Err(_) if line.is_empty() => None,
            Err(_) => {
                output::warning(&format!("'{}' is not a price, counting it as 0", line));
                None
            }
        };
        let (graded, report) = quiz.grade(posed, guess)?;
        if !report.correct {
            output::action("Price", &format!("{}g", report.correct_price));
        }
        output::verdict(
            report.correct,
            report.consecutive_correct,
            report.previous_consecutive_correct,
        );
        println!();

        state = graded.next_question();
        played += 1;
    }
    Ok(())
}

fn show_tree(container: &ServiceContainer, catalog: &Catalog, item: &str) -> CliResult<()> {
    let (_, graph) = container.quiz.prepare(catalog);
    let idx = graph
        .resolve(item)
        .ok_or_else(|| DomainError::UnknownItem(item.to_string()))?;
    let id = graph
        .id_of(idx)
        .ok_or_else(|| DomainError::UnknownItem(item.to_string()))?;
    let tree = render_tree(&graph, id).ok_or_else(|| DomainError::UnknownItem(item.to_string()))?;
    output::info(&tree);
    Ok(())
}

fn show_family(container: &ServiceContainer, catalog: &Catalog, item: &str) -> CliResult<()> {
    let report = container.stats.family_report(catalog, item)?;
    let price = report
        .price
        .map_or_else(|| "?".to_string(), |p| format!("{}g", p));
    output::header(&format!("{} [{}] {} ({})", report.name, report.id, price, report.tier));
    output::action("Used in", &report.used_in.join(", "));
    output::action("Made from", &report.made_from.join(", "));
    output::action(
        &format!("Extended family ({})", report.extended_family.len()),
        &report.extended_family.join(", "),
    );
    output::action(&format!("Tree ({})", report.tree.len()), &report.tree.join(" > "));
    Ok(())
}

fn show_stats(container: &ServiceContainer, catalog: &Catalog) {
    let summary = container.stats.summarize(catalog);
    output::header("Catalog");
    output::detail(&format!("items:       {}", summary.total_items));
    output::detail(&format!("in scope:    {}", summary.filtered_items));
    output::detail(&format!(
        "large trees: {} (min size {})",
        summary.large_trees, container.settings.quiz.min_tree_size
    ));
    output::header("By relation");
    for (tier, count) in &summary.by_tier {
        output::detail(&format!("{:<13}{}", tier.to_string(), count));
    }
    output::header("By price");
    for (tier, count) in &summary.by_price_tier {
        output::detail(&format!("{:<13}{}", tier.to_string(), count));
    }
    if summary.unpriced > 0 {
        output::warning(&format!("{} in-scope items have no price", summary.unpriced));
    }
}

fn config_command(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("Global", &path.display()),
                None => output::warning("no global config directory on this platform"),
            }
            let cwd = std::env::current_dir()
                .map_err(|e| InfraError::io("resolve working directory", e))?;
            output::action("Local", &local_config_path(&cwd).display());
            Ok(())
        }
        ConfigCommands::Init { global, force } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("no global config directory on this platform".to_string())
                })?
            } else {
                let cwd = std::env::current_dir()
                    .map_err(|e| InfraError::io("resolve working directory", e))?;
                local_config_path(&cwd)
            };
            write_template(container, &path, *force)
        }
    }
}

fn write_template(container: &ServiceContainer, path: &Path, force: bool) -> CliResult<()> {
    if container.fs.exists(path) && !force {
        return Err(CliError::Usage(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    container
        .fs
        .ensure_parent(path)
        .map_err(|e| InfraError::io(format!("create {}", path.display()), e))?;
    container
        .fs
        .write(path, &Settings::template())
        .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
    output::action("Created", &path.display());
    Ok(())
}
