//! Workbench - Entry Point
//!
//! Command-line driver: replays a sequence of menu choices against one item
//! and prints the resulting menu snapshot.

use std::fs::OpenOptions;

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use workbench::data::{export_default_catalog, Catalog, CatalogLookup, CATALOG_FILE};
use workbench::display::{
    present, render_lines, set_displayed, Language, PinnedAttributes, PresentedAttribute, Translate,
};
use workbench::engineering::{MenuEvent, MenuMode, MenuView, ModificationsMenu, RollInput};
use workbench::items::{Item, ItemHandle};
use workbench::WorkbenchConfig;

const USAGE: &str = "\
Usage:
  workbench items
  workbench export
  workbench show <item> [--template <id> --grade <n>] [--effect <id>]
                        [--roll worst|half|best|random] [--set <key>=<value>]...
                        [--pin <key>]... [--json]";

enum CliCommand {
    Items,
    Export,
    Show(ShowOptions),
    Help,
}

#[derive(Default)]
struct ShowOptions {
    item: String,
    template: Option<String>,
    grade: Option<u8>,
    effect: Option<String>,
    roll: Option<RollInput>,
    sets: Vec<(String, f64)>,
    pins: Vec<String>,
    json: bool,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    item: &'a Item,
    view: &'a MenuView,
    attributes: &'a [PresentedAttribute],
}

fn main() -> Result<()> {
    let config = WorkbenchConfig::load();
    init_logging(&config);
    log::info!("Starting Workbench v{}", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;

    let result = match command {
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        CliCommand::Export => match export_default_catalog(&config.data_dir) {
            Ok(()) => {
                println!("Wrote {}", config.data_dir.join(CATALOG_FILE).display());
                Ok(())
            }
            Err(e) => Err(anyhow::Error::msg(e)),
        },
        CliCommand::Items => {
            let catalog = Catalog::load_or_default(&config.data_dir);
            list_items(&catalog)
        }
        CliCommand::Show(options) => {
            let catalog = Catalog::load_or_default(&config.data_dir);
            show(&catalog, &config, options)
        }
    };

    if let Err(ref e) = result {
        log::error!("Workbench exited with error: {:#}", e);
    }
    result
}

/// Log to the configured file so stdout stays clean for snapshots
fn init_logging(config: &WorkbenchConfig) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str())
    );

    match OpenOptions::new().create(true).write(true).truncate(true).open(&config.log_file) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => eprintln!("Warning: cannot open {}: {}. Logging to stderr.", config.log_file.display(), e),
    }

    builder.init();
}

fn parse_args(args: &[String]) -> Result<CliCommand> {
    let Some(first) = args.first() else {
        return Ok(CliCommand::Help);
    };

    match first.as_str() {
        "items" => Ok(CliCommand::Items),
        "export" => Ok(CliCommand::Export),
        "help" | "-h" | "--help" => Ok(CliCommand::Help),
        "show" => parse_show(&args[1..]).map(CliCommand::Show),
        other => bail!("unknown command '{}'\n{}", other, USAGE),
    }
}

fn parse_show(args: &[String]) -> Result<ShowOptions> {
    let mut options = ShowOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next().cloned().with_context(|| format!("{} needs a value", flag))
        };
        match arg.as_str() {
            "--template" => options.template = Some(value("--template")?),
            "--grade" => {
                let raw = value("--grade")?;
                options.grade = Some(raw.parse().with_context(|| format!("bad grade '{}'", raw))?);
            }
            "--effect" => options.effect = Some(value("--effect")?),
            "--roll" => {
                let raw = value("--roll")?;
                options.roll = Some(match raw.as_str() {
                    "worst" => RollInput::Worst,
                    "half" => RollInput::Half,
                    "best" => RollInput::Best,
                    "random" => RollInput::Random,
                    other => bail!("bad roll '{}', expected worst|half|best|random", other),
                });
            }
            "--set" => {
                let raw = value("--set")?;
                let (key, number) = raw.split_once('=')
                    .with_context(|| format!("--set expects key=value, got '{}'", raw))?;
                let number: f64 = number.parse()
                    .with_context(|| format!("bad value in '{}'", raw))?;
                options.sets.push((key.to_string(), number));
            }
            "--pin" => options.pins.push(value("--pin")?),
            "--json" => options.json = true,
            flag if flag.starts_with("--") => bail!("unknown option '{}'\n{}", flag, USAGE),
            item if options.item.is_empty() => options.item = item.to_string(),
            extra => bail!("unexpected argument '{}'", extra),
        }
    }

    if options.item.is_empty() {
        bail!("show needs an item id\n{}", USAGE);
    }
    if options.template.is_some() != options.grade.is_some() {
        bail!("--template and --grade go together");
    }
    Ok(options)
}

fn list_items(catalog: &Catalog) -> Result<()> {
    let language = Language::english();
    for item in &catalog.items {
        let class = catalog.class_info(&item.class)
            .with_context(|| format!("item '{}'", item.id))?;
        println!("{} ({})", item.id, class.id);
        for template in &class.templates {
            let info = catalog.template_info(template)?;
            let grades: Vec<String> = info.grades().map(|g| g.to_string()).collect();
            println!("  {:<32} grades {}", language.translate(template), grades.join(","));
        }
    }
    Ok(())
}

fn show(catalog: &Catalog, config: &WorkbenchConfig, options: ShowOptions) -> Result<()> {
    catalog.item_info(&options.item)
        .with_context(|| format!("cannot show '{}'", options.item))?;

    let mut rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut item = Item::new(options.item.as_str());
    let mut handle = ItemHandle::new(&mut item, catalog);
    let mut menu = ModificationsMenu::new(&handle);

    if let (Some(template), Some(grade)) = (options.template.clone(), options.grade) {
        menu.handle(MenuEvent::ChooseTemplate { template: template.clone(), grade }, &mut handle, &mut rng)
            .with_context(|| format!("applying {} grade {}", template, grade))?;

        if menu.mode(&handle) == MenuMode::SpecialPick {
            menu.handle(MenuEvent::ChooseEffect(options.effect.clone()), &mut handle, &mut rng)
                .context("choosing special effect")?;
        } else if options.effect.is_some() {
            bail!("no special effects apply to '{}'", options.item);
        }
    } else if options.effect.is_some() || options.roll.is_some() || !options.sets.is_empty() {
        bail!("--effect, --roll and --set need --template and --grade");
    }

    if let Some(input) = options.roll {
        menu.handle(MenuEvent::Roll(input), &mut handle, &mut rng)
            .context("rolling")?;
    }

    for (key, value) in &options.sets {
        menu.handle(set_displayed(key, *value), &mut handle, &mut rng)
            .with_context(|| format!("setting {}", key))?;
    }

    let mut pinned = PinnedAttributes::new();
    for key in &options.pins {
        pinned.toggle(key);
    }

    let view = menu.view(&handle, catalog)?;
    let attributes = present(&view.attributes, &handle, &pinned);

    if options.json {
        let snapshot = Snapshot { item: handle.item(), view: &view, attributes: &attributes };
        println!("{}", serde_json::to_string_pretty(&snapshot).context("serialize snapshot")?);
    } else {
        for line in render_lines(&view, &attributes, &Language::english()) {
            println!("{}", line);
        }
    }

    Ok(())
}
