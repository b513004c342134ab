use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use garderobe_core::{FieldValue, RecordEditor, RecordTag};
use garderobe_engine::GarderobeEngine;
use garderobe_plugin_host::PluginDirs;
use garderobe_plugin_sdk::PluginDescriptor;

/// Identifier of the built-in codec used for the catalog file itself.
const CATALOG_CODEC: &str = "garderobe.serialize.json";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let dirs = match &cli.plugin_root {
        Some(root) => PluginDirs::under(root),
        None => PluginDirs::default(),
    };
    let mut engine = GarderobeEngine::bootstrap(&dirs);
    engine
        .catalog()
        .set_update_handler(|change| tracing::debug!(?change, "catalog updated"));
    for err in engine.scan_errors() {
        eprintln!("warning: {err}");
    }

    match cli.command {
        Commands::Types => {
            for tag in engine.selectable_types() {
                println!("{tag}");
            }
        }
        Commands::Plugins => print_plugins(&engine),
        Commands::List(args) => {
            load_catalog(&mut engine, &args.catalog)?;
            for record in engine.catalog().records() {
                println!("{} ({})", record.name, record.tag);
            }
        }
        Commands::Show(args) => {
            load_catalog(&mut engine, &args.catalog.catalog)?;
            let record = engine.catalog().get(&args.name)?;
            println!("{} ({})", record.name, record.tag);
            for (field, value) in &record.fields {
                println!("  {field}: {value}");
            }
        }
        Commands::Add(args) => {
            load_catalog(&mut engine, &args.catalog.catalog)?;
            let tag = RecordTag::new(args.kind.as_str());
            if !engine.types().contains(&tag) {
                bail!(
                    "unknown record type {:?}; run `garderobe types` for the available ones",
                    args.kind
                );
            }
            let mut editor = engine.create_editor(&tag);
            editor.set_name(&args.name);
            apply_fields(editor.as_mut(), &args.field)?;
            let name = engine.commit_new(editor)?;
            save_catalog(&mut engine, &args.catalog.catalog)?;
            println!("added {name}");
        }
        Commands::Set(args) => {
            load_catalog(&mut engine, &args.catalog.catalog)?;
            let mut editor = engine.edit_editor(&args.name)?;
            if let Some(rename) = &args.rename {
                editor.set_name(rename);
            }
            apply_fields(editor.as_mut(), &args.field)?;
            let name = engine.commit_edit(&args.name, editor)?;
            save_catalog(&mut engine, &args.catalog.catalog)?;
            println!("updated {name}");
        }
        Commands::Remove(args) => {
            load_catalog(&mut engine, &args.catalog.catalog)?;
            engine.catalog().remove(&args.name)?;
            save_catalog(&mut engine, &args.catalog.catalog)?;
            println!("removed {}", args.name);
        }
        Commands::Clear(args) => {
            load_catalog(&mut engine, &args.catalog)?;
            engine.catalog().clear();
            save_catalog(&mut engine, &args.catalog)?;
            println!("catalog cleared");
        }
        Commands::Export(args) => {
            load_catalog(&mut engine, &args.catalog.catalog)?;
            select_serializer(&mut engine, &args.format)?;
            select_functional(&mut engine, args.functional.as_deref())?;
            match engine.process_output(&args.output)? {
                Some(bytes) => {
                    fs::write(&args.output, bytes).with_context(|| {
                        format!("failed to write export to {}", args.output.display())
                    })?;
                    println!("exported {} records to {}", engine.catalog().len(), args.output.display());
                }
                None => println!("no serialize plugin selected; nothing written"),
            }
        }
        Commands::Import(args) => {
            load_catalog(&mut engine, &args.catalog.catalog)?;
            select_serializer(&mut engine, &args.format)?;
            select_functional(&mut engine, args.functional.as_deref())?;
            let bytes = fs::read(&args.input)
                .with_context(|| format!("failed to read {}", args.input.display()))?;
            if engine.import_into_catalog(&bytes, &args.input)? {
                save_catalog(&mut engine, &args.catalog.catalog)?;
                println!("imported {} records", engine.catalog().len());
            } else {
                println!("no serialize plugin selected; nothing imported");
            }
        }
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    name = "garderobe",
    author,
    version,
    about = "Plugin-extensible clothing catalog workbench"
)]
struct Cli {
    /// Directory containing the three plugin directories.
    #[arg(long, global = true)]
    plugin_root: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the selectable record types.
    Types,
    /// List the discovered plugins per capability.
    Plugins,
    /// List the records in the catalog.
    List(CatalogArgs),
    /// Show one record with its fields.
    Show(NamedArgs),
    /// Add a record of the given type.
    Add(AddArgs),
    /// Edit an existing record.
    Set(SetArgs),
    /// Remove a record by name.
    Remove(NamedArgs),
    /// Remove every record.
    Clear(CatalogArgs),
    /// Export the catalog through the serialize pipeline.
    Export(ExportArgs),
    /// Import a catalog, replacing the current records.
    Import(ImportArgs),
}

#[derive(Args)]
struct CatalogArgs {
    /// Catalog file the command operates on.
    #[arg(long, default_value = "catalog.json")]
    catalog: PathBuf,
}

#[derive(Args)]
struct NamedArgs {
    name: String,
    #[command(flatten)]
    catalog: CatalogArgs,
}

#[derive(Args)]
struct AddArgs {
    /// Record type tag, e.g. Shirt.
    #[arg(long)]
    kind: String,
    /// Record name; unique within the catalog.
    #[arg(long)]
    name: String,
    /// Field assignment as KEY=VALUE; repeatable.
    #[arg(long)]
    field: Vec<String>,
    #[command(flatten)]
    catalog: CatalogArgs,
}

#[derive(Args)]
struct SetArgs {
    name: String,
    /// New name for the record.
    #[arg(long)]
    rename: Option<String>,
    /// Field assignment as KEY=VALUE; repeatable.
    #[arg(long)]
    field: Vec<String>,
    #[command(flatten)]
    catalog: CatalogArgs,
}

#[derive(Args)]
struct ExportArgs {
    /// Output file for the encoded catalog.
    #[arg(long)]
    output: PathBuf,
    /// Serialize plugin id or name.
    #[arg(long, default_value = CATALOG_CODEC)]
    format: String,
    /// Functional plugin id or name to run before encoding.
    #[arg(long)]
    functional: Option<String>,
    #[command(flatten)]
    catalog: CatalogArgs,
}

#[derive(Args)]
struct ImportArgs {
    /// File holding the encoded catalog.
    #[arg(long)]
    input: PathBuf,
    /// Serialize plugin id or name.
    #[arg(long, default_value = CATALOG_CODEC)]
    format: String,
    /// Functional plugin id or name to run after decoding.
    #[arg(long)]
    functional: Option<String>,
    #[command(flatten)]
    catalog: CatalogArgs,
}

fn print_plugins(engine: &GarderobeEngine) {
    println!("data plugins:");
    for descriptor in engine.data_descriptors() {
        println!("  {} - {} ({})", descriptor.id, descriptor.name, descriptor.vendor);
    }
    println!("functional plugins:");
    println!("  none");
    for descriptor in engine.functional_descriptors() {
        println!("  {} - {} ({})", descriptor.id, descriptor.name, descriptor.vendor);
    }
    println!("serialize plugins:");
    println!("  none");
    for descriptor in engine.serializer_descriptors() {
        println!("  {} - {} ({})", descriptor.id, descriptor.name, descriptor.vendor);
    }
}

/// Pushes KEY=VALUE assignments through the editor, parsing each value
/// according to the editor's field specs.
fn apply_fields(editor: &mut dyn RecordEditor, assignments: &[String]) -> Result<()> {
    for assignment in assignments {
        let (field, raw) = assignment
            .split_once('=')
            .with_context(|| format!("field assignment {assignment:?} is not KEY=VALUE"))?;
        let spec = editor
            .specs()
            .iter()
            .find(|spec| spec.name == field)
            .with_context(|| format!("no field named {field:?} on this record type"))?;
        let value = FieldValue::parse_as(spec.kind, raw)?;
        editor.set_field(field, value)?;
    }
    Ok(())
}

fn select_serializer(engine: &mut GarderobeEngine, key: &str) -> Result<()> {
    if key.eq_ignore_ascii_case("none") {
        engine.select_serializer(None)?;
        return Ok(());
    }
    let index = find_plugin(&engine.serializer_descriptors(), key)
        .with_context(|| format!("no serialize plugin matches {key:?}"))?;
    engine.select_serializer(Some(index))?;
    Ok(())
}

fn select_functional(engine: &mut GarderobeEngine, key: Option<&str>) -> Result<()> {
    match key {
        None => engine.select_functional(None)?,
        Some(key) if key.eq_ignore_ascii_case("none") => engine.select_functional(None)?,
        Some(key) => {
            let index = find_plugin(&engine.functional_descriptors(), key)
                .with_context(|| format!("no functional plugin matches {key:?}"))?;
            engine.select_functional(Some(index))?;
        }
    }
    Ok(())
}

fn find_plugin(descriptors: &[PluginDescriptor], key: &str) -> Option<usize> {
    descriptors
        .iter()
        .position(|descriptor| descriptor.id == key || descriptor.name.eq_ignore_ascii_case(key))
}

/// Reads the catalog file, when present, through the built-in JSON codec.
fn load_catalog(engine: &mut GarderobeEngine, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let bytes =
        fs::read(path).with_context(|| format!("failed to read catalog {}", path.display()))?;
    select_serializer(engine, CATALOG_CODEC)?;
    select_functional(engine, None)?;
    engine
        .import_into_catalog(&bytes, path)
        .with_context(|| format!("catalog file {} is not readable as JSON", path.display()))?;
    Ok(())
}

/// Writes the catalog back through the built-in JSON codec.
fn save_catalog(engine: &mut GarderobeEngine, path: &Path) -> Result<()> {
    select_serializer(engine, CATALOG_CODEC)?;
    select_functional(engine, None)?;
    let bytes = engine
        .process_output(path)?
        .expect("catalog codec is always registered");
    fs::write(path, bytes).with_context(|| format!("failed to write catalog {}", path.display()))?;
    Ok(())
}
