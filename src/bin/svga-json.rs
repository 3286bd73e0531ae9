use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "svga-json", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an SVGA file into an `export default` module.
    Module(ModuleArgs),
    /// Print the decoded container as JSON, before scene normalization.
    Dump(DumpArgs),
}

#[derive(Parser, Debug)]
struct ModuleArgs {
    /// Input SVGA file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output module path. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pretty-print the JSON body.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// Input SVGA file.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Module(args) => cmd_module(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

fn cmd_module(args: ModuleArgs) -> anyhow::Result<()> {
    let opts = svga_json::EmitOpts {
        pretty: args.pretty,
    };
    let module = svga_json::svga_to_module(&args.in_path, &opts)
        .with_context(|| format!("convert '{}'", args.in_path.display()))?;

    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, module.as_bytes())
                .with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{module}"),
    }
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let raw = std::fs::read(&args.in_path)
        .with_context(|| format!("read '{}'", args.in_path.display()))?;
    let inflated = svga_json::inflate(&raw)
        .with_context(|| format!("inflate '{}'", args.in_path.display()))?;
    let container = svga_json::parse(&inflated)
        .with_context(|| format!("decode '{}'", args.in_path.display()))?;
    let json = serde_json::to_string_pretty(&container).context("serialize container")?;
    println!("{json}");
    Ok(())
}
