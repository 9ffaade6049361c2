//! Rigidisk CLI - inspect and copy RDB-partitioned media
//!
//! A tool for describing Amiga rigid-disk-block media, listing their
//! partitions, and moving raw blocks between a medium and flat files.

use std::env;
use std::path::Path;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use rigidisk_channels::{ChannelMode, FileChannel};
use rigidisk_core::BLOCK_SIZE;
use rigidisk_copy::{
    export_range, export_volume, import_range, import_volume, CopyProgress, ProgressCallback,
};
use rigidisk_rdb::{ChainEnd, Device};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        process::exit(1);
    }

    let command = &args[1];

    let outcome = match command.as_str() {
        "info" => require_image(&args).and_then(cmd_info),
        "volumes" => require_image(&args).and_then(cmd_volumes),
        "export" => cmd_export(&args),
        "import" => cmd_import(&args),
        "--help" | "-h" | "help" => {
            print_usage(&args[0]);
            Ok(())
        }
        "--version" | "-v" | "version" => {
            println!("rigidisk v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn print_usage(program: &str) {
    println!("rigidisk - Rigid Disk Block media tool");
    println!();
    println!("USAGE:");
    println!("    {} <COMMAND> [OPTIONS]", program);
    println!();
    println!("COMMANDS:");
    println!("    info <image>                      Describe the medium");
    println!("    volumes <image>                   List partitions");
    println!("    export <image> <out> --volume N   Copy partition N out to a file");
    println!("    export <image> <out> --start N --count N");
    println!("                                      Copy a block range out to a file");
    println!("    import <image> <in> --volume N    Copy a file into partition N");
    println!("    import <image> <in> --start N     Copy a file in at a block index");
    println!("    help                              Print this help message");
    println!("    version                           Print version");
    println!();
    println!("EXAMPLES:");
    println!("    {} info workbench.hdf", program);
    println!("    {} export workbench.hdf dh0.part --volume 1", program);
}

fn require_image(args: &[String]) -> Result<&str> {
    match args.get(2) {
        Some(image) => Ok(image),
        None => bail!("Usage: {} {} <image_file>", args[0], args[1]),
    }
}

fn cmd_info(image_path: &str) -> Result<()> {
    let channel = FileChannel::open(Path::new(image_path), ChannelMode::ReadOnly)?;
    let device = Device::discover(Box::new(channel));

    println!("=== Medium ===");
    println!("Path:     {}", image_path);
    println!(
        "Blocks:   {} ({:.2} MB)",
        device.block_count(),
        (device.block_count() * BLOCK_SIZE as u64) as f64 / 1_048_576.0
    );
    println!("Bootable: {}", if device.has_boot_code() { "yes" } else { "no" });
    println!();

    match device.rdb() {
        Some(rdb) => {
            println!("=== Rigid Disk Block ===");
            println!("Block size:    {}", rdb.block_bytes);
            println!(
                "Physical C/H/S: {}/{}/{}",
                rdb.cylinders, rdb.heads, rdb.sectors
            );
            if !rdb.disk_vendor.is_empty() || !rdb.disk_product.is_empty() {
                println!(
                    "Drive:         {} {} {}",
                    rdb.disk_vendor, rdb.disk_product, rdb.disk_revision
                );
            }
            println!("Partitions:    {}", device.volume_count());
            if device.chain_end() != ChainEnd::Sentinel {
                println!("Warning:       partition chain truncated ({})", device.chain_end());
            }
        }
        None => {
            println!("No rigid disk block found.");
            println!("This medium carries no recognizable partition table.");
        }
    }

    Ok(())
}

fn cmd_volumes(image_path: &str) -> Result<()> {
    let channel = FileChannel::open(Path::new(image_path), ChannelMode::ReadOnly)?;
    let device = Device::discover(Box::new(channel));

    if !device.has_table() {
        println!("No rigid disk block found.");
        return Ok(());
    }

    if device.volumes().is_empty() {
        println!("No partitions found.");
        return Ok(());
    }

    println!(
        "{:<4} {:<12} {:>10} {:>10}  {:<6} {:>9}",
        "Nr.", "Name", "First", "Blocks", "Type", "Boot Pri."
    );
    println!("{}", "-".repeat(58));

    for (i, volume) in device.volumes().iter().enumerate() {
        println!(
            "{:<4} {:<12} {:>10} {:>10}  {:<6} {:>9}",
            i + 1,
            volume.name(),
            volume.start_block(),
            volume.block_count(),
            volume.type_tag(),
            volume.boot_priority()
        );
    }

    if device.chain_end() != ChainEnd::Sentinel {
        println!();
        println!("Warning: partition chain truncated ({})", device.chain_end());
    }

    Ok(())
}

fn cmd_export(args: &[String]) -> Result<()> {
    let (image, file, opts) = copy_args(args)?;

    let channel = FileChannel::open(Path::new(image), ChannelMode::ReadOnly)?;
    let mut device = Device::discover(Box::new(channel));

    let copied = match opts {
        CopyTarget::Volume(n) => {
            export_volume(&mut device, Path::new(file), n, Some(console_progress()))?
        }
        CopyTarget::Range { start, count } => {
            let count = count.context("export by range requires --count")?;
            export_range(&mut device, Path::new(file), start, count, Some(console_progress()))?
        }
    };

    println!();
    println!("Copied {} blocks to [{}]", copied, file);
    Ok(())
}

fn cmd_import(args: &[String]) -> Result<()> {
    let (image, file, opts) = copy_args(args)?;

    let channel = FileChannel::open(Path::new(image), ChannelMode::ReadWrite)?;
    let mut device = Device::discover(Box::new(channel));

    let copied = match opts {
        CopyTarget::Volume(n) => {
            import_volume(&mut device, Path::new(file), n, Some(console_progress()))?
        }
        CopyTarget::Range { start, count } => {
            if count.is_some() {
                bail!("--count is not used on import; the file size determines the block count");
            }
            import_range(&mut device, Path::new(file), start, Some(console_progress()))?
        }
    };

    println!();
    println!("Copied {} blocks from [{}]", copied, file);
    Ok(())
}

enum CopyTarget {
    Volume(usize),
    Range { start: u64, count: Option<u64> },
}

/// Parse `<image> <file>` positionals plus `--volume N` or
/// `--start N [--count N]` flags for the copy commands.
fn copy_args(args: &[String]) -> Result<(&str, &str, CopyTarget)> {
    let image = args
        .get(2)
        .with_context(|| format!("Usage: {} {} <image> <file> [OPTIONS]", args[0], args[1]))?;
    let file = args
        .get(3)
        .with_context(|| format!("Usage: {} {} <image> <file> [OPTIONS]", args[0], args[1]))?;

    let mut volume: Option<usize> = None;
    let mut start: Option<u64> = None;
    let mut count: Option<u64> = None;

    let mut i = 4;
    while i < args.len() {
        match args[i].as_str() {
            "--volume" => {
                volume = Some(flag_value(args, i)?.parse().context("invalid --volume")?);
                i += 2;
            }
            "--start" => {
                start = Some(flag_value(args, i)?.parse().context("invalid --start")?);
                i += 2;
            }
            "--count" => {
                count = Some(flag_value(args, i)?.parse().context("invalid --count")?);
                i += 2;
            }
            other => bail!("Unknown option: {}", other),
        }
    }

    let target = match (volume, start) {
        (Some(_), Some(_)) => {
            bail!("--volume is mutually exclusive with --start/--count")
        }
        (Some(n), None) => CopyTarget::Volume(n),
        (None, Some(start)) => CopyTarget::Range { start, count },
        (None, None) => bail!("specify either --volume N or --start N"),
    };

    Ok((image, file, target))
}

fn flag_value<'a>(args: &'a [String], i: usize) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .with_context(|| format!("{} requires a value", args[i]))
}

/// One dot per percent increment, in the manner of a teletype progress bar.
fn console_progress() -> ProgressCallback {
    let last = Arc::new(AtomicU64::new(0));
    Arc::new(move |progress: &CopyProgress| {
        use std::io::Write as _;
        let percent = progress.percent() as u64;
        let previous = last.swap(percent, Ordering::Relaxed);
        if percent > previous {
            print!(".");
            let _ = std::io::stdout().flush();
        }
    })
}
