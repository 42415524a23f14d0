use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
    num::NonZeroUsize,
    path::PathBuf,
    time::Instant,
};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use zenqoi::{DecodeRequest, EncodeRequest, Limits, PredictorSeed, Unstoppable};

/// Convert a PAM (P7, RGB or RGB_ALPHA) image to QOI.
#[derive(Parser, Debug)]
#[command(name = "zenqoi", version)]
struct Cli {
    /// Encoder threads. Defaults to the available parallelism and is clamped
    /// to it; 0 or 1 encodes on the calling thread.
    threads: Option<usize>,

    /// Input PAM path (default: stdin).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output QOI path (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Previous-pixel predictor at the start of each non-first stripe.
    #[arg(long, value_enum, default_value_t = SeedChoice::Reset)]
    seed: SeedChoice,

    /// Reject inputs with more pixels than this.
    #[arg(long)]
    max_pixels: Option<u64>,

    /// Log more (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SeedChoice {
    Reset,
    Continuous,
}

impl From<SeedChoice> for PredictorSeed {
    fn from(choice: SeedChoice) -> Self {
        match choice {
            SeedChoice::Reset => PredictorSeed::Reset,
            SeedChoice::Continuous => PredictorSeed::Continuous,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();

    let threads = worker_count(cli.threads);

    let start = Instant::now();
    let data = read_input(&cli)?;
    let limits = Limits {
        max_pixels: cli.max_pixels,
        ..Default::default()
    };
    let grid = DecodeRequest::new(&data)
        .with_limits(&limits)
        .decode(Unstoppable)
        .context("read PAM image")?;
    drop(data);
    tracing::info!(
        width = grid.width(),
        height = grid.height(),
        "read: {}ms",
        start.elapsed().as_millis()
    );

    let start = Instant::now();
    let request = EncodeRequest::new(&grid)
        .with_workers(threads)
        .with_predictor_seed(cli.seed.into());
    let written = match &cli.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create '{}'", path.display()))?;
            write_qoi(request, BufWriter::new(file))?
        }
        None => write_qoi(request, BufWriter::new(io::stdout().lock()))?,
    };
    tracing::info!(threads, bytes = written, "write: {}ms", start.elapsed().as_millis());

    Ok(())
}

/// Requested thread count, clamped to what the machine offers.
fn worker_count(requested: Option<usize>) -> usize {
    let available = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    match requested {
        Some(n) if n > available => {
            tracing::warn!(requested = n, available, "clamping thread count");
            available
        }
        Some(n) => n,
        None => available,
    }
}

fn read_input(cli: &Cli) -> anyhow::Result<Vec<u8>> {
    let mut data = Vec::new();
    match &cli.input {
        Some(path) => {
            File::open(path)
                .and_then(|mut f| f.read_to_end(&mut data))
                .with_context(|| format!("read '{}'", path.display()))?;
        }
        None => {
            io::stdin()
                .lock()
                .read_to_end(&mut data)
                .context("read stdin")?;
        }
    }
    Ok(data)
}

fn write_qoi<W: Write>(request: EncodeRequest<'_>, mut sink: W) -> anyhow::Result<u64> {
    let written = request
        .write_to(&mut sink, Unstoppable)
        .context("encode QOI image")?;
    sink.flush().context("flush output")?;
    Ok(written)
}
