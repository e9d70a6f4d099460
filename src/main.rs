//! Command line driver: finds `.jack` sources and writes `.vm` files.
use std::{
    fs, io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use clap_stdin::FileOrStdin;
use jackc::{
    lexer::{tokens_to_xml, Lexer},
    Compilation, Result,
};
use log::{error, info, warn, LevelFilter};
use simple_logger::SimpleLogger;

/// Compile Jack classes into VM code.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// A .jack file, a directory of .jack files, or `-` to read one class from stdin
    input: FileOrStdin,

    /// Also write a <Name>T.xml token dump next to each source file
    #[arg(long)]
    tokens: bool,

    /// Write .vm files into this directory instead of next to the sources
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn report(origin: &str, compilation: &Compilation) {
    for diagnostic in &compilation.diagnostics {
        error!("{}: {}", origin, diagnostic);
    }
}

/// Every `*.jack` file directly inside `dir`, sorted by path.
fn find_jack_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = vec![];
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "jack") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn compile_file(path: &Path, cli: &Cli) -> Result<bool> {
    info!("compiling {}", path.display());
    let source = fs::read_to_string(path)?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if cli.tokens {
        let (tokens, _) = Lexer::tokenize(&source);
        let xml_path = path.with_file_name(format!("{}T.xml", stem));
        fs::write(&xml_path, tokens_to_xml(&tokens))?;
        info!("wrote {}", xml_path.display());
    }

    let compilation = jackc::compile(&source);
    report(&path.display().to_string(), &compilation);
    if !compilation.class_name.is_empty() && compilation.class_name != stem {
        warn!(
            "{}: class {} does not match the file name",
            path.display(),
            compilation.class_name
        );
    }

    let dir = match &cli.out_dir {
        Some(dir) => dir.clone(),
        None => path.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    let vm_path = dir.join(format!("{}.vm", stem));
    fs::write(&vm_path, compilation.to_vm_text())?;
    info!("wrote {}", vm_path.display());

    Ok(compilation.is_reliable())
}

/// Returns whether every class compiled without diagnostics.
fn run(cli: Cli) -> Result<bool> {
    if cli.input.is_stdin() {
        let source = cli
            .input
            .contents()
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
        let compilation = jackc::compile(&source);
        report("<stdin>", &compilation);
        print!("{}", compilation.to_vm_text());
        return Ok(compilation.is_reliable());
    }

    let path = PathBuf::from(cli.input.filename());
    let sources = if path.is_dir() {
        find_jack_files(&path)?
    } else {
        vec![path]
    };
    if sources.is_empty() {
        warn!("no .jack files found");
    }
    if let Some(dir) = &cli.out_dir {
        fs::create_dir_all(dir)?;
    }

    let mut all_reliable = true;
    for source in &sources {
        all_reliable &= compile_file(source, &cli)?;
    }
    Ok(all_reliable)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = SimpleLogger::new()
        .with_level(log_level(cli.verbose))
        .env()
        .init()
    {
        eprintln!("failed to initialize logging: {}", err);
    }

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            error!("{}", err);
            ExitCode::from(2)
        }
    }
}
