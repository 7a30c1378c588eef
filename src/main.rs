// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DOC SIMILARITY CLI
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// CLI para execução do harness de similaridade.
//
// Uso:
//   doc-similarity-cli ./corpus
//   doc-similarity-cli ./corpus --algo par --workers 8
//   doc-similarity-cli ./corpus -a par --json
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use anyhow::{bail, Context};
use doc_similarity::config::{parse_workers, ConfigError};
use doc_similarity::report::{aggregate_file_stats, render_sample_similarities, render_summary, render_top_pairs, RunReport};
use doc_similarity::utils::ActionTimer;
use doc_similarity::{load_harness_config, runner_for, ExecutionMode, HarnessConfig};
use std::path::PathBuf;

/// Argumentos da linha de comando
#[derive(Debug, Default)]
struct CliArgs {
    root: PathBuf,
    mode: Option<ExecutionMode>,
    workers: Option<Option<usize>>,
    sample: Option<usize>,
    json: bool,
}

impl CliArgs {
    /// Sobrescreve a configuração do ambiente com as flags
    fn apply(&self, config: &mut HarnessConfig) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(sample) = self.sample {
            config.sample_size = sample;
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Doc Similarity CLI v{}", doc_similarity::VERSION);
    eprintln!();
    eprintln!("Uso: {} <root_dir> [opções]", program);
    eprintln!();
    eprintln!("Opções:");
    eprintln!("  -a, --algo <seq|par>     Algoritmo (padrão: seq)");
    eprintln!("  -w, --workers <n|auto>   Workers do modo paralelo (padrão: 4)");
    eprintln!("      --sample <n>         Canto da matriz exibido (padrão: 5)");
    eprintln!("      --json               Relatório em JSON");
    eprintln!();
    eprintln!("Exemplos:");
    eprintln!("  {} ./corpus", program);
    eprintln!("  {} ./corpus --algo par --workers 8", program);
}

fn parse_args(args: &[String]) -> anyhow::Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut root: Option<PathBuf> = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-a" | "--algo" => {
                let value = iter.next().context("--algo requires a value")?;
                cli.mode = Some(ExecutionMode::parse(value)?);
            }
            "-w" | "--workers" => {
                let value = iter.next().context("--workers requires a value")?;
                cli.workers = Some(parse_workers(value)?);
            }
            "--sample" => {
                let value = iter.next().context("--sample requires a value")?;
                let sample = value.parse::<usize>().map_err(|_| ConfigError::InvalidNumber {
                    option: "--sample".to_string(),
                    value: value.clone(),
                })?;
                cli.sample = Some(sample);
            }
            "--json" => cli.json = true,
            flag if flag.starts_with('-') => bail!("unknown option: {}", flag),
            path => {
                if root.is_some() {
                    bail!("unexpected argument: {}", path);
                }
                root = Some(PathBuf::from(path));
            }
        }
    }

    cli.root = root.context("missing <root_dir>")?;
    Ok(cli)
}

/// Carrega o primeiro .env encontrado (diretório atual, depois o do crate)
fn load_dotenv() {
    let candidates = [
        PathBuf::from(".env"),
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(".env"),
    ];

    for path in candidates.iter().filter(|p| p.is_file()) {
        match dotenvy::from_path(path) {
            Ok(()) => {
                eprintln!("✓ Carregado .env de: {}", path.display());
                return;
            }
            Err(e) => eprintln!("⚠ Erro ao carregar {}: {}", path.display(), e),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Carregar .env antes de ler a configuração
    load_dotenv();

    // Inicializar logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("doc-similarity-cli");

    if args.len() < 2 || args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage(program);
        std::process::exit(1);
    }

    let cli = match parse_args(&args[1..]) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("✗ Erro: {}", e);
            eprintln!();
            print_usage(program);
            std::process::exit(1);
        }
    };

    if !cli.root.is_dir() {
        eprintln!("ERROR: '{}' is not a directory.", cli.root.display());
        std::process::exit(1);
    }

    let mut config = load_harness_config();
    cli.apply(&mut config);

    let runner = runner_for(&config)?;
    if config.mode == ExecutionMode::Parallel {
        println!("Workers used: {}", runner.workers());
    }

    let timer = ActionTimer::start("Execução completa");
    let output = runner.run(&cli.root)?;
    let wall_secs = timer.elapsed().as_secs_f64();

    if output.is_empty() {
        println!("No files found.");
        return Ok(());
    }

    if cli.json {
        let report = RunReport::from_output(&output, wall_secs, config.sample_size, config.top_pairs);
        println!("{}", report.to_json()?);
        return Ok(());
    }

    let stats = aggregate_file_stats(&output.records);
    println!();
    print!("{}", render_summary(output.mode.label(), &stats, output.vocabulary_size, wall_secs));
    println!();
    print!("{}", render_sample_similarities(&output.records, &output.matrix, config.sample_size));

    let pairs = output.matrix.most_similar_pairs(config.top_pairs, f64::MIN_POSITIVE);
    let top = render_top_pairs(&output.records, &pairs);
    if !top.is_empty() {
        println!();
        print!("{}", top);
    }

    log::debug!("{}", output.timings.summary());

    Ok(())
}
