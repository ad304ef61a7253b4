use clap::Parser;
use cleanphotos::batch::{self, CleanupEvent, CleanupOptions};
use cleanphotos::directory::{self, ScanOptions, ScanSummary};
use cleanphotos::error::ScanError;
use cleanphotos::ui;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cleanphotos", version)]
#[command(
    about = "Busca imágenes en una carpeta, elimina toda su metadata y los datos añadidos al final, y sobrescribe los originales."
)]
struct Cli {
    /// Carpeta con las imágenes (si se omite, se pregunta)
    folder: Option<String>,

    /// Busca también en subcarpetas (activado por defecto)
    #[arg(short, long, overrides_with = "no_recursive")]
    recursive: bool,

    /// Procesa solo la carpeta indicada, sin entrar en subcarpetas
    #[arg(long, overrides_with = "recursive")]
    no_recursive: bool,

    /// Informa de lo que se limpiaría sin modificar ningún archivo
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Imprime una línea por cada archivo procesado
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            recursive: self.recursive || !self.no_recursive,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    ui::render_header();

    let input = match cli.folder.clone() {
        Some(folder) => folder,
        None => match ui::prompt_for_folder() {
            Ok(Some(line)) => line,
            Ok(None) => {
                eprintln!("{}", style("│ No se indicó ninguna carpeta.").red());
                return ExitCode::FAILURE;
            }
            Err(error) => {
                eprintln!(
                    "{}",
                    style(format!("│ Error al leer la entrada: {error}")).red()
                );
                return ExitCode::FAILURE;
            }
        },
    };

    let root = match directory::resolve_root(&input) {
        Ok(root) => root,
        Err(error) => return report_fatal(&error),
    };

    let files = match directory::collect_image_files(&root, cli.scan_options()) {
        Ok(files) => files,
        Err(error) => return report_fatal(&error),
    };

    if files.is_empty() {
        ui::render_no_files(&root);
        return ExitCode::SUCCESS;
    }

    ui::render_scan_summary(&root, &ScanSummary::from_files(&files));

    if !cli.dry_run {
        ui::render_overwrite_warning();
    }

    let options = CleanupOptions {
        dry_run: cli.dry_run,
    };
    let progress = (!cli.dry_run).then(|| progress_bar(files.len() as u64));

    let summary = batch::run_cleanup(files, options, |event| {
        if let Some(line) = ui::event_line(&event, cli.verbose) {
            match &progress {
                Some(bar) => bar.println(line),
                None => println!("{line}"),
            }
        }

        if let Some(bar) = &progress {
            if matches!(
                event,
                CleanupEvent::Cleaned { .. }
                    | CleanupEvent::Skipped { .. }
                    | CleanupEvent::Failed { .. }
            ) {
                bar.inc(1);
            }
        }
    });

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    ui::render_cleanup_summary(&summary, cli.dry_run);
    ExitCode::SUCCESS
}

fn report_fatal(error: &ScanError) -> ExitCode {
    eprintln!("{}", style(format!("│ {error}")).red());
    ExitCode::FAILURE
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "cleanphotos=debug" } else { "error" };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

fn progress_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.cyan} Limpiando [{bar:30.cyan/blue}] {pos}/{len} · {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(&["▹▹▹", "▸▹▹", "▹▸▹", "▹▹▸", "▹▹▹"]),
    );
    bar
}
