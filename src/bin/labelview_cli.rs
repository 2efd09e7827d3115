//! CLI tool for labelview - offline preview of a label sheet
//!
//! Usage:
//!   labelview_cli sheet.json                                   # blank sheet
//!   labelview_cli sheet.json --skip 5,6                        # skips, no start
//!   labelview_cli sheet.json --start 3 --skip 5,6              # inputs only
//!   labelview_cli sheet.json --start 3 --placement resp.json   # server answer
//!   labelview_cli sheet.json --placement resp.json --json      # paint plan JSON

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::Parser;
    use log::LevelFilter;
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    use labelview::layout::SheetGeometry;
    use labelview::model::PlacementModel;
    use labelview::render::{paint_page, CellPaint, PagePaint};
    use labelview::sync::PlacementResponse;
    use labelview::{LabelError, Result, ViewerConfig};

    #[derive(Parser, Debug)]
    #[command(name = "labelview_cli", version, about = "Offline preview of a label sheet")]
    struct Args {
        /// Viewer configuration JSON (sheet dimensions, camelCase keys)
        config: PathBuf,

        /// Placement preview response JSON (`{"pages":..,"placed":[..]}`)
        #[arg(long)]
        placement: Option<PathBuf>,

        /// Start slot (0-based linear index)
        #[arg(long)]
        start: Option<u32>,

        /// Skipped slots, comma separated
        #[arg(long, value_delimiter = ',')]
        skip: Vec<u32>,

        /// Emit the paint plan of every page as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Log view-model transitions
        #[arg(short, long)]
        verbose: bool,
    }

    fn cell_text(cell: &CellPaint) -> String {
        let body = match (&cell.code, cell.skipped, cell.before_start) {
            (Some(code), _, _) => code.clone(),
            (None, true, _) => "xx".to_string(),
            (None, false, true) => "..".to_string(),
            (None, false, false) => "--".to_string(),
        };
        if cell.is_start {
            format!(">{body}")
        } else {
            body
        }
    }

    fn print_page(plan: &PagePaint, pages: u32, columns: u32) {
        println!(
            "Page {}/{} ({:.0}x{:.0} px)",
            plan.page + 1,
            pages,
            plan.width,
            plan.height
        );
        let texts: Vec<String> = plan.cells.iter().map(cell_text).collect();
        let width = texts.iter().map(String::len).max().unwrap_or(2);
        let columns = usize::try_from(columns).unwrap_or(1).max(1);
        for row in texts.chunks(columns) {
            let line: Vec<String> = row.iter().map(|t| format!("{t:<width$}")).collect();
            println!("  {}", line.join(" | "));
        }
        println!();
    }

    fn run(args: &Args) -> Result<()> {
        let config = ViewerConfig::from_json(&fs::read_to_string(&args.config)?)?;
        let geometry = SheetGeometry::new(&config.sheet);
        let grid = config.sheet.grid();

        let mut model = PlacementModel::with_skips(args.skip.iter().copied());
        if let Some(start) = args.start {
            model.set_start(start)?;
        }
        if let Some(path) = &args.placement {
            if model.start().is_none() {
                return Err(LabelError::InvalidState(
                    "--placement requires --start".to_string(),
                ));
            }
            let response: PlacementResponse = serde_json::from_str(&fs::read_to_string(path)?)?;
            let report = model.apply(&response, grid);
            log::info!(
                "applied {} placements over {} pages ({} dropped)",
                model.placed_len(),
                model.pages(),
                report.dropped
            );
        }

        let pages = model.pages().max(1);
        let plans: Vec<PagePaint> = (0..pages)
            .map(|page| paint_page(&model, &geometry, page, 1.0))
            .collect();

        if args.json {
            println!("{}", serde_json::to_string_pretty(&plans)?);
            return Ok(());
        }

        println!(
            "{} x {} labels, {} per page, {:.3} px/unit",
            grid.columns(),
            grid.rows(),
            grid.per_page(),
            geometry.px_per_unit
        );
        for plan in &plans {
            print_page(plan, pages, grid.columns());
        }
        Ok(())
    }

    pub fn main() -> ExitCode {
        let args = Args::parse();
        let level = if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        };
        let _ = TermLogger::init(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        );

        match run(&args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
