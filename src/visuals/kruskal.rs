use result_plots::{
    batch::run_batch,
    cli, logger, presets,
    render::{PngWriter, Renderer},
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let arguments = cli::batch_cli(
        "kruskal_plots",
        "Plots the Kruskal time averages (one column, N = 32..4096).",
    );
    logger::init_logging(arguments.common.verbose, arguments.common.quiet);

    let jobs = presets::kruskal_fixed(&arguments.dir);
    let mut renderer = Renderer::new(
        PngWriter::new(arguments.common.options),
        Some(arguments.output_dir()),
    );
    run_batch(&mut renderer, &jobs).log_summary();

    Ok(())
}
