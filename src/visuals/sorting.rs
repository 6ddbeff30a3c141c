use result_plots::{
    batch::{extend_unique, jobs_from_glob, run_batch},
    cli, logger, presets,
    render::{PngWriter, Renderer},
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let arguments = cli::batch_cli(
        "sorting_plots",
        "Plots every mergesort/quicksort result file (io_ms, time_ms, io_qs, time_qs).",
    );
    logger::init_logging(arguments.common.verbose, arguments.common.quiet);

    let mut jobs = presets::sorting_singles(&arguments.dir);
    if let Some(pattern) = &arguments.pattern {
        let matches = jobs_from_glob(pattern, &arguments.glob_y_label, &arguments.glob_x_label)?;
        let added = extend_unique(&mut jobs, matches);
        log::debug!("{} extra files from {}", added, pattern);
    }

    let mut renderer = Renderer::new(
        PngWriter::new(arguments.common.options),
        Some(arguments.output_dir()),
    );
    run_batch(&mut renderer, &jobs).log_summary();

    Ok(())
}
