use result_plots::{
    batch::run_batch,
    cli, logger, presets,
    render::{PngWriter, Renderer},
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let arguments = cli::plot_cli();
    logger::init_logging(arguments.common.verbose, arguments.common.quiet);

    let jobs = presets::quicksort_report(&arguments.quicksort, arguments.mergesort.as_deref());
    let mut renderer = Renderer::new(
        PngWriter::new(arguments.common.options),
        arguments.common.output_dir.clone(),
    );

    let report = run_batch(&mut renderer, &jobs);
    report.log_summary();

    Ok(())
}
