use result_plots::{
    batch::run_batch,
    cli, logger, presets,
    render::{PngWriter, Renderer},
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let arguments = cli::batch_cli(
        "sorting_compare",
        "Overlays mergesort and quicksort results, one chart per metric.",
    );
    logger::init_logging(arguments.common.verbose, arguments.common.quiet);

    let jobs = presets::sorting_duals(&arguments.dir);
    let mut renderer = Renderer::new(
        PngWriter::new(arguments.common.options),
        Some(arguments.output_dir()),
    );
    run_batch(&mut renderer, &jobs).log_summary();

    Ok(())
}
