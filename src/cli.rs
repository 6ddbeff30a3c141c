use clap::{command, value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

use crate::chart::RenderOptions;

/// Options shared by every binary.
#[derive(Debug)]
pub struct CommonArgs {
    pub output_dir: Option<PathBuf>,
    pub options: RenderOptions,
    pub verbose: u8,
    pub quiet: bool,
}

/// Arguments of the binaries that walk a fixed list of result files.
#[derive(Debug)]
pub struct BatchArgs {
    pub dir: PathBuf,
    pub pattern: Option<String>,
    /// Axis labels of the charts drawn for `--glob` matches.
    pub glob_y_label: String,
    pub glob_x_label: String,
    pub common: CommonArgs,
}

impl BatchArgs {
    /// Images go to `--output-dir`, or next to the inputs.
    pub fn output_dir(&self) -> PathBuf {
        self.common.output_dir.clone().unwrap_or_else(|| self.dir.clone())
    }
}

#[derive(Debug)]
pub struct PlotArgs {
    pub quicksort: PathBuf,
    pub mergesort: Option<PathBuf>,
    pub common: CommonArgs,
}

fn with_common_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("output_dir")
            .help("Directory the images are written to")
            .long("output-dir")
            .short('o')
            .value_parser(value_parser!(PathBuf)),
    )
    .arg(
        Arg::new("width")
            .help("Image width in pixels")
            .long("width")
            .default_value("1200")
            .value_parser(value_parser!(u32).range(100..)),
    )
    .arg(
        Arg::new("height")
            .help("Image height in pixels")
            .long("height")
            .default_value("600")
            .value_parser(value_parser!(u32).range(100..)),
    )
    .arg(
        Arg::new("verbose")
            .help("More log output (-v, -vv)")
            .long("verbose")
            .short('v')
            .action(ArgAction::Count),
    )
    .arg(
        Arg::new("quiet")
            .help("Only log errors")
            .long("quiet")
            .short('q')
            .action(ArgAction::SetTrue),
    )
}

fn common_args(arguments: &ArgMatches) -> CommonArgs {
    let defaults = RenderOptions::default();
    CommonArgs {
        output_dir: arguments.get_one::<PathBuf>("output_dir").cloned(),
        options: RenderOptions {
            width: arguments.get_one::<u32>("width").copied().unwrap_or(defaults.width),
            height: arguments.get_one::<u32>("height").copied().unwrap_or(defaults.height),
        },
        verbose: arguments.get_count("verbose"),
        quiet: arguments.get_flag("quiet"),
    }
}

pub fn batch_command(name: &'static str, about: &'static str) -> Command {
    with_common_args(command!(name).about(about))
        .arg(
            Arg::new("dir")
                .help("Directory holding the result files")
                .long("dir")
                .short('d')
                .default_value(".")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("glob")
                .help("Also plot every file matching this pattern that is not already plotted")
                .long("glob")
                .short('g'),
        )
        .arg(
            Arg::new("y_label")
                .help("Y axis label of the charts drawn for --glob matches")
                .long("y-label")
                .default_value("Tiempo de Ejecución [s]"),
        )
        .arg(
            Arg::new("x_label")
                .help("X axis label of the charts drawn for --glob matches")
                .long("x-label")
                .default_value("Tamaño de N"),
        )
}

pub fn batch_args(arguments: &ArgMatches) -> BatchArgs {
    BatchArgs {
        dir: arguments
            .get_one::<PathBuf>("dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(".")),
        pattern: arguments.get_one::<String>("glob").cloned(),
        glob_y_label: label(arguments, "y_label"),
        glob_x_label: label(arguments, "x_label"),
        common: common_args(arguments),
    }
}

fn label(arguments: &ArgMatches, id: &str) -> String {
    arguments.get_one::<String>(id).cloned().unwrap_or_default()
}

pub fn batch_cli(name: &'static str, about: &'static str) -> BatchArgs {
    batch_args(&batch_command(name, about).get_matches())
}

pub fn plot_command() -> Command {
    with_common_args(
        command!("plot")
            .about("Plots quicksort results, compared against mergesort when a second file is given.")
            .arg(
                Arg::new("quicksort")
                    .help("CSV with the quicksort averages")
                    .required(true)
                    .index(1)
                    .value_parser(value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("mergesort")
                    .help("CSV with the mergesort averages")
                    .required(false)
                    .index(2)
                    .value_parser(value_parser!(PathBuf)),
            ),
    )
}

pub fn plot_args(arguments: &ArgMatches) -> PlotArgs {
    let quicksort = match arguments.get_one::<PathBuf>("quicksort") {
        Some(path) => path.clone(),
        None => panic!("Quicksort results are required"),
    };

    PlotArgs {
        quicksort,
        mergesort: arguments.get_one::<PathBuf>("mergesort").cloned(),
        common: common_args(arguments),
    }
}

/// Exits with a usage message and a non-zero status when the quicksort file is missing.
pub fn plot_cli() -> PlotArgs {
    plot_args(&plot_command().get_matches())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn plot_requires_quicksort_file() {
        let err = plot_command().try_get_matches_from(["plot"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn plot_takes_one_or_two_files() {
        let matches = plot_command().try_get_matches_from(["plot", "qs.csv"]).unwrap();
        let args = plot_args(&matches);
        assert_eq!(args.quicksort, PathBuf::from("qs.csv"));
        assert!(args.mergesort.is_none());

        let matches = plot_command()
            .try_get_matches_from(["plot", "qs.csv", "ms.csv", "-vv"])
            .unwrap();
        let args = plot_args(&matches);
        assert_eq!(args.mergesort, Some(PathBuf::from("ms.csv")));
        assert_eq!(args.common.verbose, 2);
    }

    #[test]
    fn batch_defaults() {
        let matches = batch_command("kruskal_plots", "test").try_get_matches_from(["kruskal_plots"]).unwrap();
        let args = batch_args(&matches);
        assert_eq!(args.dir, PathBuf::from("."));
        assert_eq!(args.output_dir(), PathBuf::from("."));
        assert_eq!(args.common.options, RenderOptions::default());
        assert!(args.pattern.is_none());
        assert_eq!(args.glob_x_label, "Tamaño de N");
    }

    #[test]
    fn batch_overrides() {
        let matches = batch_command("sorting_plots", "test")
            .try_get_matches_from([
                "sorting_plots",
                "--dir",
                "runs",
                "-o",
                "plots",
                "--width",
                "800",
                "--glob",
                "runs/*.csv",
                "--y-label",
                "Accesos a disco I/O",
                "-q",
            ])
            .unwrap();
        let args = batch_args(&matches);
        assert_eq!(args.output_dir(), PathBuf::from("plots"));
        assert_eq!(args.common.options.width, 800);
        assert_eq!(args.pattern.as_deref(), Some("runs/*.csv"));
        assert_eq!(args.glob_y_label, "Accesos a disco I/O");
        assert!(args.common.quiet);
    }

    #[test]
    fn tiny_images_are_rejected() {
        assert!(plot_command()
            .try_get_matches_from(["plot", "qs.csv", "--width", "10"])
            .is_err());
    }
}
