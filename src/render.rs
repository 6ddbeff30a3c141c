use std::fs;
use std::path::{Path, PathBuf};

use crate::chart::{render_png, Chart, ChartSpec, RenderOptions, Series, SeriesStyle};
use crate::error::{PlotError, Result};
use crate::naming::OutputName;
use crate::table::{Column, ResultTable};

/// Problem sizes of the Kruskal experiments, in the order the averages are written.
pub const KRUSKAL_SIZES: [f64; 8] = [32.0, 64.0, 128.0, 256.0, 512.0, 1024.0, 2048.0, 4096.0];

/// Where the x values of a series come from.
#[derive(Debug, Clone, PartialEq)]
pub enum XValues {
    Column(Column),
    /// Predeclared values; the file must have exactly this many rows.
    Fixed(Vec<f64>),
}

/// A result file and the columns one series is drawn from.
///
/// Header-less files put the input size in column 0 and the metric in column 1.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSource {
    pub path: PathBuf,
    pub has_headers: bool,
    pub x: XValues,
    pub y: Column,
}

impl SeriesSource {
    pub fn positional<P: AsRef<Path>>(path: P) -> SeriesSource {
        SeriesSource {
            path: path.as_ref().to_path_buf(),
            has_headers: false,
            x: XValues::Column(Column::Index(0)),
            y: Column::Index(1),
        }
    }

    pub fn named<P: AsRef<Path>>(path: P, x: &str, y: &str) -> SeriesSource {
        SeriesSource {
            path: path.as_ref().to_path_buf(),
            has_headers: true,
            x: XValues::Column(Column::name(x)),
            y: Column::name(y),
        }
    }

    /// Single-column file of metrics plotted against `sizes`.
    pub fn fixed_sizes<P: AsRef<Path>>(path: P, sizes: &[f64]) -> SeriesSource {
        SeriesSource {
            path: path.as_ref().to_path_buf(),
            has_headers: false,
            x: XValues::Fixed(sizes.to_vec()),
            y: Column::Index(0),
        }
    }

    pub fn load(&self) -> Result<ResultTable> {
        ResultTable::from_path(&self.path, self.has_headers)
    }

    /// Picks the x and y values out of an already loaded table.
    pub fn extract(&self, table: &ResultTable) -> Result<(Vec<f64>, Vec<f64>)> {
        let xs = match &self.x {
            XValues::Fixed(values) => {
                table.require_rows(values.len())?;
                values.clone()
            }
            XValues::Column(column) => {
                let xs = table.column(column)?;
                if xs.is_empty() {
                    return Err(PlotError::EmptyTable(table.source().to_string()));
                }
                xs
            }
        };
        let ys = table.column(&self.y)?;
        Ok((xs, ys))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub source: SeriesSource,
    pub label: Option<String>,
    pub style: SeriesStyle,
}

impl Layer {
    pub fn new(source: SeriesSource, style: SeriesStyle) -> Layer {
        Layer {
            source,
            label: None,
            style,
        }
    }

    pub fn with_label(mut self, label: &str) -> Layer {
        self.label = Some(label.to_string());
        self
    }
}

/// Everything needed to produce one image.
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub spec: ChartSpec,
    pub layers: Vec<Layer>,
    pub output: OutputName,
}

impl Plot {
    pub fn single<P: AsRef<Path>>(path: P, spec: ChartSpec) -> Plot {
        Plot {
            spec,
            layers: vec![Layer::new(SeriesSource::positional(path), SeriesStyle::primary())],
            output: OutputName::InputStem,
        }
    }

    pub fn dual<P: AsRef<Path>>(path_a: P, path_b: P, spec: ChartSpec, legend_a: &str, legend_b: &str) -> Plot {
        Plot {
            spec,
            layers: vec![
                Layer::new(SeriesSource::positional(path_a), SeriesStyle::primary()).with_label(legend_a),
                Layer::new(SeriesSource::positional(path_b), SeriesStyle::secondary()).with_label(legend_b),
            ],
            output: OutputName::Title,
        }
    }

    pub fn fixed_sizes<P: AsRef<Path>>(path: P, sizes: &[f64], spec: ChartSpec) -> Plot {
        Plot {
            spec,
            layers: vec![Layer::new(SeriesSource::fixed_sizes(path, sizes), SeriesStyle::primary())],
            output: OutputName::InputStem,
        }
    }

    pub fn with_output(mut self, output: OutputName) -> Plot {
        self.output = output;
        self
    }

    pub fn inputs(&self) -> impl Iterator<Item = &Path> {
        self.layers.iter().map(|layer| layer.source.path.as_path())
    }

    /// Builds the chart from tables loaded for each layer, in layer order.
    pub fn build(&self, tables: &[ResultTable]) -> Result<Chart> {
        let series = self
            .layers
            .iter()
            .zip(tables)
            .map(|(layer, table)| {
                let (xs, ys) = layer.source.extract(table)?;
                let series = Series::new(&xs, &ys, layer.style);
                Ok(match &layer.label {
                    Some(label) => series.with_label(label),
                    None => series,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Chart::new(self.spec.clone(), series))
    }

    pub fn output_path(&self, output_dir: Option<&Path>) -> PathBuf {
        let input = self.inputs().next().unwrap_or_else(|| Path::new(""));
        self.output.resolve(input, &self.spec.title, output_dir)
    }
}

/// Turns a finished chart into a file.
pub trait ChartWriter {
    fn write(&mut self, chart: &Chart, path: &Path) -> Result<()>;
}

/// Writes PNG images through the plotters bitmap backend.
#[derive(Debug, Clone, Default)]
pub struct PngWriter {
    options: RenderOptions,
}

impl PngWriter {
    pub fn new(options: RenderOptions) -> PngWriter {
        PngWriter { options }
    }
}

impl ChartWriter for PngWriter {
    fn write(&mut self, chart: &Chart, path: &Path) -> Result<()> {
        render_png(chart, path, &self.options)
    }
}

pub struct Renderer<W: ChartWriter> {
    writer: W,
    output_dir: Option<PathBuf>,
}

impl<W: ChartWriter> Renderer<W> {
    pub fn new(writer: W, output_dir: Option<PathBuf>) -> Renderer<W> {
        Renderer { writer, output_dir }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Loads every layer, validates it and writes one image.
    ///
    /// Nothing is written if any layer fails; an existing image is overwritten.
    pub fn render(&mut self, plot: &Plot) -> Result<PathBuf> {
        let tables = plot
            .layers
            .iter()
            .map(|layer| layer.source.load())
            .collect::<Result<Vec<_>>>()?;
        let chart = plot.build(&tables)?;

        let path = plot.output_path(self.output_dir());
        ensure_parent(&path)?;
        self.writer.write(&chart, &path)?;
        log::info!("chart saved to {}", path.display());
        Ok(path)
    }

    /// Size (column 0) against metric (column 1), named after the input file.
    pub fn render_single(&mut self, path: &Path, y_label: &str, x_label: &str, title: &str) -> Result<PathBuf> {
        self.render(&Plot::single(path, ChartSpec::new(y_label, x_label, title)))
    }

    /// Two files overlaid with a legend, named after the title.
    #[allow(clippy::too_many_arguments)]
    pub fn render_dual(
        &mut self,
        path_a: &Path,
        path_b: &Path,
        y_label: &str,
        x_label: &str,
        title: &str,
        legend_a: &str,
        legend_b: &str,
    ) -> Result<PathBuf> {
        let spec = ChartSpec::new(y_label, x_label, title);
        self.render(&Plot::dual(path_a, path_b, spec, legend_a, legend_b))
    }

    pub fn render_fixed_sizes(
        &mut self,
        path: &Path,
        sizes: &[f64],
        y_label: &str,
        x_label: &str,
        title: &str,
    ) -> Result<PathBuf> {
        let spec = ChartSpec::new(y_label, x_label, title);
        self.render(&Plot::fixed_sizes(path, sizes, spec))
    }
}

pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(data: &str, has_headers: bool) -> ResultTable {
        ResultTable::from_reader(data.as_bytes(), "mem.csv", has_headers).unwrap()
    }

    #[test]
    fn positional_source_uses_size_then_metric() {
        let source = SeriesSource::positional("io_ms.csv");
        let (xs, ys) = source.extract(&table("16,100\n32,250\n", false)).unwrap();
        assert_eq!(xs, vec![16.0, 32.0]);
        assert_eq!(ys, vec![100.0, 250.0]);
    }

    #[test]
    fn fixed_source_checks_row_count() {
        let source = SeriesSource::fixed_sizes("t.csv", &KRUSKAL_SIZES);
        let short = table("0.1\n0.2\n0.3\n", false);
        assert!(matches!(
            source.extract(&short),
            Err(PlotError::RowCountMismatch { found: 3, expected: 8, .. })
        ));

        let full = table("1\n2\n3\n4\n5\n6\n7\n8\n", false);
        let (xs, ys) = source.extract(&full).unwrap();
        assert_eq!(xs, KRUSKAL_SIZES.to_vec());
        assert_eq!(ys[7], 8.0);
    }

    #[test]
    fn empty_table_is_rejected() {
        let source = SeriesSource::named("q.csv", "Tamaño", "AccesosIOPromedio");
        let empty = table("Tamaño,TiempoPromedio(s),AccesosIOPromedio\n", true);
        assert!(matches!(source.extract(&empty), Err(PlotError::EmptyTable(_))));
    }

    #[test]
    fn dual_plot_labels_both_series() {
        let plot = Plot::dual("a.csv", "b.csv", ChartSpec::new("IO", "N", "Accesos IO"), "MergeSort", "QuickSort");
        let tables = [table("1,2\n2,4\n", false), table("1,3\n2,5\n", false)];
        let chart = plot.build(&tables).unwrap();
        let labels: Vec<_> = chart.series.iter().map(|s| s.label.as_deref()).collect();
        assert_eq!(labels, vec![Some("MergeSort"), Some("QuickSort")]);
        assert_eq!(chart.series[1].style, SeriesStyle::secondary());
        assert_eq!(plot.output_path(None), PathBuf::from("Accesos_IO.png"));
    }

    #[test]
    fn single_plot_is_named_after_input() {
        let plot = Plot::single("data/time_qs.csv", ChartSpec::new("s", "N", "Tiempo"));
        assert_eq!(plot.output_path(None), PathBuf::from("data/time_qs.png"));
    }
}
