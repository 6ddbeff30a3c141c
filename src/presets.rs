//! The charts each experiment produces, with the file names the experiment
//! runners write.

use plotters::style::RGBColor;
use std::path::Path;

use crate::batch::Job;
use crate::chart::{ChartSpec, Marker, SeriesStyle};
use crate::compare::CompareJob;
use crate::naming::OutputName;
use crate::render::{Layer, Plot, SeriesSource, KRUSKAL_SIZES};
use crate::table::Column;

const SIZE_LABEL: &str = "Tamaño de N";
const IO_LABEL: &str = "Accesos a disco I/O";
const TIME_LABEL: &str = "Tiempo de Ejecución [s]";

const SIZE_COLUMN: &str = "Tamaño";
const TIME_COLUMN: &str = "TiempoPromedio(s)";
const IO_COLUMN: &str = "AccesosIOPromedio";

const QUICKSORT_STYLE: SeriesStyle = SeriesStyle::new(RGBColor(0xFF, 0x57, 0x33), Marker::Circle, false);
const MERGESORT_STYLE: SeriesStyle = SeriesStyle::new(RGBColor(0x33, 0xA8, 0xFF), Marker::Square, false);

/// One chart per mergesort/quicksort result file.
pub fn sorting_singles(dir: &Path) -> Vec<Job> {
    [
        ("io_ms.csv", IO_LABEL, "Accesos I/O para mergesort"),
        ("time_ms.csv", TIME_LABEL, "Tiempo de ejecucion para mergesort"),
        ("io_qs.csv", IO_LABEL, "Accesos I/O para quicksort"),
        ("time_qs.csv", TIME_LABEL, "Tiempo de ejecucion para quicksort"),
    ]
    .into_iter()
    .map(|(file, y_label, title)| Job::Plot(Plot::single(dir.join(file), ChartSpec::new(y_label, SIZE_LABEL, title))))
    .collect()
}

/// Mergesort and quicksort overlaid, one chart per metric.
pub fn sorting_duals(dir: &Path) -> Vec<Job> {
    [
        ("io_ms.csv", "io_qs.csv", IO_LABEL, "Accesos IO"),
        ("time_ms.csv", "time_qs.csv", TIME_LABEL, "Tiempo de ejecucion"),
    ]
    .into_iter()
    .map(|(ms, qs, y_label, title)| {
        let spec = ChartSpec::new(y_label, SIZE_LABEL, title);
        Job::Plot(Plot::dual(dir.join(ms), dir.join(qs), spec, "MergeSort", "QuickSort"))
    })
    .collect()
}

/// Kruskal averages, one value per size in [`KRUSKAL_SIZES`].
pub fn kruskal_fixed(dir: &Path) -> Vec<Job> {
    [
        ("time_avg_arreglo_no_opti.csv", "Kruskal con arreglo (sin optimización)"),
        ("time_avg_heap_no_opti.csv", "Kruskal con heap (sin optimización)"),
        ("time_avg_arreglo_opti.csv", "Kruskal con arreglo (con optimización)"),
        ("time_avg_heap_opti.csv", "Kruskal con heap (con optimización)"),
    ]
    .into_iter()
    .map(|(file, title)| {
        let spec = ChartSpec::new("Tiempo [s]", SIZE_LABEL, title);
        Job::Plot(Plot::fixed_sizes(dir.join(file), &KRUSKAL_SIZES, spec))
    })
    .collect()
}

/// Charts for the quicksort runner's summary file, compared against the
/// mergesort summary when one is given.
pub fn quicksort_report(quicksort: &Path, mergesort: Option<&Path>) -> Vec<Job> {
    let metrics = [
        (TIME_COLUMN, "Tiempo de ejecución (segundos)", "tiempo"),
        (IO_COLUMN, "Número de accesos a disco", "io"),
    ];
    let x_label = "Tamaño (millones de elementos)";

    let mut jobs: Vec<Job> = Vec::new();
    for (column, y_label, short) in metrics {
        let quicksort_layer = Layer::new(SeriesSource::named(quicksort, SIZE_COLUMN, column), QUICKSORT_STYLE);
        let plot = match mergesort {
            Some(mergesort) => {
                let title = match column {
                    TIME_COLUMN => "Comparación de tiempo de ejecución: Quicksort vs Mergesort",
                    _ => "Comparación de accesos a disco: Quicksort vs Mergesort",
                };
                Plot {
                    spec: ChartSpec::new(y_label, x_label, title),
                    layers: vec![
                        quicksort_layer.with_label("Quicksort Externo"),
                        Layer::new(SeriesSource::named(mergesort, SIZE_COLUMN, column), MERGESORT_STYLE)
                            .with_label("Mergesort Externo"),
                    ],
                    output: OutputName::Fixed(format!("grafico_{}_comparacion.png", short)),
                }
            }
            None => {
                let title = match column {
                    TIME_COLUMN => "Tiempo de ejecución: Quicksort Externo",
                    _ => "Accesos a disco: Quicksort Externo",
                };
                Plot {
                    spec: ChartSpec::new(y_label, x_label, title),
                    layers: vec![quicksort_layer],
                    output: OutputName::Fixed(format!("grafico_{}_quicksort.png", short)),
                }
            }
        };
        jobs.push(plot.into());
    }

    if let Some(mergesort) = mergesort {
        jobs.push(
            CompareJob {
                path_a: quicksort.to_path_buf(),
                path_b: mergesort.to_path_buf(),
                has_headers: true,
                key: Column::name(SIZE_COLUMN),
                label_a: "QS".to_string(),
                label_b: "MS".to_string(),
                output: "comparacion_algoritmos.csv".to_string(),
            }
            .into(),
        );
    }
    jobs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn outputs(jobs: &[Job]) -> Vec<PathBuf> {
        jobs.iter()
            .map(|job| match job {
                Job::Plot(plot) => plot.output_path(None),
                Job::Compare(compare) => PathBuf::from(&compare.output),
            })
            .collect()
    }

    #[test]
    fn sorting_singles_are_named_after_inputs() {
        let jobs = sorting_singles(Path::new("runs"));
        assert_eq!(outputs(&jobs)[0], PathBuf::from("runs/io_ms.png"));
        assert_eq!(jobs.len(), 4);
    }

    #[test]
    fn sorting_duals_are_named_after_titles() {
        let names = outputs(&sorting_duals(Path::new(".")));
        assert_eq!(names, vec![PathBuf::from("Accesos_IO.png"), PathBuf::from("Tiempo_de_ejecucion.png")]);
    }

    #[test]
    fn kruskal_uses_eight_sizes() {
        match &kruskal_fixed(Path::new("."))[0] {
            Job::Plot(plot) => assert_eq!(
                plot.layers[0].source,
                SeriesSource::fixed_sizes("./time_avg_arreglo_no_opti.csv", &KRUSKAL_SIZES)
            ),
            other => panic!("unexpected job: {:?}", other),
        }
    }

    #[test]
    fn quicksort_alone_has_no_comparison() {
        let names = outputs(&quicksort_report(Path::new("qs.csv"), None));
        assert_eq!(
            names,
            vec![PathBuf::from("grafico_tiempo_quicksort.png"), PathBuf::from("grafico_io_quicksort.png")]
        );
    }

    #[test]
    fn quicksort_with_mergesort_adds_comparison() {
        let jobs = quicksort_report(Path::new("qs.csv"), Some(Path::new("ms.csv")));
        assert_eq!(
            outputs(&jobs),
            vec![
                PathBuf::from("grafico_tiempo_comparacion.png"),
                PathBuf::from("grafico_io_comparacion.png"),
                PathBuf::from("comparacion_algoritmos.csv"),
            ]
        );
    }
}
