use result_plots::{
    chart::{render_rgb, Chart, ChartSpec, RenderOptions, Series, SeriesStyle},
    render::{PngWriter, Renderer},
};
use std::fs;
use tempfile::tempdir;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

fn small() -> RenderOptions {
    RenderOptions {
        width: 400,
        height: 300,
    }
}

#[test]
fn single_chart_is_a_png() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("time_ms.csv");
    fs::write(&input, "16,0.2\n32,0.5\n64,1.1\n").unwrap();
    let mut renderer = Renderer::new(PngWriter::new(small()), None);

    let path = renderer
        .render_single(&input, "Tiempo [s]", "Tamaño de N", "Tiempo de ejecucion para mergesort")
        .unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], &PNG_SIGNATURE);
}

#[test]
fn rerun_overwrites_the_image() {
    let dir = tempdir().unwrap();
    let ms = dir.path().join("io_ms.csv");
    let qs = dir.path().join("io_qs.csv");
    fs::write(&ms, "16,100\n32,210\n").unwrap();
    fs::write(&qs, "16,90\n32,260\n").unwrap();
    let stale = dir.path().join("Accesos_IO.png");
    fs::write(&stale, b"stale").unwrap();
    let mut renderer = Renderer::new(PngWriter::new(small()), Some(dir.path().to_path_buf()));

    let path = renderer
        .render_dual(&ms, &qs, "Accesos a disco I/O", "Tamaño de N", "Accesos IO", "MergeSort", "QuickSort")
        .unwrap();

    assert_eq!(path, stale);
    assert_eq!(&fs::read(&path).unwrap()[..8], &PNG_SIGNATURE);
}

#[test]
fn in_memory_render_draws_something() {
    let chart = Chart::new(
        ChartSpec::new("y", "x", "flat"),
        vec![Series::new(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0], SeriesStyle::primary())],
    );
    let options = small();

    let buffer = render_rgb(&chart, &options).unwrap();

    assert_eq!(buffer.len(), 400 * 300 * 3);
    assert!(buffer.iter().any(|&b| b != 255));
}
