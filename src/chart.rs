use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::error::Error;
use std::ops::Range;
use std::path::Path;

use crate::error::{PlotError, Result};

/// Title and axis labels of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl ChartSpec {
    pub fn new(y_label: &str, x_label: &str, title: &str) -> ChartSpec {
        ChartSpec {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Marker {
    Circle,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    pub color: RGBColor,
    pub marker: Marker,
    pub dashed: bool,
}

impl SeriesStyle {
    pub const fn new(color: RGBColor, marker: Marker, dashed: bool) -> SeriesStyle {
        SeriesStyle { color, marker, dashed }
    }

    /// Blue solid line with circles.
    pub const fn primary() -> SeriesStyle {
        SeriesStyle::new(BLUE, Marker::Circle, false)
    }

    /// Red dashed line with squares, used for the overlaid series.
    pub const fn secondary() -> SeriesStyle {
        SeriesStyle::new(RED, Marker::Square, true)
    }
}

/// One plotted line.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: Option<String>,
    pub points: Vec<(f64, f64)>,
    pub style: SeriesStyle,
}

impl Series {
    pub fn new(xs: &[f64], ys: &[f64], style: SeriesStyle) -> Series {
        Series {
            label: None,
            points: xs.iter().copied().zip(ys.iter().copied()).collect(),
            style,
        }
    }

    pub fn with_label(mut self, label: &str) -> Series {
        self.label = Some(label.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub spec: ChartSpec,
    pub series: Vec<Series>,
}

impl Chart {
    pub fn new(spec: ChartSpec, series: Vec<Series>) -> Chart {
        Chart { spec, series }
    }

    fn points(&self) -> impl Iterator<Item = &(f64, f64)> {
        self.series.iter().flat_map(|s| s.points.iter())
    }

    pub fn x_range(&self) -> Option<Range<f64>> {
        axis_range(self.points().map(|p| p.0))
    }

    pub fn y_range(&self) -> Option<Range<f64>> {
        axis_range(self.points().map(|p| p.1))
    }

    pub fn has_legend(&self) -> bool {
        self.series.iter().any(|s| s.label.is_some())
    }
}

/// Image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            width: 1200,
            height: 600,
        }
    }
}

/// Padded bounds of the finite values, or `None` if there are none.
pub fn axis_range<I: IntoIterator<Item = f64>>(values: I) -> Option<Range<f64>> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

    let pad = if max > min {
        (max - min) * 0.05
    } else {
        (min.abs() * 0.1).max(1.0)
    };
    Some((min - pad)..(max + pad))
}

/// Draws `chart` onto any plotters drawing area.
pub fn draw_chart<DB>(root: &DrawingArea<DB, Shift>, chart: &Chart) -> std::result::Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let x_range = chart.x_range().ok_or("chart has no finite x values")?;
    let y_range = chart.y_range().ok_or("chart has no finite y values")?;
    log::debug!("'{}': x {:?}, y {:?}", chart.spec.title, x_range, y_range);

    root.fill(&WHITE)?;

    let mut cc = ChartBuilder::on(root)
        .caption(&chart.spec.title, ("sans-serif", 30).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)?;

    cc.configure_mesh()
        .x_desc(chart.spec.x_label.as_str())
        .y_desc(chart.spec.y_label.as_str())
        .bold_line_style(BLACK.mix(0.2))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    for series in &chart.series {
        let color = series.style.color;
        let line = ShapeStyle::from(&color).stroke_width(2);

        let anno = if series.style.dashed {
            cc.draw_series(DashedLineSeries::new(series.points.clone(), 10, 6, line))?
        } else {
            cc.draw_series(LineSeries::new(series.points.clone(), line))?
        };
        if let Some(label) = &series.label {
            anno.label(label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        let fill = color.filled();
        match series.style.marker {
            Marker::Circle => {
                cc.draw_series(series.points.iter().map(|&p| Circle::new(p, 4, fill)))?;
            }
            Marker::Square => {
                cc.draw_series(
                    series
                        .points
                        .iter()
                        .map(|&p| EmptyElement::at(p) + Rectangle::new([(-4, -4), (4, 4)], fill)),
                )?;
            }
        }
    }

    if chart.has_legend() {
        cc.configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;
    }

    Ok(())
}

/// Renders into an in-memory RGB buffer, three bytes per pixel.
pub fn render_rgb(chart: &Chart, options: &RenderOptions) -> Result<Vec<u8>> {
    let size = (options.width, options.height);
    let mut buffer = vec![0u8; size.0 as usize * size.1 as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
        draw_chart(&root, chart).map_err(render_error)?;
        root.present().map_err(|e| PlotError::Render(e.to_string()))?;
    }
    Ok(buffer)
}

/// Renders to an image file; the format follows the extension (png).
pub fn render_png(chart: &Chart, path: &Path, options: &RenderOptions) -> Result<()> {
    let root = BitMapBackend::new(path, (options.width, options.height)).into_drawing_area();
    draw_chart(&root, chart).map_err(render_error)?;
    root.present().map_err(|e| PlotError::Render(e.to_string()))?;
    Ok(())
}

fn render_error(err: Box<dyn Error>) -> PlotError {
    PlotError::Render(err.to_string())
}
