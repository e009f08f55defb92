//! Density preview export to PNG (plotters bitmap) and EPS (minimal PostScript, no deps).

use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::controller::DrawRequest;

/// Escape a string for PostScript ( and ) and \.
fn ps_escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// Generate "nice" tick values in [min, max] with roughly max_ticks steps.
fn nice_ticks(min: f64, max: f64, max_ticks: usize) -> Vec<f64> {
    let range = if max > min { max - min } else { 1.0 };
    if max_ticks == 0 {
        return vec![min];
    }
    let raw_step = range / max_ticks as f64;
    let mag = 10.0_f64.powf(raw_step.log10().floor());
    let norm = raw_step / mag;
    let step = if norm <= 1.0 {
        mag
    } else if norm <= 2.0 {
        2.0 * mag
    } else if norm <= 5.0 {
        5.0 * mag
    } else {
        10.0 * mag
    };
    let step = step.max(f64::EPSILON);
    let mut ticks = Vec::new();
    let mut v = (min / step).floor() * step;
    while v <= max + step * 0.001 {
        if v >= min - step * 0.001 {
            ticks.push(v);
        }
        v += step;
        if ticks.len() > max_ticks + 2 {
            break;
        }
    }
    if ticks.is_empty() {
        ticks.push(min);
    }
    ticks
}

/// Compact tick label: integer when whole, else 1–2 decimals, scientific when tiny or huge.
fn format_tick(v: f64) -> String {
    if v.abs() < 1e-12 {
        return "0".to_string();
    }
    let abs = v.abs();
    if abs >= 1000.0 || abs < 0.01 {
        format!("{:e}", v)
    } else if (v - v.round()).abs() < 1e-10 {
        format!("{:.0}", v)
    } else if abs >= 1.0 {
        format!("{:.1}", v)
    } else {
        format!("{:.2}", v)
    }
}

/// Export format for the density preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartExportFormat {
    Png,
    Eps,
}

impl ChartExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Eps => "eps",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Eps => "EPS",
        }
    }
}

/// Pixel size of PNG exports. EPS uses a fixed 400x300 pt page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ExportSize {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// File name for an export of `request`, e.g. `distui-Normal.png`.
pub fn export_file_name(request: &DrawRequest, format: ChartExportFormat) -> String {
    // "x ~ Normal(0.00,1.00)" -> "Normal"
    let name = request
        .title
        .trim_start_matches("x ~ ")
        .split('(')
        .next()
        .unwrap_or_default();
    let name = if name.is_empty() { "density" } else { name };
    format!("distui-{}.{}", name, format.extension())
}

/// Write the preview in `format` into `dir`; returns the written path.
pub fn export_chart(
    dir: &Path,
    request: &DrawRequest,
    format: ChartExportFormat,
    size: ExportSize,
) -> Result<PathBuf> {
    let path = dir.join(export_file_name(request, format));
    match format {
        ChartExportFormat::Png => write_chart_png(&path, request, size)?,
        ChartExportFormat::Eps => write_chart_eps(&path, request)?,
    }
    tracing::info!(path = %path.display(), format = format.as_str(), "chart exported");
    Ok(path)
}

/// Write the density curve to EPS (Encapsulated PostScript).
pub fn write_chart_eps(path: &Path, request: &DrawRequest) -> Result<()> {
    if request.points.is_empty() {
        return Err(eyre!("No data to export"));
    }

    const W: f64 = 400.0;
    const H: f64 = 300.0;
    const MARGIN_LEFT: f64 = 50.0;
    const MARGIN_BOTTOM: f64 = 40.0;
    const PLOT_W: f64 = W - MARGIN_LEFT - 40.0;
    const PLOT_H: f64 = H - MARGIN_BOTTOM - 30.0;

    let (x_min, x_max) = request.x_range;
    let (y_min, y_max) = request.y_range();
    let x_range = if x_max > x_min { x_max - x_min } else { 1.0 };
    let y_range = if y_max > y_min { y_max - y_min } else { 1.0 };

    let to_x = |x: f64| MARGIN_LEFT + (x - x_min) / x_range * PLOT_W;
    // Points above a fixed Y limit are drawn at the top edge
    let to_y = |y: f64| MARGIN_BOTTOM + (y.min(y_max) - y_min) / y_range * PLOT_H;

    let mut f = File::create(path)?;

    writeln!(f, "%!PS-Adobe-3.0 EPSF-3.0")?;
    writeln!(
        f,
        "%%BoundingBox: 0 0 {} {}",
        W.ceil() as i32,
        H.ceil() as i32
    )?;
    writeln!(f, "%%Creator: distui")?;
    writeln!(f, "%%Title: ({})", ps_escape(&request.title))?;
    writeln!(f, "%%EndComments")?;
    writeln!(f, "gsave")?;
    writeln!(f, "1 setlinewidth")?;

    const MAX_TICKS: usize = 8;
    let x_ticks = nice_ticks(x_min, x_max, MAX_TICKS);
    let y_ticks = nice_ticks(y_min, y_max, MAX_TICKS);
    let in_x = |px: f64| (MARGIN_LEFT..=MARGIN_LEFT + PLOT_W).contains(&px);
    let in_y = |py: f64| (MARGIN_BOTTOM..=MARGIN_BOTTOM + PLOT_H).contains(&py);

    // Grid
    writeln!(f, "0.9 setgray")?;
    writeln!(f, "0.5 setlinewidth")?;
    for px in x_ticks.iter().map(|&v| to_x(v)).filter(|&px| in_x(px)) {
        writeln!(
            f,
            "{} {} moveto 0 {} rlineto stroke",
            px, MARGIN_BOTTOM, PLOT_H
        )?;
    }
    for py in y_ticks.iter().map(|&v| to_y(v)).filter(|&py| in_y(py)) {
        writeln!(
            f,
            "{} {} moveto {} 0 rlineto stroke",
            MARGIN_LEFT, py, PLOT_W
        )?;
    }
    writeln!(f, "1 setlinewidth")?;
    writeln!(f, "0 setgray")?;

    // Axis box
    writeln!(f, "{} {} moveto", MARGIN_LEFT, MARGIN_BOTTOM)?;
    writeln!(f, "{} 0 rlineto", PLOT_W)?;
    writeln!(f, "0 {} rlineto", PLOT_H)?;
    writeln!(f, "{} 0 rlineto", -PLOT_W)?;
    writeln!(f, "closepath stroke")?;

    const TICK_LEN: f64 = 4.0;
    for px in x_ticks.iter().map(|&v| to_x(v)).filter(|&px| in_x(px)) {
        writeln!(
            f,
            "{} {} moveto 0 {} rlineto stroke",
            px, MARGIN_BOTTOM, -TICK_LEN
        )?;
    }
    for py in y_ticks.iter().map(|&v| to_y(v)).filter(|&py| in_y(py)) {
        writeln!(
            f,
            "{} {} moveto {} 0 rlineto stroke",
            MARGIN_LEFT, py, -TICK_LEN
        )?;
    }

    writeln!(f, "/Helvetica findfont 9 scalefont setfont")?;
    let char_w: f64 = 5.0;
    for &v in &x_ticks {
        let px = to_x(v);
        if in_x(px) {
            let s = format_tick(v);
            let label_w = s.len() as f64 * char_w;
            let tx = (px - label_w / 2.0)
                .max(MARGIN_LEFT)
                .min(MARGIN_LEFT + PLOT_W - label_w);
            writeln!(
                f,
                "{} {} moveto ({}) show",
                tx,
                MARGIN_BOTTOM - 12.0,
                ps_escape(&s)
            )?;
        }
    }
    for &v in &y_ticks {
        let py = to_y(v);
        if in_y(py) {
            let s = format_tick(v);
            let label_w = s.len() as f64 * char_w;
            let tx = (MARGIN_LEFT - label_w - 4.0).max(2.0);
            writeln!(f, "{} {} moveto ({}) show", tx, py - 3.0, ps_escape(&s))?;
        }
    }

    // Title above the plot, axis titles below and left of it
    writeln!(f, "/Helvetica findfont 10 scalefont setfont")?;
    let title_w = request.title.chars().count() as f64 * char_w;
    writeln!(
        f,
        "{} {} moveto ({}) show",
        (MARGIN_LEFT + PLOT_W / 2.0 - title_w / 2.0).max(MARGIN_LEFT),
        MARGIN_BOTTOM + PLOT_H + 12.0,
        ps_escape(&request.title)
    )?;
    let x_label_w = request.x_label.len() as f64 * char_w;
    writeln!(
        f,
        "{} {} moveto ({}) show",
        (MARGIN_LEFT + PLOT_W / 2.0 - x_label_w / 2.0).max(MARGIN_LEFT),
        MARGIN_BOTTOM - 24.0,
        ps_escape(request.x_label)
    )?;
    writeln!(f, "gsave")?;
    writeln!(
        f,
        "12 {} translate 90 rotate",
        MARGIN_BOTTOM + PLOT_H / 2.0
    )?;
    let y_label_w = request.y_label.len() as f64 * char_w;
    writeln!(
        f,
        "{} 0 moveto ({}) show",
        -y_label_w / 2.0,
        ps_escape(request.y_label)
    )?;
    writeln!(f, "grestore")?;

    // Curve, clipped to the plot area
    writeln!(f, "gsave")?;
    writeln!(
        f,
        "{} {} {} {} rectclip",
        MARGIN_LEFT, MARGIN_BOTTOM, PLOT_W, PLOT_H
    )?;
    writeln!(f, "0.0 0.7 0.9 setrgbcolor")?;
    let (px, py) = request.points[0];
    writeln!(f, "{} {} moveto", to_x(px), to_y(py))?;
    for &(px, py) in &request.points[1..] {
        writeln!(f, "{} {} lineto", to_x(px), to_y(py))?;
    }
    writeln!(f, "stroke")?;
    writeln!(f, "grestore")?;

    writeln!(f, "grestore")?;
    writeln!(f, "%%EOF")?;
    f.sync_all()?;
    Ok(())
}

/// Write the density curve to PNG using the plotters bitmap backend.
pub fn write_chart_png(path: &Path, request: &DrawRequest, size: ExportSize) -> Result<()> {
    use plotters::prelude::*;

    if request.points.is_empty() {
        return Err(eyre!("No data to export"));
    }

    let root = BitMapBackend::new(path, (size.width, size.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_min, x_max) = request.x_range;
    let (y_min, y_max) = request.y_range();

    let mut chart = ChartBuilder::on(&root)
        .caption(request.title.as_str(), ("sans-serif", 20))
        .margin(30)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(request.x_label)
        .y_desc(request.y_label)
        .draw()?;

    chart.draw_series(LineSeries::new(
        request.points.iter().map(|&(x, y)| (x, y.min(y_max))),
        CYAN.stroke_width(2),
    ))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn request() -> DrawRequest {
        DrawRequest {
            points: vec![(0.0, 1.0), (1.0, 2.0), (2.0, 1.5)],
            x_range: (0.0, 2.0),
            y_max: Some(2.5),
            title: "x ~ Normal(0.00,1.00)".to_string(),
            x_label: "x",
            y_label: "density",
        }
    }

    /// EPS output carries the header, grid, axis box, ticks, labels, title and curve.
    #[test]
    fn eps_contains_desired_elements() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("chart.eps");
        write_chart_eps(&path, &request()).expect("write_chart_eps");

        let mut content = String::new();
        std::fs::File::open(&path)
            .expect("open")
            .read_to_string(&mut content)
            .expect("read");

        assert!(content.contains("%!PS-Adobe-3.0 EPSF-3.0"), "EPS header");
        assert!(content.contains("%%BoundingBox:"), "BoundingBox");
        assert!(content.contains("%%Creator: distui"), "Creator");
        assert!(content.contains("0.9 setgray"), "grid color");
        assert!(content.matches("rlineto stroke").count() > 2, "grid/axis lines");
        assert!(content.contains("closepath stroke"), "axis box");
        assert!(content.contains("(x) show"), "x axis title");
        assert!(content.contains("(density) show"), "y axis title");
        assert!(
            content.contains("(x ~ Normal\\(0.00,1.00\\)) show"),
            "escaped title"
        );
        assert!(content.contains("rectclip"), "clipped curve");
        assert!(content.contains("lineto"), "curve");
        assert!(content.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn eps_rejects_empty_curve() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut empty = request();
        empty.points.clear();
        assert!(write_chart_eps(&dir.path().join("empty.eps"), &empty).is_err());
        assert!(
            write_chart_png(&dir.path().join("empty.png"), &empty, ExportSize::default()).is_err()
        );
        assert!(!dir.path().join("empty.png").exists());
    }

    #[test]
    fn export_names_file_after_distribution() {
        let request = request();
        assert_eq!(
            export_file_name(&request, ChartExportFormat::Png),
            "distui-Normal.png"
        );
        assert_eq!(
            export_file_name(&request, ChartExportFormat::Eps),
            "distui-Normal.eps"
        );
    }

    #[test]
    fn nice_ticks_cover_range() {
        let ticks = nice_ticks(0.0, 10.0, 8);
        assert_eq!(ticks.first().copied(), Some(0.0));
        assert!(ticks.last().copied().unwrap_or_default() >= 9.99);
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(2.0), "2");
        assert_eq!(format_tick(0.25), "0.25");
    }
}
