//! Bar chart rendering: one bar per (country, value) pair, encoded as PNG bytes.
//!
//! - Bars keep the order they are given in; labels sit under each bar
//! - Fixed title and Y-axis description from [`ChartSpec`]
//! - Office palette colors, one per bar
//! - Text through `ab_glyph` with a bundled DejaVu Sans, so no system fonts are needed

use crate::error::{Error, Result};
use crate::models::CountryDataset;
use crate::config::{DEFAULT_CATEGORY, DEFAULT_CHART_PX};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters_bitmap::BitMapBackend;
use std::sync::Once;

/// Pixels per inch used to turn the chart size into pixels.
pub const DPI: u32 = 96;

/// X units per bar; a bar spans `[i*SLOT, (i+1)*SLOT)` and is labelled at its center.
const SLOT: i32 = 10;

/// Microsoft Office chart series palette (first six).
const OFFICE6: [RGBColor; 6] = [
    RGBColor(68, 114, 196), // blue
    RGBColor(237, 125, 49), // orange
    RGBColor(165, 165, 165),
    RGBColor(255, 192, 0),
    RGBColor(91, 155, 213),
    RGBColor(112, 173, 71),
];

static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../assets/DejaVuSans.ttf"),
        );
    });
}

/// One bar: category-axis label and height.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// Fixed presentation of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub y_label: String,
    pub width_px: u32,
    pub height_px: u32,
}

impl ChartSpec {
    /// 4x4 inch chart titled after `category`.
    pub fn for_category(category: &str) -> Self {
        Self {
            title: category.to_string(),
            y_label: "Latest Value".to_string(),
            width_px: DEFAULT_CHART_PX,
            height_px: DEFAULT_CHART_PX,
        }
    }
}

impl Default for ChartSpec {
    fn default() -> Self {
        Self::for_category(DEFAULT_CATEGORY)
    }
}

/// Matching records of every dataset, in dataset order then record order.
/// Each bar is labelled with its dataset's country identifier.
pub fn bars_for(category: &str, datasets: &[&CountryDataset]) -> Vec<Bar> {
    datasets
        .iter()
        .flat_map(|ds| {
            ds.matching(category).map(move |r| Bar {
                label: ds.country.clone(),
                value: r.latest_value,
            })
        })
        .collect()
}

fn render_err<E: std::fmt::Debug>(e: E) -> Error {
    Error::Render(format!("{e:?}"))
}

/// Render `bars` as a PNG image.
///
/// ### Errors
/// - `Error::NoBars` when `bars` is empty (checked before any drawing)
/// - `Error::Render` for a non-finite value, a zero-sized image, or a plotters failure
/// - `Error::Encode` if PNG encoding fails
pub fn render_png(bars: &[Bar], spec: &ChartSpec) -> Result<Vec<u8>> {
    if bars.is_empty() {
        return Err(Error::NoBars(spec.title.clone()));
    }
    if let Some(bad) = bars.iter().find(|b| !b.value.is_finite()) {
        return Err(Error::Render(format!(
            "value for {} is not finite: {}",
            bad.label, bad.value
        )));
    }
    let (w, h) = (spec.width_px, spec.height_px);
    if w == 0 || h == 0 {
        return Err(Error::Render(format!("invalid chart size {w}x{h}")));
    }
    ensure_fonts_registered();

    let mut rgb = vec![0u8; w as usize * h as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut rgb, (w, h)).into_drawing_area();
        draw_bars(&root, bars, spec)?;
        root.present().map_err(render_err)?;
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(&rgb, w, h, ColorType::Rgb8)?;
    Ok(png)
}

/// Y range covering zero and every value, with some headroom.
fn value_range(bars: &[Bar]) -> (f64, f64) {
    let lo = bars.iter().map(|b| b.value).fold(0.0f64, f64::min);
    let hi = bars.iter().map(|b| b.value).fold(0.0f64, f64::max);
    let span = hi - lo;
    if span < f64::EPSILON {
        return (-1.0, 1.0);
    }
    let pad = span * 0.08;
    (
        if lo < 0.0 { lo - pad } else { 0.0 },
        if hi > 0.0 { hi + pad } else { 0.0 },
    )
}

fn draw_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    bars: &[Bar],
    spec: &ChartSpec,
) -> Result<()> {
    root.fill(&WHITE).map_err(render_err)?;

    let n = bars.len() as i32;
    let centers: Vec<i32> = (0..n).map(|i| i * SLOT + SLOT / 2).collect();
    let (y_min, y_max) = value_range(bars);

    let mut chart = ChartBuilder::on(root)
        .margin(12)
        .caption(spec.title.as_str(), (FontFamily::SansSerif, 18))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 32)
        .build_cartesian_2d((0..n * SLOT).with_key_points(centers), y_min..y_max)
        .map_err(render_err)?;

    let x_label_fmt = |x: &i32| {
        bars.get((*x / SLOT).max(0) as usize)
            .map(|b| b.label.clone())
            .unwrap_or_default()
    };
    let y_label_fmt = |v: &f64| {
        let prec = if v.abs() >= 100.0 { 0 } else { 1 };
        format!("{:.*}", prec, *v)
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .y_desc(spec.y_label.as_str())
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 14))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(bars.iter().enumerate().map(|(i, bar)| {
            let x0 = i as i32 * SLOT;
            let color = OFFICE6[i % OFFICE6.len()];
            let mut rect = Rectangle::new([(x0, 0.0), (x0 + SLOT, bar.value)], color.filled());
            rect.set_margin(0, 0, 10, 10);
            rect
        }))
        .map_err(render_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(label: &str, value: f64) -> Bar {
        Bar {
            label: label.into(),
            value,
        }
    }

    #[test]
    fn range_includes_zero() {
        let (lo, hi) = value_range(&[bar("a", 2.0), bar("b", 3.0)]);
        assert_eq!(lo, 0.0);
        assert!(hi > 3.0);

        let (lo, hi) = value_range(&[bar("a", -2.0)]);
        assert!(lo < -2.0);
        assert_eq!(hi, 0.0);
    }

    #[test]
    fn flat_zero_range_is_widened() {
        assert_eq!(value_range(&[bar("a", 0.0)]), (-1.0, 1.0));
    }

    #[test]
    fn default_spec_is_four_inches() {
        let spec = ChartSpec::default();
        assert_eq!((spec.width_px, spec.height_px), (384, 384));
        assert_eq!(spec.title, "Full Year GDP Growth");
        assert_eq!(spec.y_label, "Latest Value");
    }

    #[test]
    fn non_finite_value_is_rejected() {
        let e = render_png(&[bar("a", f64::NAN)], &ChartSpec::default()).unwrap_err();
        assert!(matches!(e, Error::Render(_)));
    }
}
