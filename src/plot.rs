//! Risk scatter plot rendering
//!
//! Draws the (likelihood, consequence) point on a 0-100 x 0-100 grid with
//! crosshair lines at the midpoints, then encodes the bitmap as a PNG data
//! URI for inline embedding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use plotters::prelude::*;
use thiserror::Error;

use crate::risk::RiskScore;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 640;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("plot rendering failed: {0}")]
    Render(String),

    #[error("png encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

fn render(score: RiskScore, buffer: &mut [u8]) -> Result<(), String> {
    let root = BitMapBackend::with_buffer(buffer, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&RGBColor(0xf4, 0xf4, 0xf4))
        .map_err(|e| e.to_string())?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Risk Assessment", ("sans-serif", 28))
        .margin(24)
        .x_label_area_size(48)
        .y_label_area_size(48)
        .build_cartesian_2d(0f64..100f64, 0f64..100f64)
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .x_desc("Likelihood (0 = Low, 100 = High)")
        .y_desc("Consequence (0 = Low, 100 = High)")
        .draw()
        .map_err(|e| e.to_string())?;

    // Quadrant crosshair at the midpoint of each axis
    chart
        .draw_series(LineSeries::new(vec![(50.0, 0.0), (50.0, 100.0)], &BLACK))
        .map_err(|e| e.to_string())?;
    chart
        .draw_series(LineSeries::new(vec![(0.0, 50.0), (100.0, 50.0)], &BLACK))
        .map_err(|e| e.to_string())?;

    chart
        .draw_series(std::iter::once(Circle::new(
            (score.likelihood, score.consequence),
            6,
            RED.filled(),
        )))
        .map_err(|e| e.to_string())?;

    chart
        .draw_series(std::iter::once(Text::new(
            format!("({:.2}, {:.2})", score.likelihood, score.consequence),
            (score.likelihood + 2.0, score.consequence + 2.0),
            ("sans-serif", 16).into_font().color(&BLUE),
        )))
        .map_err(|e| e.to_string())?;

    root.present().map_err(|e| e.to_string())
}

/// Render the risk scatter as an inline `data:image/png;base64,...` URI
pub fn risk_scatter(score: RiskScore) -> Result<String, PlotError> {
    let mut buffer = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
    render(score, &mut buffer).map_err(PlotError::Render)?;

    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(&buffer, WIDTH, HEIGHT, ExtendedColorType::Rgb8)?;

    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scatter_produces_png_data_uri() {
        let uri = risk_scatter(RiskScore {
            likelihood: 13.0,
            consequence: 90.0,
        })
        .unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        // PNG magic bytes survive the base64 round trip
        let payload = STANDARD
            .decode(uri.trim_start_matches("data:image/png;base64,"))
            .unwrap();
        assert_eq!(&payload[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn boundary_points_render() {
        for (x, y) in [(0.0, 0.0), (100.0, 100.0), (50.0, 50.0)] {
            risk_scatter(RiskScore {
                likelihood: x,
                consequence: y,
            })
            .unwrap();
        }
    }
}
