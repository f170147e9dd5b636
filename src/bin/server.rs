use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;

use tracegen::config::Params;
use tracegen::render;

#[derive(Deserialize)]
struct GenerateRequest {
    seed: Option<u64>,
    width: Option<usize>,
    height: Option<usize>,
    // Wire growth
    max_wire_len: Option<usize>,
    min_wire_len: Option<usize>,
    straightness: Option<f32>,
    wrap_x: Option<bool>,
    wrap_y: Option<bool>,
    // Rasterization
    cell_size: Option<usize>,
    trace_width: Option<f32>,
    pad_radius: Option<f32>,
}

#[derive(Serialize)]
struct GenerateResponse {
    layers: Vec<Layer>,
    timings: Vec<TimingEntry>,
    width: usize,
    height: usize,
}

#[derive(Serialize)]
struct Layer {
    name: String,
    data_url: String,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

fn encode_png(rgba: &[u8], w: usize, h: usize) -> String {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder
        .write_image(rgba, w as u32, h as u32, image::ExtendedColorType::Rgba8)
        .expect("PNG encode failed");
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    format!("data:image/png;base64,{}", b64)
}

async fn generate_handler(
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, (StatusCode, String)> {
    let seed = req.seed.unwrap_or(42);
    let width = req.width.unwrap_or(48);
    let height = req.height.unwrap_or(32);

    let defaults = Params::default();
    let params = Params {
        max_wire_len: req.max_wire_len.unwrap_or(defaults.max_wire_len),
        min_wire_len: req.min_wire_len.unwrap_or(defaults.min_wire_len),
        straightness: req.straightness.unwrap_or(defaults.straightness),
        wrap_x: req.wrap_x.unwrap_or(defaults.wrap_x),
        wrap_y: req.wrap_y.unwrap_or(defaults.wrap_y),
        cell_size: req.cell_size.unwrap_or(defaults.cell_size),
        trace_width: req.trace_width.unwrap_or(defaults.trace_width),
        pad_radius: req.pad_radius.unwrap_or(defaults.pad_radius),
    };

    if let Err(e) = params.validate(width, height) {
        return Err((StatusCode::UNPROCESSABLE_ENTITY, e.to_string()));
    }

    let response = tokio::task::spawn_blocking(move || {
        let (pattern, timings) = tracegen::generate(seed, width, height, &params);

        let pw = width * params.cell_size;
        let ph = height * params.cell_size;

        let layers = vec![
            Layer {
                name: "circuit".into(),
                data_url: encode_png(&pattern.rgba, pw, ph),
            },
            Layer {
                name: "mask".into(),
                data_url: encode_png(
                    &render::colorize(&pattern.mask, &render::MASK),
                    pw,
                    ph,
                ),
            },
            Layer {
                name: "owners".into(),
                data_url: encode_png(&render::render_owners(&pattern.owner), width, height),
            },
        ];

        let timing_entries = timings
            .iter()
            .map(|t| TimingEntry {
                name: t.name.to_string(),
                ms: t.ms,
            })
            .collect();

        GenerateResponse {
            layers,
            timings: timing_entries,
            width,
            height,
        }
    })
    .await
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(response))
}

#[tokio::main]
async fn main() {
    let frontend = ServeDir::new("frontend");

    let app = Router::new()
        .route("/api/generate", post(generate_handler))
        .fallback_service(frontend);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    eprintln!("tracegen server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.expect("bind failed");
    axum::serve(listener, app).await.expect("server error");
}
