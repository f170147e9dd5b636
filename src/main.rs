use std::path::PathBuf;
use tracegen::config::Params;
use tracegen::render;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let seed: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    let width: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(48);
    let height: usize = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(32);
    let out_dir: PathBuf = args
        .get(4)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));

    let mut params = Params::default();
    if let Some(v) = args.get(5).and_then(|s| s.parse().ok()) {
        params.max_wire_len = v;
    }
    if let Some(v) = args.get(6).and_then(|s| s.parse().ok()) {
        params.straightness = v;
    }
    if let Some(wrap) = args.get(7) {
        params.wrap_x = wrap.contains('x');
        params.wrap_y = wrap.contains('y');
    }

    if let Err(e) = params.validate(width, height) {
        eprintln!("invalid configuration: {}", e);
        std::process::exit(1);
    }

    std::fs::create_dir_all(&out_dir).expect("failed to create output directory");

    eprintln!(
        "Generating {}x{} pattern with seed={}, max_len={}, straightness={}",
        width, height, seed, params.max_wire_len, params.straightness
    );

    let (pattern, timings) = tracegen::generate(seed, width, height, &params);

    // Print timings
    eprintln!("\nTimings:");
    for t in &timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    // Save output PNGs
    let save = |name: &str, rgba: &[u8], w: usize, h: usize| {
        let path = out_dir.join(name);
        image::save_buffer(&path, rgba, w as u32, h as u32, image::ColorType::Rgba8)
            .expect("failed to save image");
        eprintln!("Saved {}", path.display());
    };

    let pw = width * params.cell_size;
    let ph = height * params.cell_size;

    // 1. Final board render
    save("circuit.png", &pattern.rgba, pw, ph);

    // 2. White-on-black mask
    let mask_rgba = render::colorize(&pattern.mask, &render::MASK);
    save("mask.png", &mask_rgba, pw, ph);

    // 3. Wire ownership map (one pixel per cell)
    let owners_rgba = render::render_owners(&pattern.owner);
    save("owners.png", &owners_rgba, width, height);

    eprintln!("\nDone.");
}
