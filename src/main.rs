//! rasterlab viewer
//!
//! Renders the scene with the software rasterizer every frame and blits the
//! framebuffer to the window with an integer zoom.
//!
//! Controls:
//! - Arrows: rotate
//! - `+` / `-`: camera distance
//! - `[` / `]`: cylinder slices
//! - `W` wireframe, `C` culling, `A` auto-rotate
//! - `O` open texture, `P` save frame as PNG
//! - Mouse wheel: zoom

use macroquad::prelude::*;
use rasterlab::config::SceneConfig;
use rasterlab::rasterizer::Framebuffer;
use rasterlab::scene::Scene;
use rasterlab::VERSION;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Degrees per frame while an arrow key is held
const ROTATE_SPEED: f32 = 2.0;

/// Seconds between auto-rotate steps
const AUTO_ROTATE_INTERVAL: f64 = 0.03;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("rasterlab v{}", VERSION),
        window_width: rasterlab::rasterizer::CANVAS_W as i32,
        window_height: rasterlab::rasterizer::CANVAS_H as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Short-lived message at the bottom of the window
struct Status {
    text: String,
    until: f64,
}

impl Status {
    fn new() -> Self {
        Self { text: String::new(), until: 0.0 }
    }

    fn set(&mut self, text: &str, seconds: f64) {
        self.text = text.to_string();
        self.until = get_time() + seconds;
    }

    fn current(&self) -> Option<&str> {
        (get_time() < self.until).then_some(self.text.as_str())
    }
}

fn handle_input(scene: &mut Scene, fb: &Framebuffer, status: &mut Status) {
    let mut d_x = 0.0;
    let mut d_y = 0.0;
    if is_key_down(KeyCode::Left) {
        d_y -= ROTATE_SPEED;
    }
    if is_key_down(KeyCode::Right) {
        d_y += ROTATE_SPEED;
    }
    if is_key_down(KeyCode::Up) {
        d_x -= ROTATE_SPEED;
    }
    if is_key_down(KeyCode::Down) {
        d_x += ROTATE_SPEED;
    }
    if d_x != 0.0 || d_y != 0.0 {
        scene.rotate_by(d_x, d_y);
    }

    if is_key_pressed(KeyCode::Equal) || is_key_pressed(KeyCode::KpAdd) {
        scene.set_distance(scene.params.distance - 1.0);
    }
    if is_key_pressed(KeyCode::Minus) || is_key_pressed(KeyCode::KpSubtract) {
        scene.set_distance(scene.params.distance + 1.0);
    }

    if is_key_pressed(KeyCode::LeftBracket) {
        scene.set_slices(scene.slices().saturating_sub(1));
    }
    if is_key_pressed(KeyCode::RightBracket) {
        scene.set_slices(scene.slices() + 1);
    }

    if is_key_pressed(KeyCode::W) {
        scene.toggle_wireframe();
    }
    if is_key_pressed(KeyCode::C) {
        scene.toggle_culling();
    }
    if is_key_pressed(KeyCode::A) {
        scene.toggle_auto_rotate();
    }

    let scroll = mouse_wheel().1;
    if scroll > 0.0 {
        scene.set_zoom(scene.zoom() + 1);
    } else if scroll < 0.0 {
        scene.set_zoom(scene.zoom().saturating_sub(1));
    }

    #[cfg(not(target_arch = "wasm32"))]
    if is_key_pressed(KeyCode::O) {
        let dialog = rfd::FileDialog::new().add_filter("Image", &["png", "jpg", "jpeg", "bmp"]);
        if let Some(path) = dialog.pick_file() {
            if scene.load_texture(&path) {
                status.set(&format!("Loaded {}", path.display()), 3.0);
            } else {
                status.set(&format!("Could not load {}", path.display()), 5.0);
            }
        }
    }

    if is_key_pressed(KeyCode::P) {
        match fb.save_png("frame.png") {
            Ok(()) => {
                info!("Saved frame.png");
                status.set("Saved frame.png", 3.0);
            }
            Err(e) => {
                warn!("{}", e);
                status.set(&format!("Save failed: {}", e), 5.0);
            }
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => SceneConfig::load(&path).unwrap_or_else(|e| {
            warn!("{}, using defaults", e);
            SceneConfig::default()
        }),
        None => SceneConfig::default(),
    };

    let mut scene = Scene::new(&config);
    let mut fb = Framebuffer::new(config.canvas_width.max(1), config.canvas_height.max(1));
    let mut status = Status::new();
    let mut last_step = get_time();

    info!("=== rasterlab v{} ===", VERSION);

    loop {
        handle_input(&mut scene, &fb, &mut status);

        let now = get_time();
        if now - last_step >= AUTO_ROTATE_INTERVAL {
            scene.step_auto_rotate();
            last_step = now;
        }

        let stats = scene.render(&mut fb);

        clear_background(Color::from_rgba(30, 30, 35, 255));

        // Convert framebuffer to texture and draw it centered at the zoom level
        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.to_rgba_bytes());
        texture.set_filter(FilterMode::Nearest);

        let zoom = scene.zoom() as f32;
        let draw_w = fb.width as f32 * zoom;
        let draw_h = fb.height as f32 * zoom;
        draw_texture_ex(
            &texture,
            (screen_width() - draw_w) / 2.0,
            (screen_height() - draw_h) / 2.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(draw_w, draw_h)),
                ..Default::default()
            },
        );

        let info_line = format!(
            "Rot: ({:.0}, {:.0}) | Dist: {:.0} | Slices: {} | Zoom: {}x | Drawn: {} Culled: {}{}{}",
            scene.params.rot_x,
            scene.params.rot_y,
            scene.params.distance,
            scene.slices(),
            scene.zoom(),
            stats.drawn,
            stats.culled,
            if scene.settings.wireframe { " | Wire" } else { "" },
            if scene.settings.backface_cull { "" } else { " | No cull" },
        );
        draw_text(&info_line, 8.0, 20.0, 18.0, Color::from_rgba(200, 200, 200, 255));

        if let Some(msg) = status.current() {
            draw_text(msg, 8.0, screen_height() - 10.0, 18.0, Color::from_rgba(230, 200, 120, 255));
        }

        next_frame().await;
    }
}
