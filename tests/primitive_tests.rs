//! 2D primitives driven through the public API

use rasterlab::rasterizer::{liang_barsky_clip, ClipRect, Color, FillStyle, Framebuffer, Texture};

#[test]
fn square_fill_covers_exactly_ten_by_ten() {
    let mut fb = Framebuffer::new(20, 20);
    fb.fill_polygon(&[(0, 0), (10, 0), (10, 10), (0, 10)], FillStyle::Solid(Color::BLUE));

    assert_eq!(fb.count_not(Color::WHITE), 100);
    for y in 0..10 {
        for x in 0..10 {
            assert_eq!(fb.get_pixel(x, y), Some(Color::BLUE), "({}, {})", x, y);
        }
    }
    assert_eq!(fb.get_pixel(10, 5), Some(Color::WHITE));
    assert_eq!(fb.get_pixel(5, 10), Some(Color::WHITE));
}

#[test]
fn clip_through_rectangle() {
    let rect = ClipRect::new(0.0, 0.0, 10.0, 10.0);
    let (a, b) = liang_barsky_clip(&rect, (-5.0, 5.0), (15.0, 5.0)).expect("segment crosses rect");
    assert_eq!(a, (0.0, 5.0));
    assert_eq!(b, (10.0, 5.0));

    assert!(liang_barsky_clip(&rect, (-5.0, -5.0), (-1.0, 20.0)).is_none());
    assert!(liang_barsky_clip(&rect, (11.0, 0.0), (20.0, 10.0)).is_none());
}

#[test]
fn clipped_line_stays_inside_regions() {
    let mut fb = Framebuffer::new(40, 40);
    let clips = [
        ClipRect::new(0.0, 0.0, 9.0, 39.0),
        ClipRect::new(30.0, 0.0, 39.0, 39.0),
    ];
    fb.draw_line_clipped(&clips, 0, 20, 39, 20, Color::RED);

    assert_eq!(fb.get_pixel(5, 20), Some(Color::RED));
    assert_eq!(fb.get_pixel(35, 20), Some(Color::RED));
    assert_eq!(fb.get_pixel(20, 20), Some(Color::WHITE));
}

#[test]
fn pattern_fill_tiles_texture() {
    let tex = Texture::checkerboard(8, 8, Color::BLACK, Color::WHITE);
    let mut fb = Framebuffer::new(32, 32);
    fb.clear(Color::GREEN);
    fb.fill_polygon(&[(0, 0), (32, 0), (32, 32), (0, 32)], FillStyle::Pattern(&tex));

    assert_eq!(fb.count_not(Color::GREEN), 32 * 32);
    // Texture repeats every 8 pixels
    for (x, y) in [(1, 1), (3, 6), (7, 2)] {
        assert_eq!(fb.get_pixel(x, y), fb.get_pixel(x + 8, y + 16));
    }
}

#[test]
fn frame_saves_as_png() {
    let mut fb = Framebuffer::new(24, 16);
    fb.draw_circle_wu(12, 8, 6, Color::BLACK);
    fb.draw_line_dda(0, 0, 23, 15, Color::RED);

    let path = std::env::temp_dir().join(format!("rasterlab-frame-{}.png", std::process::id()));
    fb.save_png(&path).unwrap();
    let img = image::open(&path).unwrap().to_rgb8();
    let _ = std::fs::remove_file(&path);

    assert_eq!(img.dimensions(), (24, 16));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0]);
    assert_eq!(img.get_pixel(23, 0).0, [255, 255, 255]);
}
