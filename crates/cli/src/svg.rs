use gridcast::{
    LineSurface, MeshProjector, Scene, ScreenMode, StaticAnchor, StaticScene,
    SvgSurface,
};
use svg::Document;

const EXCLUSION_COLOR: &str = "#ff0000";

/// Draw the visible wireframe of a model, plus the outline of the exclusion
/// rect if the scene has one
pub fn draw_wireframe(
    projector: &mut MeshProjector<StaticAnchor>,
    scene: &StaticScene,
) -> Document {
    let (width, height) = screen_size(scene);
    let mut surface = SvgSurface::new(width, height);
    projector.draw_wireframe(scene, &mut surface);

    if let Some(rect) = scene.exclusion_rect() {
        surface.set_stroke(EXCLUSION_COLOR);
        let (left, top) = (rect.x, rect.y);
        let right = rect.x.saturating_add(rect.width);
        let bottom = rect.y.saturating_add(rect.height);
        surface.draw_line(left, top, right, top);
        surface.draw_line(right, top, right, bottom);
        surface.draw_line(right, bottom, left, bottom);
        surface.draw_line(left, bottom, left, top);
    }

    surface.into_document()
}

/// In fixed mode the game view has a known size. Otherwise, assume the
/// camera's origin is the center of the screen.
fn screen_size(scene: &StaticScene) -> (u32, u32) {
    match scene.screen_mode() {
        ScreenMode::Fixed => {
            let screen = &scene.config().screen;
            (screen.fixed_width as u32, screen.fixed_height as u32)
        }
        ScreenMode::Resizable => {
            let toolkit = scene.camera().toolkit;
            (
                (toolkit.origin_x * 2.0).max(1.0).ceil() as u32,
                (toolkit.origin_y * 2.0).max(1.0).ceil() as u32,
            )
        }
    }
}
