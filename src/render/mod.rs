use glium::index::{NoIndices, PrimitiveType};
use glium::{Frame, Surface, VertexBuffer};

mod batch;
mod font;
mod scene;
mod shaders;
mod textures;

pub use scene::build;

use crate::gui::layout::Layout;
use batch::Batch;

/// Clears the frame and draws a batch of quads over it.
pub fn draw(target: &mut Frame, batch: &Batch, layout: &mut Layout) {
    layout.set_target_dimensions(target.get_dimensions());
    let transform: [[f32; 4]; 4] = layout.gl_matrix().into();

    let [r, g, b] = scene::BACKGROUND;
    target.clear_color_srgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0);
    if batch.is_empty() {
        return;
    }

    let draw_params = glium::DrawParameters {
        blend: glium::Blend::alpha_blending(),
        ..glium::DrawParameters::default()
    };

    let vbo = VertexBuffer::new(&**crate::gui::DISPLAY, batch.vertices())
        .expect("Failed to create vertex buffer");
    target
        .draw(
            &vbo,
            &NoIndices(PrimitiveType::TrianglesList),
            &shaders::QUAD_PROGRAM,
            &glium::uniform! {
                transform: transform,
                atlas: **textures::ATLAS_SAMPLER,
            },
            &draw_params,
        )
        .expect("Failed to draw quads");
}
