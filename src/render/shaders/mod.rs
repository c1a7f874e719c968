use glium::program;
use glium::Program;
use lazy_static::lazy_static;
use send_wrapper::SendWrapper;

lazy_static! {
    /// Program for flat and atlas-masked quads in window pixels.
    pub static ref QUAD_PROGRAM: SendWrapper<Program> = SendWrapper::new(
        glium::program!(
            &**crate::gui::DISPLAY,
            140 => {
                vertex: include_str!("quad.vert"),
                fragment: include_str!("quad.frag"),
                outputs_srgb: true,
            },
        )
        .expect("Failed to compile shader")
    );
}
