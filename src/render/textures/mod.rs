use glium::texture::{MipmapsOption, RawImage2d, SrgbTexture2d};
use glium::uniforms::{MagnifySamplerFilter, MinifySamplerFilter, Sampler};
use lazy_static::lazy_static;
use send_wrapper::SendWrapper;

use super::font;

fn load_rgba_image(image: image::RgbaImage) -> RawImage2d<'static, u8> {
    let dimensions = image.dimensions();
    // Rows stay top to bottom, so `v = 0` is the top of the atlas.
    RawImage2d::from_raw_rgba(image.into_raw(), dimensions)
}

lazy_static! {
    /// Atlas of font glyphs and sprites.
    static ref ATLAS_TEX: SendWrapper<SrgbTexture2d> = SendWrapper::new(
        SrgbTexture2d::with_mipmaps(
            &**crate::gui::DISPLAY,
            load_rgba_image(font::atlas_image()),
            MipmapsOption::NoMipmap,
        )
        .expect("Failed to create texture")
    );

    /// Pixel-exact sampler for the atlas.
    pub static ref ATLAS_SAMPLER: SendWrapper<Sampler<'static, SrgbTexture2d>> =
        SendWrapper::new(ATLAS_TEX
            .sampled()
            .minify_filter(MinifySamplerFilter::Nearest)
            .magnify_filter(MagnifySamplerFilter::Nearest));
}
