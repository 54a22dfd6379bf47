//! Interop with the `image` crate: decoded images as grid sources, and the
//! composite back out as an [`RgbaImage`].

use image::{DynamicImage, GenericImageView, ImageBuffer, RgbaImage};

use crate::compose::Raster;
use crate::source::{Dimensions, Drawable};

impl Dimensions for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        ImageBuffer::dimensions(self)
    }
}

impl Drawable for RgbaImage {
    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.get_pixel(x, y).0
    }
}

impl Dimensions for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }
}

impl Drawable for DynamicImage {
    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        GenericImageView::get_pixel(self, x, y).0
    }
}

impl Raster {
    /// Copy the composite into an [`RgbaImage`] for encoding.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            image::Rgba(self.get_pixel(x, y))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::CanvasColor;
    use crate::compose::render;
    use crate::layout::compute_layout;
    use crate::settings::Settings;

    #[test]
    fn rgba_image_is_a_source() {
        let img = RgbaImage::from_pixel(4, 2, image::Rgba([1, 2, 3, 255]));
        assert_eq!(Dimensions::dimensions(&img), (4, 2));
        assert_eq!(Dimensions::aspect_ratio(&img), Some(2.0));
        assert_eq!(Drawable::pixel(&img, 3, 1), [1, 2, 3, 255]);
    }

    #[test]
    fn dynamic_image_converts_to_rgba() {
        let rgb = image::RgbImage::from_pixel(3, 3, image::Rgb([10, 20, 30]));
        let img = DynamicImage::ImageRgb8(rgb);
        assert_eq!(Dimensions::dimensions(&img), (3, 3));
        assert_eq!(Drawable::pixel(&img, 1, 1), [10, 20, 30, 255]);
    }

    #[test]
    fn render_decoded_images_and_export() {
        let images = vec![
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(20, 10, image::Rgba([255, 0, 0, 255]))),
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(20, 10, image::Rgba([0, 0, 255, 255]))),
        ];
        let settings = Settings::width_col(40.0, 2)
            .gap(0.0)
            .background(CanvasColor::white());
        let layout = compute_layout(&images, &settings).unwrap();
        let out = render(&layout, &images, &settings).to_rgba_image();

        assert_eq!(out.dimensions(), (40, 10));
        assert_eq!(out.get_pixel(5, 5).0, [255, 0, 0, 255]);
        assert_eq!(out.get_pixel(35, 5).0, [0, 0, 255, 255]);
    }
}
