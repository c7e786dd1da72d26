//! Contains the AffineTransform struct, which describes a relationship
//! between the integral pixel plane, with an origin at 0,0, and the
//! complex plane.  Six coefficients are enough to express any pan,
//! zoom, and rotation the host wants; we never ask how it got them.
use errors::RenderError;
use num::Complex;

/// Describes the x, y of a pixel in the full image (not the block).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps a pixel `(x, y)` to the complex number
///
/// ```text
/// re = zx_x * x + zx_y * y + zx_c
/// im = zy_x * x + zy_y * y + zy_c
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AffineTransform {
    /// Contribution of x to the real part.
    pub zx_x: f64,
    /// Contribution of y to the real part.
    pub zx_y: f64,
    /// Real offset.
    pub zx_c: f64,
    /// Contribution of x to the imaginary part.
    pub zy_x: f64,
    /// Contribution of y to the imaginary part.
    pub zy_y: f64,
    /// Imaginary offset.
    pub zy_c: f64,
}

impl AffineTransform {
    /// Straight from the six coefficients.
    pub fn new(zx_x: f64, zx_y: f64, zx_c: f64, zy_x: f64, zy_y: f64, zy_c: f64) -> Self {
        AffineTransform {
            zx_x,
            zx_y,
            zx_c,
            zy_x,
            zy_y,
            zy_c,
        }
    }

    /// Every pixel maps to the same point.  Handy for testing a
    /// single value of c.
    pub fn constant(c: Complex<f64>) -> Self {
        AffineTransform::new(0.0, 0.0, c.re, 0.0, 0.0, c.im)
    }

    /// Constructor.  Takes the size of the image and the two corners
    /// of the complex plane that should fill it.  Pixel (0, 0) maps to
    /// `leftlower` and pixel (width, height) would map to
    /// `rightupper`; there is no rotation.
    pub fn from_corners(
        width: usize,
        height: usize,
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<AffineTransform, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyImage(width, height));
        }
        if rightupper.re < leftlower.re || rightupper.im < leftlower.im {
            return Err(RenderError::InvertedPlane);
        }

        let xstep = (rightupper.re - leftlower.re) / (width as f64);
        let ystep = (rightupper.im - leftlower.im) / (height as f64);
        Ok(AffineTransform::new(
            xstep,
            0.0,
            leftlower.re,
            0.0,
            ystep,
            leftlower.im,
        ))
    }

    /// Centers the image on `center`, with `span` units of the complex
    /// plane across the image's width, rotated counter-clockwise by
    /// `angle` radians about the center.  Pixels are square.
    pub fn from_view(
        width: usize,
        height: usize,
        center: Complex<f64>,
        span: f64,
        angle: f64,
    ) -> Result<AffineTransform, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyImage(width, height));
        }
        let scale = span / (width as f64);
        let (sin, cos) = angle.sin_cos();
        let (hx, hy) = ((width as f64) / 2.0, (height as f64) / 2.0);

        // Rotate the scaled pixel offset from the image center, then
        // shift onto the requested center.
        let (zx_x, zx_y) = (scale * cos, -scale * sin);
        let (zy_x, zy_y) = (scale * sin, scale * cos);
        Ok(AffineTransform::new(
            zx_x,
            zx_y,
            center.re - zx_x * hx - zx_y * hy,
            zy_x,
            zy_y,
            center.im - zy_x * hx - zy_y * hy,
        ))
    }

    /// Given a pixel on the integral cartesian plane, return the point
    /// on the complex plane it samples.
    #[inline]
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let (x, y) = (pixel.0 as f64, pixel.1 as f64);
        Complex::new(
            self.zx_x * x + self.zx_y * y + self.zx_c,
            self.zy_x * x + self.zy_y * y + self.zy_c,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Complex<f64>, b: Complex<f64>) -> bool {
        (a - b).norm_sqr() < 1e-20
    }

    #[test]
    fn from_corners_fails_on_bad_shape() {
        let t =
            AffineTransform::from_corners(4, 4, Complex::new(-1.0, 1.0), Complex::new(1.0, -1.0));
        assert_eq!(t, Err(RenderError::InvertedPlane));
    }

    #[test]
    fn from_corners_fails_on_empty_image() {
        let t =
            AffineTransform::from_corners(0, 4, Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0));
        assert_eq!(t, Err(RenderError::EmptyImage(0, 4)));
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let t = AffineTransform::from_corners(5, 5, Complex::new(0.0, 0.0), Complex::new(5.0, 5.0))
            .unwrap();
        assert_eq!(t.pixel_to_point(&Pixel(0, 0)), Complex::new(0.0, 0.0));
        assert_eq!(t.pixel_to_point(&Pixel(2, 2)), Complex::new(2.0, 2.0));
        assert_eq!(t.pixel_to_point(&Pixel(4, 4)), Complex::new(4.0, 4.0));
    }

    #[test]
    fn pixel_to_points_on_mixed_planes() {
        let t =
            AffineTransform::from_corners(4, 4, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0))
                .unwrap();
        assert_eq!(t.pixel_to_point(&Pixel(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(t.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -2.0));
        assert_eq!(t.pixel_to_point(&Pixel(4, 4)), Complex::new(2.0, 2.0));
    }

    #[test]
    fn constant_maps_everything_to_one_point() {
        let t = AffineTransform::constant(Complex::new(0.25, -0.5));
        assert_eq!(t.pixel_to_point(&Pixel(0, 0)), Complex::new(0.25, -0.5));
        assert_eq!(t.pixel_to_point(&Pixel(17, 301)), Complex::new(0.25, -0.5));
    }

    #[test]
    fn unrotated_view_matches_corners() {
        let v = AffineTransform::from_view(4, 4, Complex::new(0.0, 0.0), 4.0, 0.0).unwrap();
        let c =
            AffineTransform::from_corners(4, 4, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0))
                .unwrap();
        for &(x, y) in &[(0, 0), (1, 3), (4, 4)] {
            assert!(close(v.pixel_to_point(&Pixel(x, y)), c.pixel_to_point(&Pixel(x, y))));
        }
    }

    #[test]
    fn quarter_turn_rotates_about_center() {
        let v = AffineTransform::from_view(
            4,
            4,
            Complex::new(1.0, 1.0),
            4.0,
            ::std::f64::consts::FRAC_PI_2,
        )
        .unwrap();
        assert!(close(v.pixel_to_point(&Pixel(2, 2)), Complex::new(1.0, 1.0)));
        // One pixel to the right of center now steps along +i.
        assert!(close(v.pixel_to_point(&Pixel(3, 2)), Complex::new(1.0, 2.0)));
    }
}
