//! Face alignment via a 4-DOF similarity transform (scale, rotation,
//! translation) fitted by least squares to the InsightFace reference landmarks.

use image::RgbImage;

/// ArcFace reference landmarks for a 112×112 output.
const REFERENCE_LANDMARKS_112: [(f32, f32); 5] = [
    (38.2946, 51.6963), // left eye
    (73.5318, 51.5014), // right eye
    (56.0252, 71.7366), // nose
    (41.5493, 92.3655), // left mouth
    (70.7299, 92.2041), // right mouth
];

pub const ALIGNED_SIZE: u32 = 112;

/// Fit the similarity transform mapping `src` onto `dst` in the
/// least-squares sense.
///
/// Returns [a, -b, tx, b, a, ty] representing the matrix:
/// ```text
/// | a  -b  tx |
/// | b   a  ty |
/// ```
fn estimate_similarity_transform(src: &[(f32, f32); 5], dst: &[(f32, f32); 5]) -> [f32; 6] {
    let n = src.len() as f32;
    let centroid = |pts: &[(f32, f32); 5]| {
        let (sx, sy) = pts.iter().fold((0.0, 0.0), |(ax, ay), &(x, y)| (ax + x, ay + y));
        (sx / n, sy / n)
    };
    let (smx, smy) = centroid(src);
    let (dmx, dmy) = centroid(dst);

    // Closed form over centred coordinates
    let mut dot = 0.0f32;
    let mut cross = 0.0f32;
    let mut src_var = 0.0f32;
    for (&(sx, sy), &(dx, dy)) in src.iter().zip(dst.iter()) {
        let (sx, sy) = (sx - smx, sy - smy);
        let (dx, dy) = (dx - dmx, dy - dmy);
        dot += sx * dx + sy * dy;
        cross += sx * dy - sy * dx;
        src_var += sx * sx + sy * sy;
    }

    if src_var < 1e-12 {
        // Degenerate landmarks: translate only.
        return [1.0, 0.0, dmx - smx, 0.0, 1.0, dmy - smy];
    }

    let a = dot / src_var;
    let b = cross / src_var;
    let tx = dmx - (a * smx - b * smy);
    let ty = dmy - (b * smx + a * smy);

    [a, -b, tx, b, a, ty]
}

/// Apply a similarity warp to produce an `out_size` × `out_size` RGB crop.
///
/// Samples bilinearly; pixels mapping outside the source are black.
fn warp_affine(image: &RgbImage, matrix: &[f32; 6], out_size: u32) -> RgbImage {
    let (a, tx) = (matrix[0], matrix[2]);
    let (b, ty) = (matrix[3], matrix[5]);

    let mut output = RgbImage::new(out_size, out_size);

    // M = [[a, -b], [b, a]], det = a^2 + b^2
    let det = a * a + b * b;
    if det.abs() < 1e-12 {
        return output;
    }
    let ia = a / det;
    let ib = b / det;

    let (src_w, src_h) = (image.width() as i32, image.height() as i32);
    let sample = |x: i32, y: i32| -> [f32; 3] {
        if x >= 0 && x < src_w && y >= 0 && y < src_h {
            let p = image.get_pixel(x as u32, y as u32);
            [p[0] as f32, p[1] as f32, p[2] as f32]
        } else {
            [0.0; 3]
        }
    };

    for (ox, oy, pixel) in output.enumerate_pixels_mut() {
        // src = M_inv * (dst - t)
        let dx = ox as f32 - tx;
        let dy = oy as f32 - ty;
        let sx = ia * dx + ib * dy;
        let sy = -ib * dx + ia * dy;

        let x0 = sx.floor() as i32;
        let y0 = sy.floor() as i32;
        let fx = sx - x0 as f32;
        let fy = sy - y0 as f32;

        let tl = sample(x0, y0);
        let tr = sample(x0 + 1, y0);
        let bl = sample(x0, y0 + 1);
        let br = sample(x0 + 1, y0 + 1);

        for c in 0..3 {
            let val = tl[c] * (1.0 - fx) * (1.0 - fy)
                + tr[c] * fx * (1.0 - fy)
                + bl[c] * (1.0 - fx) * fy
                + br[c] * fx * fy;
            pixel[c] = val.round().clamp(0.0, 255.0) as u8;
        }
    }

    output
}

/// Align a detected face to the canonical 112×112 ArcFace crop using its
/// five landmarks.
pub fn align_face(image: &RgbImage, landmarks: &[(f32, f32); 5]) -> RgbImage {
    let matrix = estimate_similarity_transform(landmarks, &REFERENCE_LANDMARKS_112);
    warp_affine(image, &matrix, ALIGNED_SIZE)
}
