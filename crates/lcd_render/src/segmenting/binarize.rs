use image::RgbImage;

/// Per-channel bitwise complement. Sheets are drawn as dark ink on a light
/// background; inverting turns the ink into the bright side of the histogram
/// so thresholding keeps it as foreground.
pub fn invert(image: &RgbImage) -> RgbImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        pixel.0 = [!pixel.0[0], !pixel.0[1], !pixel.0[2]];
    }
    out
}

/// Rec. 601 luma reduction to a single channel, row-major.
pub fn luma(image: &RgbImage) -> Vec<u8> {
    let mut data = Vec::with_capacity((image.width() * image.height()) as usize);
    for pixel in image.pixels() {
        let [r, g, b] = pixel.0;
        let lum = (r as u32 * 299 + g as u32 * 587 + b as u32 * 114 + 500) / 1000;
        data.push(lum.min(255) as u8);
    }
    data
}

/// Otsu's method: the threshold maximizing between-class variance, which is
/// equivalent to minimizing combined intra-class variance. Adapts to the
/// source art with no manual tuning.
pub fn otsu_level(values: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &value in values {
        histogram[value as usize] += 1;
    }

    let total = values.len() as u64;
    if total == 0 {
        return 0;
    }

    let weighted_sum: u64 = histogram.iter().enumerate().map(|(v, &n)| v as u64 * n).sum();

    let mut best_level = 0u8;
    let mut best_variance = 0.0f64;
    let mut background_count = 0u64;
    let mut background_sum = 0u64;

    for level in 0..256usize {
        background_count += histogram[level];
        if background_count == 0 {
            continue;
        }
        let foreground_count = total - background_count;
        if foreground_count == 0 {
            break;
        }

        background_sum += level as u64 * histogram[level];
        let background_mean = background_sum as f64 / background_count as f64;
        let foreground_mean = (weighted_sum - background_sum) as f64 / foreground_count as f64;

        let mean_delta = background_mean - foreground_mean;
        let variance =
            background_count as f64 * foreground_count as f64 * mean_delta * mean_delta;
        if variance > best_variance {
            best_variance = variance;
            best_level = level as u8;
        }
    }

    best_level
}

/// Binary mask: 255 where the value exceeds the threshold, 0 elsewhere.
pub fn binarize(values: &[u8], threshold: u8) -> Vec<u8> {
    values.iter().map(|&v| if v > threshold { 255 } else { 0 }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn invert_complements_every_channel() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([0, 128, 255]));
        image.put_pixel(1, 0, Rgb([17, 29, 41]));

        let inverted = invert(&image);
        assert_eq!(inverted.get_pixel(0, 0).0, [255, 127, 0]);
        assert_eq!(inverted.get_pixel(1, 0).0, [238, 226, 214]);
    }

    #[test]
    fn luma_weights_green_heaviest() {
        let mut image = RgbImage::new(3, 1);
        image.put_pixel(0, 0, Rgb([255, 0, 0]));
        image.put_pixel(1, 0, Rgb([0, 255, 0]));
        image.put_pixel(2, 0, Rgb([0, 0, 255]));

        let gray = luma(&image);
        assert!(gray[1] > gray[0]);
        assert!(gray[0] > gray[2]);
    }

    #[test]
    fn otsu_splits_a_bimodal_distribution() {
        let mut values = vec![10u8; 600];
        values.extend(std::iter::repeat(200u8).take(400));

        let level = otsu_level(&values);
        assert!(level >= 10 && level < 200, "level {level} does not separate the modes");

        let mask = binarize(&values, level);
        assert!(mask[..600].iter().all(|&v| v == 0));
        assert!(mask[600..].iter().all(|&v| v == 255));
    }

    #[test]
    fn otsu_on_uniform_input_keeps_everything_on_one_side() {
        let values = vec![42u8; 100];
        let level = otsu_level(&values);
        let mask = binarize(&values, level);
        let foreground = mask.iter().filter(|&&v| v == 255).count();
        assert!(foreground == 0 || foreground == mask.len());
    }
}
