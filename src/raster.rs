//! Dominant-color clustering for bitmaps.
//!
//! Fully transparent pixels are discarded, the remaining colors are
//! partitioned with k-means in sRGB space and every centroid is labeled
//! with its canonical identifier.

use std::collections::HashSet;

use image::RgbaImage;
use kmeans_colors::{Kmeans, get_kmeans};
use palette::Srgb;
use tracing::debug;

use crate::color::{ColorReport, ColorSet, rgb_label};
use crate::config::ClusterConfig;
use crate::error::{DetectError, Result};

/// Cluster the opaque pixels of `image` into at most `config.max_colors`
/// representative colors.
///
/// A fully transparent (or empty) image yields an empty report. The count is
/// the number of distinct labels, so centroids that round to the same
/// 8-bit color are reported once.
pub fn cluster_raster_colors(image: &RgbaImage, config: &ClusterConfig) -> Result<ColorReport> {
    config.validate()?;

    let samples = opaque_samples(image);
    if samples.is_empty() {
        debug!(width = image.width(), height = image.height(), "no opaque pixels");
        return Ok(ColorReport::empty());
    }

    let k = config.max_colors.min(samples.len());

    // Few enough distinct colors: each one is its own zero-variance cluster.
    if let Some(distinct) = distinct_colors_up_to(&samples, k) {
        debug!(samples = samples.len(), distinct = distinct.len(), "exact palette");
        return Ok(ColorReport::from_set(label_colors(distinct)));
    }

    let base_seed = match config.seed {
        Some(seed) => seed,
        None => getrandom::u64().map_err(|e| DetectError::Entropy(e.to_string()))?,
    };

    let pixels: Vec<Srgb<f32>> = samples
        .iter()
        .map(|&[r, g, b]| Srgb::<u8>::new(r, g, b).into_format::<f32>())
        .collect();

    let converge = config.kmeans_converge();
    let (inertia, best) = (0..config.runs)
        .map(|run| {
            let seed = base_seed.wrapping_add(run as u64);
            let kmeans = get_kmeans(k, config.max_iterations, converge, false, &pixels, seed);
            (within_cluster_sse(&pixels, &kmeans), kmeans)
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .ok_or_else(|| DetectError::InvalidInput("runs must be at least 1".into()))?;

    let colors = label_colors(populated_centroids(&best, k));
    debug!(
        samples = samples.len(),
        k,
        runs = config.runs,
        inertia,
        labels = colors.len(),
        "clustered raster colors"
    );
    Ok(ColorReport::from_set(colors))
}

/// RGB triples of every pixel whose alpha is non-zero.
fn opaque_samples(image: &RgbaImage) -> Vec<[u8; 3]> {
    image
        .pixels()
        .filter(|p| p.0[3] != 0)
        .map(|p| [p.0[0], p.0[1], p.0[2]])
        .collect()
}

/// The distinct colors among `samples`, or `None` once there are more than `k`.
fn distinct_colors_up_to(samples: &[[u8; 3]], k: usize) -> Option<Vec<[u8; 3]>> {
    let mut seen = HashSet::with_capacity(k + 1);
    for &rgb in samples {
        if seen.insert(rgb) && seen.len() > k {
            return None;
        }
    }
    Some(seen.into_iter().collect())
}

/// Sum of squared distances from each pixel to its assigned centroid.
fn within_cluster_sse(pixels: &[Srgb<f32>], kmeans: &Kmeans<Srgb<f32>>) -> f64 {
    pixels
        .iter()
        .zip(&kmeans.indices)
        .map(|(p, &idx)| {
            let c = kmeans.centroids[idx as usize];
            let dr = f64::from(p.red - c.red);
            let dg = f64::from(p.green - c.green);
            let db = f64::from(p.blue - c.blue);
            dr * dr + dg * dg + db * db
        })
        .sum()
}

/// Centroids with at least one member, rounded to 8 bits per channel.
///
/// `kmeans_colors` reseeds empty clusters with a random color, which must
/// not surface as a detected color.
fn populated_centroids(kmeans: &Kmeans<Srgb<f32>>, k: usize) -> Vec<[u8; 3]> {
    let mut populated = vec![false; k.max(kmeans.centroids.len())];
    for &idx in &kmeans.indices {
        populated[idx as usize] = true;
    }
    kmeans
        .centroids
        .iter()
        .zip(populated)
        .filter(|(_, used)| *used)
        .map(|(c, _)| {
            let c: Srgb<u8> = c.into_format::<u8>();
            [c.red, c.green, c.blue]
        })
        .collect()
}

fn label_colors(colors: impl IntoIterator<Item = [u8; 3]>) -> ColorSet {
    colors.into_iter().map(rgb_label).collect()
}
