use crate::core::particle::Particle;
use crate::error::{Error, Result};

/// Frequency table over discretized speed for one particle species.
///
/// The table has a fixed number of equal-width buckets; bucket `i` covers
/// speeds `[i * bucket_width, (i + 1) * bucket_width)`, except the last
/// bucket, which also absorbs every speed beyond its lower bound (no upper
/// limit is enforced). The owning simulation clears and fully repopulates the
/// table every step, so `total()` always reflects the particles counted since
/// the last `reset`.
#[derive(Debug, Clone)]
pub struct SpeedHistogram {
    bucket_width: f64,
    frequencies: Vec<u64>,
    color: String,
}

impl SpeedHistogram {
    /// Create an empty histogram with `bucket_count` buckets of `bucket_width`.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `bucket_count` is zero or `bucket_width` is
    ///   non-positive or non-finite.
    pub fn new(bucket_count: usize, bucket_width: f64, color: impl Into<String>) -> Result<Self> {
        if bucket_count == 0 {
            return Err(Error::InvalidParam("bucket count must be > 0".into()));
        }
        if !bucket_width.is_finite() || bucket_width <= 0.0 {
            return Err(Error::InvalidParam(
                "bucket width must be finite and > 0".into(),
            ));
        }
        Ok(Self {
            bucket_width,
            frequencies: vec![0; bucket_count],
            color: color.into(),
        })
    }

    /// Zero every bucket.
    pub fn reset(&mut self) {
        self.frequencies.fill(0);
    }

    /// Count a particle into the bucket covering its current speed.
    ///
    /// The bucket index is the largest `i` with `i * bucket_width <= speed`,
    /// clamped to the last bucket: a speed exactly on a boundary counts into
    /// the bucket it opens, and speeds past the top boundary all land in the
    /// final overflow bucket.
    pub fn count(&mut self, particle: &Particle) {
        let bucket = (particle.speed() / self.bucket_width) as usize;
        let last = self.frequencies.len() - 1;
        self.frequencies[bucket.min(last)] += 1;
    }

    /// Number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.frequencies.len()
    }

    /// Width of each bucket in speed units.
    pub fn bucket_width(&self) -> f64 {
        self.bucket_width
    }

    /// Per-bucket frequencies, index = bucket id.
    pub fn frequencies(&self) -> &[u64] {
        &self.frequencies
    }

    /// Bucket boundary speeds: `bucket_count + 1` values starting at zero.
    ///
    /// The renderer labels its speed axis with these; the last boundary is
    /// only nominal since the final bucket is unbounded above.
    pub fn bucket_edges(&self) -> Vec<f64> {
        (0..=self.frequencies.len())
            .map(|i| i as f64 * self.bucket_width)
            .collect()
    }

    /// Total number of particles counted since the last `reset`.
    ///
    /// The renderer divides bar heights by this to normalize them.
    pub fn total(&self) -> u64 {
        self.frequencies.iter().sum()
    }

    /// Display color token for this species' histogram.
    pub fn color(&self) -> &str {
        &self.color
    }
}
