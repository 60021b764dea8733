use super::catalog::{Bucket, BucketRule};

/// Bucket selected for a raw metric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketMatch<'a> {
    pub bucket: &'a Bucket,
    /// Set when no range matched and the last bucket was used instead.
    pub fallback: bool,
}

impl BucketMatch<'_> {
    pub fn score(&self) -> u32 {
        self.bucket.score
    }

    pub fn feedback(&self) -> &'static str {
        self.bucket.feedback
    }
}

/// Returns the first bucket, in catalog order, whose range contains `value`.
///
/// Bucket order is authoritative regardless of the rule's polarity; overlapping ranges resolve
/// to whichever is listed first. Values outside every range (gaps, NaN) resolve to the last
/// bucket.
pub fn match_bucket(value: f64, rule: &BucketRule) -> BucketMatch<'_> {
    rule.buckets()
        .find(|bucket| bucket.range.matches(value))
        .map(|bucket| BucketMatch {
            bucket,
            fallback: false,
        })
        .unwrap_or_else(|| BucketMatch {
            bucket: rule.fallback(),
            fallback: true,
        })
}
