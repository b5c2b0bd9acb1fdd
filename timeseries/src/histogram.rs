use crate::series::{nan_sum, TimeSeries};
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

/// An upper-bound-indexed family of cumulative-count series, as
/// produced by a Prometheus-style `_bucket` metric: `le -> series`.
#[derive(Debug, Clone, Default)]
pub struct Histogram {
	buckets: BTreeMap<OrderedFloat<f32>, TimeSeries>,
}

impl Histogram {
	pub fn new() -> Self {
		Self {
			buckets: BTreeMap::new(),
		}
	}

	pub fn insert(&mut self, le: f32, ts: TimeSeries) {
		self.buckets.insert(OrderedFloat(le), ts);
	}

	pub fn buckets(&self) -> impl Iterator<Item = (f32, &TimeSeries)> {
		self.buckets.iter().map(|(le, ts)| (le.0, ts))
	}

	pub fn is_empty(&self) -> bool {
		self.buckets.is_empty()
	}

	/// Per-`le` `NanSum` of two histograms sharing the same bucket
	/// boundaries.
	pub fn merge(&self, other: &Histogram) -> Histogram {
		let mut out = Histogram::new();
		for (le, ts) in &self.buckets {
			let merged = match other.buckets.get(le) {
				Some(o) => ts.combine(o, nan_sum),
				None => ts.clone(),
			};
			out.buckets.insert(*le, merged);
		}
		for (le, ts) in &other.buckets {
			out.buckets.entry(*le).or_insert_with(|| ts.clone());
		}
		out
	}

	/// Quantile estimation at a single point in time via linear
	/// interpolation between adjacent bucket counts, with the usual
	/// `+Inf` bucket treated as the upper bound of the last finite
	/// bucket's rank.
	pub fn quantile_at(&self, point_index: usize, q: f32) -> f32 {
		if self.buckets.is_empty() || !(0.0..=1.0).contains(&q) {
			return f32::NAN;
		}
		let mut prev_le = 0.0_f32;
		let mut prev_count = 0.0_f32;
		let total = self
			.buckets
			.values()
			.next_back()
			.map(|ts| ts.points()[point_index])
			.unwrap_or(f32::NAN);
		if total.is_nan() || total <= 0.0 {
			return f32::NAN;
		}
		let rank = q * total;
		for (le, ts) in &self.buckets {
			let count = ts.points()[point_index];
			if count.is_nan() {
				continue;
			}
			if count >= rank {
				if !le.0.is_finite() {
					return prev_le;
				}
				if count == prev_count {
					return le.0;
				}
				let fraction = (rank - prev_count) / (count - prev_count);
				return prev_le + fraction * (le.0 - prev_le);
			}
			prev_le = le.0;
			prev_count = count;
		}
		prev_le
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Window;
	use pretty_assertions::assert_eq;

	fn w() -> Window {
		Window::new(0, 15, 15)
	}

	#[test]
	fn merge_sums_matching_buckets() {
		let mut a = Histogram::new();
		a.insert(0.1, TimeSeries::new(w(), vec![1.0, 2.0]));
		a.insert(0.5, TimeSeries::new(w(), vec![3.0, 4.0]));
		let mut b = Histogram::new();
		b.insert(0.1, TimeSeries::new(w(), vec![1.0, f32::NAN]));

		let merged = a.merge(&b);
		let bucket_01 = merged
			.buckets()
			.find(|(le, _)| *le == 0.1)
			.unwrap()
			.1
			.points()
			.to_vec();
		assert_eq!(bucket_01, vec![2.0, 2.0]);
	}

	#[test]
	fn quantile_interpolates_linearly() {
		let mut h = Histogram::new();
		h.insert(0.1, TimeSeries::new(w(), vec![50.0]));
		h.insert(0.5, TimeSeries::new(w(), vec![100.0]));
		h.insert(f32::INFINITY, TimeSeries::new(w(), vec![100.0]));
		// p50 sits exactly at the 0.1 bucket boundary (50/100 = 0.5 rank)
		assert_eq!(h.quantile_at(0, 0.5), 0.1);
		// p75 interpolates between the 0.1 and 0.5 buckets
		let p75 = h.quantile_at(0, 0.75);
		assert!((p75 - 0.3).abs() < 1e-6, "p75 = {p75}");
	}
}
