use crate::window::Window;

/// `NaN op NaN = NaN; NaN op x = x; x op y = x+y` — the identity
/// element for `+` that treats "no sample" as missing, not zero.
pub fn nan_sum(a: f32, b: f32) -> f32 {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => f32::NAN,
		(true, false) => b,
		(false, true) => a,
		(false, false) => a + b,
	}
}

/// `1.0` where `x` is finite, `NaN` otherwise — used to count coverage.
pub fn defined(x: f32) -> f32 {
	if x.is_finite() {
		1.0
	} else {
		f32::NAN
	}
}

/// An immutable, window-aligned sequence of `f32` samples. `NaN`
/// denotes "no sample at this point"; all arithmetic here treats NaN
/// as missing rather than zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
	window: Window,
	points: Vec<f32>,
}

impl TimeSeries {
	pub fn new(window: Window, points: Vec<f32>) -> Self {
		assert_eq!(
			points.len(),
			window.len(),
			"point count must match window length"
		);
		Self { window, points }
	}

	pub fn empty(window: Window) -> Self {
		Self {
			points: vec![f32::NAN; window.len()],
			window,
		}
	}

	pub fn window(&self) -> Window {
		self.window
	}

	pub fn points(&self) -> &[f32] {
		&self.points
	}

	/// Left fold over the points with accumulator `f(acc, x)`,
	/// seeded with `NaN`. Returns `NaN` iff every point was `NaN` —
	/// this only holds when `f` treats `NaN` as its identity element
	/// the way [`nan_sum`] does.
	pub fn reduce(&self, f: impl Fn(f32, f32) -> f32) -> f32 {
		self.points.iter().fold(f32::NAN, |acc, &x| f(acc, x))
	}

	/// Elementwise transform, preserving alignment.
	pub fn map(&self, f: impl Fn(f32) -> f32) -> TimeSeries {
		TimeSeries {
			window: self.window,
			points: self.points.iter().map(|&x| f(x)).collect(),
		}
	}

	/// All points are `NaN`. O(N).
	pub fn is_empty(&self) -> bool {
		self.points.iter().all(|x| x.is_nan())
	}

	fn assert_aligned(&self, other: &TimeSeries) {
		assert_eq!(
			self.window, other.window,
			"mis-aligned series: operands must share one evaluation window"
		);
	}

	/// Elementwise combination via `f`. Both operands must share the
	/// same window; mis-aligned inputs are a programmer error.
	pub fn combine(&self, other: &TimeSeries, f: impl Fn(f32, f32) -> f32) -> TimeSeries {
		self.assert_aligned(other);
		TimeSeries {
			window: self.window,
			points: self
				.points
				.iter()
				.zip(other.points.iter())
				.map(|(&a, &b)| f(a, b))
				.collect(),
		}
	}
}

/// Elementwise division. Any point where either operand is `NaN`, or
/// the denominator is `0`, yields `NaN`.
pub fn div(num: &TimeSeries, den: &TimeSeries) -> TimeSeries {
	num.combine(den, |n, d| {
		if n.is_nan() || d.is_nan() || d == 0.0 {
			f32::NAN
		} else {
			n / d
		}
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn w() -> Window {
		Window::new(0, 3 * 15, 15)
	}

	fn ts(points: [f32; 4]) -> TimeSeries {
		TimeSeries::new(w(), points.to_vec())
	}

	#[test]
	fn nan_sum_treats_nan_as_identity() {
		assert!(nan_sum(f32::NAN, f32::NAN).is_nan());
		assert_eq!(nan_sum(f32::NAN, 1.0), 1.0);
		assert_eq!(nan_sum(1.0, f32::NAN), 1.0);
		assert_eq!(nan_sum(1.0, 2.0), 3.0);
	}

	#[test]
	fn reduce_treats_gaps_as_missing_not_zero() {
		let s = ts([f32::NAN, 1.0, 2.0, f32::NAN]);
		assert_eq!(s.reduce(nan_sum), 3.0);
	}

	#[test]
	fn div_by_nan_is_nan() {
		let recip = 1.0_f32 / f32::NAN;
		assert!(recip.is_nan(), "sanity check on float semantics");
	}

	#[test]
	fn div_by_zero_is_nan() {
		let num = ts([1.0, 2.0, 3.0, 4.0]);
		let den = ts([1.0, 0.0, 2.0, f32::NAN]);
		let out = div(&num, &den);
		assert_eq!(out.points()[0], 1.0);
		assert!(out.points()[1].is_nan());
		assert_eq!(out.points()[2], 1.5);
		assert!(out.points()[3].is_nan());
	}

	/// Quantified invariant 1: IsEmpty(x) <=> Reduce(NanSum, x) is NaN.
	#[test]
	fn is_empty_iff_reduce_nan_sum_is_nan() {
		let empty = TimeSeries::empty(w());
		assert!(empty.is_empty());
		assert!(empty.reduce(nan_sum).is_nan());

		let nonempty = ts([f32::NAN, f32::NAN, 5.0, f32::NAN]);
		assert!(!nonempty.is_empty());
		assert!(!nonempty.reduce(nan_sum).is_nan());
	}

	/// Quantified invariant 2: Div(x, Map(Defined, x)) is a mean
	/// operator under NanSum when coverage is 1 per point.
	#[test]
	fn div_by_defined_is_identity_under_full_coverage() {
		let s = ts([1.0, 2.0, f32::NAN, 4.0]);
		let coverage = s.map(defined);
		let out = div(&s, &coverage);
		assert_eq!(out.points()[0], 1.0);
		assert_eq!(out.points()[1], 2.0);
		assert!(out.points()[2].is_nan());
		assert_eq!(out.points()[3], 4.0);
	}

	#[test]
	#[should_panic(expected = "mis-aligned")]
	fn combine_panics_on_misaligned_windows() {
		let a = TimeSeries::new(Window::new(0, 30, 15), vec![1.0; 3]);
		let b = TimeSeries::new(Window::new(0, 45, 15), vec![1.0; 4]);
		a.combine(&b, nan_sum);
	}
}
