/// The `[from, to, step]` alignment every [`crate::TimeSeries`] in one
/// evaluation shares. `from`/`to`/`step` are all seconds since epoch
/// (`step` being a duration), and `from`/`to` are always multiples of
/// `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
	pub from: i64,
	pub to: i64,
	pub step: i64,
}

impl Window {
	pub fn new(from: i64, to: i64, step: i64) -> Self {
		assert!(step > 0, "step must be positive");
		assert!(to >= from, "to must not precede from");
		Self { from, to, step }
	}

	/// `N = (to - from)/step + 1`
	pub fn len(&self) -> usize {
		(((self.to - self.from) / self.step) + 1) as usize
	}

	pub fn is_empty(&self) -> bool {
		false
	}

	pub fn points(&self) -> impl Iterator<Item = i64> + '_ {
		(0..self.len()).map(move |i| self.from + i as i64 * self.step)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn len_is_inclusive_of_both_ends() {
		let w = Window::new(0, 60, 15);
		assert_eq!(w.len(), 5);
		assert_eq!(w.points().collect::<Vec<_>>(), vec![0, 15, 30, 45, 60]);
	}
}
