use crate::series::TimeSeries;

/// A mutable builder that combines a stream of series pointwise via a
/// binary operator. The canonical operator is [`crate::nan_sum`].
pub struct Aggregate {
	op: fn(f32, f32) -> f32,
	acc: Option<TimeSeries>,
}

impl Aggregate {
	pub fn new(op: fn(f32, f32) -> f32) -> Self {
		Self { op, acc: None }
	}

	pub fn add(&mut self, ts: &TimeSeries) -> &mut Self {
		self.acc = Some(match self.acc.take() {
			None => ts.clone(),
			Some(acc) => acc.combine(ts, self.op),
		});
		self
	}

	/// `None` iff [`Aggregate::add`] was never called.
	pub fn get(&self) -> Option<TimeSeries> {
		self.acc.clone()
	}
}
