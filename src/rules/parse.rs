use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
	#[error("not a valid percentage")]
	InvalidObjective,
	#[error("not a valid duration")]
	InvalidThreshold,
}

/// Parses an SLO objective annotation value: a bare float or one
/// suffixed with `%`, surrounding whitespace ignored either way.
pub fn parse_objective(s: &str) -> Result<f32, ParseError> {
	let s = s.trim();
	let s = s.strip_suffix('%').unwrap_or(s).trim();
	s.parse::<f32>().map_err(|_| ParseError::InvalidObjective)
}

/// The latency buckets recording rules round an SLO threshold up to,
/// matching the histogram bucket boundaries the L7 latency rule
/// itself reports on.
pub const DEFAULT_LATENCY_BUCKETS: &[f32] = &[
	0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
];

pub fn round_up_to_default_bucket(seconds: f32) -> f32 {
	for &b in DEFAULT_LATENCY_BUCKETS {
		if seconds <= b {
			return b;
		}
	}
	*DEFAULT_LATENCY_BUCKETS.last().unwrap()
}

/// Parses a Go `time.ParseDuration`-style literal into seconds: a
/// sequence of possibly-fractional quantities each followed by a unit
/// (`ns`, `us`/`µs`/`μs`, `ms`, `s`, `m`, `h`), e.g. `1.5s`, `0.5h`,
/// `250ms`, `2h45m`; a lone `0` with no unit is also accepted. Unlike
/// `humantime::parse_duration`, which rejects a fractional quantity,
/// this mirrors what the annotation's source actually parses it with.
fn parse_go_duration_seconds(s: &str) -> Result<f64, ParseError> {
	let s = s.trim();
	if s.is_empty() {
		return Err(ParseError::InvalidThreshold);
	}
	let (neg, rest) = match s.strip_prefix('-') {
		Some(r) => (true, r),
		None => (false, s.strip_prefix('+').unwrap_or(s)),
	};
	if rest == "0" {
		return Ok(0.0);
	}

	let chars: Vec<char> = rest.chars().collect();
	let n = chars.len();
	if n == 0 {
		return Err(ParseError::InvalidThreshold);
	}

	let mut total = 0.0f64;
	let mut i = 0;
	while i < n {
		let start = i;
		let mut saw_digit = false;
		while i < n && chars[i].is_ascii_digit() {
			i += 1;
			saw_digit = true;
		}
		if i < n && chars[i] == '.' {
			i += 1;
			while i < n && chars[i].is_ascii_digit() {
				i += 1;
				saw_digit = true;
			}
		}
		if !saw_digit {
			return Err(ParseError::InvalidThreshold);
		}
		let quantity: f64 = chars[start..i]
			.iter()
			.collect::<String>()
			.parse()
			.map_err(|_| ParseError::InvalidThreshold)?;

		let unit_start = i;
		while i < n && !chars[i].is_ascii_digit() && chars[i] != '.' {
			i += 1;
		}
		if i == unit_start {
			return Err(ParseError::InvalidThreshold);
		}
		let unit_seconds = match chars[unit_start..i].iter().collect::<String>().as_str() {
			"ns" => 1e-9,
			"us" | "µs" | "μs" => 1e-6,
			"ms" => 1e-3,
			"s" => 1.0,
			"m" => 60.0,
			"h" => 3600.0,
			_ => return Err(ParseError::InvalidThreshold),
		};
		total += quantity * unit_seconds;
	}
	Ok(if neg { -total } else { total })
}

/// Parses an SLO threshold annotation value (a Go-style duration
/// literal, e.g. `200ms`, `1.5s`) and rounds it up to the nearest
/// default bucket boundary.
pub fn parse_threshold(s: &str) -> Result<f32, ParseError> {
	let seconds = parse_go_duration_seconds(s)?;
	Ok(round_up_to_default_bucket(seconds as f32))
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn parse_objective_accepts_percent_suffix() {
		assert_eq!(parse_objective("99.9").unwrap(), 99.9);
		assert_eq!(parse_objective("99.9%").unwrap(), 99.9);
		assert_eq!(parse_objective(" 99.9 % ").unwrap(), 99.9);
	}

	#[test]
	fn parse_objective_rejects_garbage() {
		assert_eq!(parse_objective("not-a-number"), Err(ParseError::InvalidObjective));
	}

	#[test]
	fn parse_threshold_rounds_up_to_next_bucket() {
		assert_eq!(parse_threshold("30ms").unwrap(), 0.05);
		assert_eq!(parse_threshold("100ms").unwrap(), 0.1);
		assert_eq!(parse_threshold("1s").unwrap(), 1.0);
		assert_eq!(parse_threshold("1.5s").unwrap(), 2.5);
	}

	#[test]
	fn parse_threshold_rejects_garbage() {
		assert_eq!(parse_threshold("banana"), Err(ParseError::InvalidThreshold));
	}
}
