use alloc::vec::Vec;

use zeroize::Zeroize;

use crate::field::{ElementSource, GaloisField};

/// Secret-carrying polynomial, coefficients from the highest degree down to the constant term.
///
/// Coefficients are wiped on drop.
pub struct Polynomial {
	coefficients: Vec<u32>,
}

impl Polynomial {
	/// Degree `threshold - 1` polynomial with random leading coefficients and `secret` as constant term.
	pub fn random<S: ElementSource>(field: &GaloisField, source: &mut S, secret: u32, threshold: u32) -> Self {
		let mut coefficients = Vec::with_capacity(threshold as usize);
		for _ in 1..threshold {
			coefficients.push(source.next_uniform_element(field));
		}
		coefficients.push(secret);
		Self { coefficients }
	}

	pub fn from_coefficients(coefficients: Vec<u32>) -> Self {
		Self { coefficients }
	}

	pub fn coefficients(&self) -> &[u32] {
		&self.coefficients
	}

	pub fn constant_term(&self) -> u32 {
		self.coefficients.last().copied().unwrap_or(0)
	}

	/// Horner evaluation, `len - 1` multiplications and additions.
	pub fn evaluate(&self, field: &GaloisField, x: u32) -> u32 {
		let mut coefficients = self.coefficients.iter();
		let mut y = match coefficients.next() {
			Some(leading) => *leading,
			None => return 0,
		};
		for a in coefficients {
			y = field.multiply(y, x);
			y = field.add(y, *a);
		}
		y
	}
}

impl Drop for Polynomial {
	fn drop(&mut self) {
		self.coefficients.zeroize();
	}
}
