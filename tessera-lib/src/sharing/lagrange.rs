use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::field::GaloisField;
use crate::sharing::{Share, SharingError};

/// Evaluates, at `at`, the lowest degree polynomial through all `shares`.
///
/// Index 0 is accepted here. Shares are only read; the basis values go into a fresh buffer.
pub fn interpolate_at(field: &GaloisField, shares: &[Share], at: u32) -> Result<u32, SharingError> {
	if shares.is_empty() {
		return Err(SharingError::InsufficientShares)
	}
	field.element(at)?;
	let mut seen = HashSet::with_capacity(shares.len());
	for share in shares {
		field.element(share.index)?;
		field.element(share.value)?;
		if !seen.insert(share.index) {
			return Err(SharingError::DuplicateIndex(share.index))
		}
	}

	let weighted = shares
		.iter()
		.enumerate()
		.map(|(i, share)| {
			let basis = basis_value(field, shares, i, at)?;
			Ok(field.multiply(share.value, basis))
		})
		.collect::<Result<Vec<u32>, SharingError>>()?;

	Ok(weighted.into_iter().fold(0, |acc, term| field.add(acc, term)))
}

/// `L_i(at) = prod_{j != i} (at - x_j) / (x_i - x_j)`
fn basis_value(field: &GaloisField, shares: &[Share], i: usize, at: u32) -> Result<u32, SharingError> {
	let xi = shares[i].index;
	let mut basis = 1;
	for (j, other) in shares.iter().enumerate() {
		if i == j {
			continue
		}
		basis = field.multiply(basis, field.subtract(at, other.index));
		basis = field.divide(basis, field.subtract(xi, other.index))?;
	}
	Ok(basis)
}

#[cfg(test)]
mod lagrange_test {
	use crate::field::GaloisField;
	use crate::sharing::lagrange::interpolate_at;
	use crate::sharing::polynomial::Polynomial;
	use crate::sharing::{Share, SharingError};
	use alloc::vec;
	use alloc::vec::Vec;

	#[test]
	fn recovers_points_of_known_polynomial() {
		let field = GaloisField::new(8).unwrap();
		let poly = Polynomial::from_coefficients(vec![3, 1, 5]);
		let shares: Vec<Share> = [4u32, 9, 200]
			.iter()
			.map(|x| Share::new(*x, poly.evaluate(&field, *x)))
			.collect();
		for at in [0u32, 1, 4, 77, 255].iter() {
			assert_eq!(interpolate_at(&field, &shares, *at).unwrap(), poly.evaluate(&field, *at));
		}
	}

	#[test]
	fn single_share_is_constant() {
		let field = GaloisField::new(16).unwrap();
		let shares = [Share::new(12, 999)];
		assert_eq!(interpolate_at(&field, &shares, 0), Ok(999));
	}

	#[test]
	fn input_validation() {
		let field = GaloisField::new(4).unwrap();
		assert_eq!(interpolate_at(&field, &[], 0), Err(SharingError::InsufficientShares));
		assert_eq!(
			interpolate_at(&field, &[Share::new(1, 2), Share::new(16, 3)], 0),
			Err(SharingError::ElementOutOfRange(16))
		);
		assert_eq!(
			interpolate_at(&field, &[Share::new(1, 20)], 0),
			Err(SharingError::ElementOutOfRange(20))
		);
		assert_eq!(
			interpolate_at(&field, &[Share::new(3, 1), Share::new(3, 2)], 0),
			Err(SharingError::DuplicateIndex(3))
		);
		assert_eq!(interpolate_at(&field, &[Share::new(3, 1)], 99), Err(SharingError::ElementOutOfRange(99)));
	}

	#[test]
	fn repeated_index_without_validation_divides_by_zero() {
		let field = GaloisField::new(8).unwrap();
		let shares = [Share::new(2, 10), Share::new(2, 17)];
		assert_eq!(super::basis_value(&field, &shares, 0, 0), Err(SharingError::DivisionByZero));
	}
}
