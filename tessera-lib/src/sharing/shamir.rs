use rand::rngs::OsRng;

use crate::field::{ElementSource, GaloisField};
use crate::sharing::lagrange::interpolate_at;
use crate::sharing::polynomial::Polynomial;
use crate::sharing::{Share, ShareSet, SharingAlgorithm, SharingError};

/// Shamir's k-of-n scheme over GF(2^p).
///
/// The element source draws the polynomial coefficients; [`OsRng`] unless another one is injected.
pub struct ShamirSecretSharing<S = OsRng> {
	field: GaloisField,
	source: S,
}

impl ShamirSecretSharing<OsRng> {
	pub fn from_field_size(bits: u32) -> Result<Self, SharingError> {
		let field = GaloisField::new(bits)?;
		Ok(Self::new(field, OsRng))
	}
}

impl<S: ElementSource> ShamirSecretSharing<S> {
	pub fn new(field: GaloisField, source: S) -> Self {
		Self { field, source }
	}

	pub fn field(&self) -> &GaloisField {
		&self.field
	}

	pub fn reconstruct_set(&self, shares: &ShareSet) -> Result<u32, SharingError> {
		self.reconstruct(&shares.to_vec())
	}

	/// Value at `index` of the polynomial the given shares lie on, i.e. a fresh share.
	pub fn extend(&self, shares: &[Share], index: u32) -> Result<Share, SharingError> {
		if index == 0 {
			return Err(SharingError::ZeroIndex)
		}
		let value = interpolate_at(&self.field, shares, index)?;
		Ok(Share::new(index, value))
	}

	fn check_parameters(&self, secret: u32, n: u32, k: u32) -> Result<(), SharingError> {
		if k < 1 || k > n {
			return Err(SharingError::InvalidThreshold { n, k })
		}
		let max = self.field.max_element();
		if n > max {
			return Err(SharingError::TooManyShares { n, max })
		}
		if !self.field.contains(secret) {
			return Err(SharingError::SecretOutOfRange(secret))
		}
		Ok(())
	}
}

impl<S: ElementSource> SharingAlgorithm for ShamirSecretSharing<S> {
	fn share(&mut self, secret: u32, n: u32, k: u32) -> Result<ShareSet, SharingError> {
		self.check_parameters(secret, n, k)?;
		let polynomial = Polynomial::random(&self.field, &mut self.source, secret, k);

		let mut shares = ShareSet::with_capacity(n as usize);
		for x in 1..=n {
			shares.insert(Share::new(x, polynomial.evaluate(&self.field, x)))?;
		}
		tracing::debug!(n, k, bits = self.field.bits(), "generated shares");
		Ok(shares)
	}

	fn reconstruct(&self, shares: &[Share]) -> Result<u32, SharingError> {
		if shares.iter().any(|share| share.index == 0) {
			return Err(SharingError::ZeroIndex)
		}
		let secret = interpolate_at(&self.field, shares, 0)?;
		tracing::debug!(m = shares.len(), bits = self.field.bits(), "reconstructed secret");
		Ok(secret)
	}
}
