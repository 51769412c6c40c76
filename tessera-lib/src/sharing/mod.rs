use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::field::FieldError;

pub mod lagrange;
pub mod polynomial;
pub mod shamir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharingError {
	InvalidFieldSize(u32),
	InvalidThreshold { n: u32, k: u32 },
	/// More shares requested than the field has nonzero elements.
	TooManyShares { n: u32, max: u32 },
	SecretOutOfRange(u32),
	ZeroIndex,
	DuplicateIndex(u32),
	DivisionByZero,
	InsufficientShares,
	ElementOutOfRange(u32),
	UnknownIndex(u32),
}

impl fmt::Display for SharingError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SharingError::InvalidFieldSize(p) => write!(f, "unsupported field size 2^{}", p),
			SharingError::InvalidThreshold { n, k } => write!(f, "threshold {} is not within 1..={}", k, n),
			SharingError::TooManyShares { n, max } => write!(f, "{} shares requested, field allows at most {}", n, max),
			SharingError::SecretOutOfRange(s) => write!(f, "secret {} does not fit the field", s),
			SharingError::ZeroIndex => write!(f, "share index 0 is not allowed"),
			SharingError::DuplicateIndex(x) => write!(f, "share index {} given more than once", x),
			SharingError::DivisionByZero => write!(f, "division by zero"),
			SharingError::InsufficientShares => write!(f, "no shares given"),
			SharingError::ElementOutOfRange(v) => write!(f, "{} is not an element of the field", v),
			SharingError::UnknownIndex(x) => write!(f, "no share with index {}", x),
		}
	}
}

#[cfg(feature = "std")]
impl std::error::Error for SharingError {}

impl From<FieldError> for SharingError {
	fn from(e: FieldError) -> Self {
		match e {
			FieldError::InvalidFieldSize(p) => SharingError::InvalidFieldSize(p),
			FieldError::DivisionByZero => SharingError::DivisionByZero,
			FieldError::ElementOutOfRange(v) => SharingError::ElementOutOfRange(v),
		}
	}
}

pub trait SharingAlgorithm {
	/// Splits `secret` into `n` shares, any `k` of which recover it.
	fn share(&mut self, secret: u32, n: u32, k: u32) -> Result<ShareSet, SharingError>;
	/// Recovers the secret from at least `k` distinct shares.
	///
	/// With fewer shares than the threshold used at split time the result is some field element
	/// with no relation to the secret. Nothing here can tell, so callers that care must carry `k`.
	fn reconstruct(&self, shares: &[Share]) -> Result<u32, SharingError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Share {
	pub index: u32,
	pub value: u32,
}

impl Share {
	pub fn new(index: u32, value: u32) -> Self {
		Self { index, value }
	}
}

/// Index to value mapping of the shares of one secret.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareSet {
	shares: HashMap<u32, u32>,
}

impl ShareSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			shares: HashMap::with_capacity(capacity),
		}
	}

	pub fn insert(&mut self, share: Share) -> Result<(), SharingError> {
		if self.shares.contains_key(&share.index) {
			return Err(SharingError::DuplicateIndex(share.index))
		}
		self.shares.insert(share.index, share.value);
		Ok(())
	}

	pub fn get(&self, index: u32) -> Option<Share> {
		self.shares.get(&index).map(|value| Share::new(index, *value))
	}

	pub fn len(&self) -> usize {
		self.shares.len()
	}

	pub fn is_empty(&self) -> bool {
		self.shares.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = Share> + '_ {
		self.shares.iter().map(|(index, value)| Share::new(*index, *value))
	}

	/// All shares, ordered by index.
	pub fn to_vec(&self) -> Vec<Share> {
		let mut shares: Vec<Share> = self.iter().collect();
		shares.sort_unstable_by_key(|share| share.index);
		shares
	}

	/// The shares with the given indices, in the given order.
	pub fn select(&self, indices: &[u32]) -> Result<Vec<Share>, SharingError> {
		indices
			.iter()
			.map(|index| self.get(*index).ok_or(SharingError::UnknownIndex(*index)))
			.collect()
	}
}

#[cfg(test)]
mod share_set_test {
	use crate::sharing::{Share, ShareSet, SharingError};

	#[test]
	fn rejects_second_share_for_index() {
		let mut set = ShareSet::new();
		set.insert(Share::new(2, 10)).unwrap();
		assert_eq!(set.insert(Share::new(2, 17)), Err(SharingError::DuplicateIndex(2)));
		assert_eq!(set.get(2), Some(Share::new(2, 10)));
		assert_eq!(set.len(), 1);
	}

	#[test]
	fn select_and_order() {
		let mut set = ShareSet::with_capacity(3);
		for (x, y) in [(3, 30), (1, 10), (2, 20)].iter() {
			set.insert(Share::new(*x, *y)).unwrap();
		}
		assert_eq!(set.to_vec(), [Share::new(1, 10), Share::new(2, 20), Share::new(3, 30)]);
		assert_eq!(set.select(&[3, 1]).unwrap(), [Share::new(3, 30), Share::new(1, 10)]);
		assert_eq!(set.select(&[4]).unwrap_err(), SharingError::UnknownIndex(4));
		assert!(!set.is_empty());
	}
}
