//! Arithmetic over the binary extension field GF(2^p).
//!
//! Elements are plain `u32` values in `[0, 2^p)`, read as polynomials over GF(2). Addition is XOR
//! and multiplication is carry-less multiplication reduced by a fixed primitive polynomial of
//! degree `p`.
use alloc::vec::Vec;
use core::fmt;

use rand::Rng;
use rand_core::RngCore;

mod polynomials;

use polynomials::REDUCTION_POLYNOMIALS;

/// Widest supported field, bounded by the `u32` element representation.
pub const MAX_FIELD_BITS: u32 = 32;

/// Fields up to this size get log/antilog lookup tables at construction.
pub const LOOKUP_TABLE_MAX_BITS: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
	InvalidFieldSize(u32),
	DivisionByZero,
	ElementOutOfRange(u32),
}

impl fmt::Display for FieldError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldError::InvalidFieldSize(p) => write!(f, "unsupported field size 2^{} (expected 1..={})", p, MAX_FIELD_BITS),
			FieldError::DivisionByZero => write!(f, "division by zero"),
			FieldError::ElementOutOfRange(v) => write!(f, "{} is not an element of the field", v),
		}
	}
}

#[cfg(feature = "std")]
impl std::error::Error for FieldError {}

/// Source of uniformly distributed field elements.
///
/// Every [`RngCore`] is one. The sharing layer takes this as an injected capability, so tests can
/// substitute a seeded or fixed sequence.
pub trait ElementSource {
	fn next_uniform_element(&mut self, field: &GaloisField) -> u32;
}

impl<R: RngCore> ElementSource for R {
	fn next_uniform_element(&mut self, field: &GaloisField) -> u32 {
		field.random_element(self)
	}
}

#[derive(Debug, Clone)]
struct LogTables {
	// exp has length 2 * (2^p - 1) so that log[a] + log[b] never needs a reduction.
	exp: Vec<u32>,
	log: Vec<u32>,
}

#[derive(Debug, Clone)]
pub struct GaloisField {
	bits: u32,
	modulus: u64,
	max_element: u32,
	tables: Option<LogTables>,
}

impl GaloisField {
	pub fn new(bits: u32) -> Result<Self, FieldError> {
		if bits == 0 || bits > MAX_FIELD_BITS {
			return Err(FieldError::InvalidFieldSize(bits))
		}
		let mut field = GaloisField {
			bits,
			modulus: REDUCTION_POLYNOMIALS[bits as usize],
			max_element: u32::MAX >> (MAX_FIELD_BITS - bits),
			tables: None,
		};
		if bits <= LOOKUP_TABLE_MAX_BITS {
			field.tables = field.build_tables();
		}
		tracing::debug!(bits, lookup_tables = field.tables.is_some(), "constructed field");
		Ok(field)
	}

	/// Generates the multiplicative group from `x`. Returns `None` if `x` is not a generator.
	fn build_tables(&self) -> Option<LogTables> {
		let group_order = self.max_element as usize;
		let mut exp = alloc::vec![0u32; 2 * group_order];
		let mut log = alloc::vec![0u32; group_order + 1];
		let generator = if self.bits == 1 { 1 } else { 2 };
		let mut value = 1u32;
		for i in 0..group_order {
			if i > 0 && value == 1 {
				return None
			}
			exp[i] = value;
			exp[i + group_order] = value;
			log[value as usize] = i as u32;
			value = self.carryless_multiply(value, generator);
		}
		if value != 1 {
			return None
		}
		Some(LogTables { exp, log })
	}

	pub fn bits(&self) -> u32 {
		self.bits
	}

	/// Number of elements, `2^p`.
	pub fn order(&self) -> u64 {
		1u64 << self.bits
	}

	pub fn max_element(&self) -> u32 {
		self.max_element
	}

	/// The reduction polynomial, including its `x^p` term.
	pub fn modulus(&self) -> u64 {
		self.modulus
	}

	pub fn contains(&self, value: u32) -> bool {
		value <= self.max_element
	}

	pub fn element(&self, value: u32) -> Result<u32, FieldError> {
		if self.contains(value) {
			Ok(value)
		} else {
			Err(FieldError::ElementOutOfRange(value))
		}
	}

	/// Operands are taken modulo `2^p`: bits above the field width are dropped.
	pub fn add(&self, a: u32, b: u32) -> u32 {
		(a ^ b) & self.max_element
	}

	/// Identical to [`GaloisField::add`] in characteristic 2.
	pub fn subtract(&self, a: u32, b: u32) -> u32 {
		self.add(a, b)
	}

	/// Operands are taken modulo `2^p` like in [`GaloisField::add`]. Use
	/// [`GaloisField::element`] first where out of range input has to be an error.
	pub fn multiply(&self, a: u32, b: u32) -> u32 {
		let (a, b) = (a & self.max_element, b & self.max_element);
		match &self.tables {
			Some(tables) => {
				if a == 0 || b == 0 {
					return 0
				}
				let index = tables.log[a as usize] + tables.log[b as usize];
				tables.exp[index as usize]
			}
			None => self.carryless_multiply(a, b),
		}
	}

	fn carryless_multiply(&self, a: u32, b: u32) -> u32 {
		let mut product: u64 = 0;
		let a = a as u64;
		let mut b = b;
		let mut shift = 0;
		while b != 0 {
			if b & 1 == 1 {
				product ^= a << shift;
			}
			b >>= 1;
			shift += 1;
		}
		let mut bit = 2 * self.bits;
		while bit > self.bits {
			bit -= 1;
			if product & (1u64 << bit) != 0 {
				product ^= self.modulus << (bit - self.bits);
			}
		}
		product as u32
	}

	pub fn inverse(&self, a: u32) -> Result<u32, FieldError> {
		let a = self.element(a)?;
		if a == 0 {
			return Err(FieldError::DivisionByZero)
		}
		match &self.tables {
			Some(tables) => {
				let group_order = self.max_element;
				let index = (group_order - tables.log[a as usize]) % group_order;
				Ok(tables.exp[index as usize])
			}
			// a^(2^p - 1) = 1, hence a^(2^p - 2) = a^-1
			None => Ok(self.pow(a, self.order() - 2)),
		}
	}

	pub fn divide(&self, a: u32, b: u32) -> Result<u32, FieldError> {
		let a = self.element(a)?;
		let inverse = self.inverse(b)?;
		Ok(self.multiply(a, inverse))
	}

	pub fn pow(&self, base: u32, mut exponent: u64) -> u32 {
		let mut result = 1;
		let mut base = base;
		while exponent != 0 {
			if exponent & 1 == 1 {
				result = self.multiply(result, base);
			}
			base = self.multiply(base, base);
			exponent >>= 1;
		}
		result
	}

	/// Uniform over the whole field, zero included.
	pub fn random_element<R: RngCore>(&self, rng: &mut R) -> u32 {
		rng.gen_range(0..=self.max_element)
	}
}
