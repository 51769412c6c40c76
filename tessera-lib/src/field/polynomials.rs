/// Primitive reduction polynomials over GF(2), indexed by degree.
///
/// Bit `i` set means the term `x^i` is present, so every entry has bit `p` set. Index 0 is unused.
pub(crate) const REDUCTION_POLYNOMIALS: [u64; 33] = [
	0,
	0x3,           // x + 1
	0x7,           // x^2 + x + 1
	0xb,           // x^3 + x + 1
	0x13,          // x^4 + x + 1
	0x25,          // x^5 + x^2 + 1
	0x5b,          // x^6 + x^4 + x^3 + x + 1
	0x83,          // x^7 + x + 1
	0x11d,         // x^8 + x^4 + x^3 + x^2 + 1
	0x211,         // x^9 + x^4 + 1
	0x409,         // x^10 + x^3 + 1
	0x805,         // x^11 + x^2 + 1
	0x1053,        // x^12 + x^6 + x^4 + x + 1
	0x201b,        // x^13 + x^4 + x^3 + x + 1
	0x402b,        // x^14 + x^5 + x^3 + x + 1
	0x8003,        // x^15 + x + 1
	0x1002d,       // x^16 + x^5 + x^3 + x^2 + 1
	0x20009,       // x^17 + x^3 + 1
	0x40027,       // x^18 + x^5 + x^2 + x + 1
	0x80027,       // x^19 + x^5 + x^2 + x + 1
	0x100009,      // x^20 + x^3 + 1
	0x200005,      // x^21 + x^2 + 1
	0x400003,      // x^22 + x + 1
	0x800021,      // x^23 + x^5 + 1
	0x100001b,     // x^24 + x^4 + x^3 + x + 1
	0x2000009,     // x^25 + x^3 + 1
	0x4000047,     // x^26 + x^6 + x^2 + x + 1
	0x8000027,     // x^27 + x^5 + x^2 + x + 1
	0x10000009,    // x^28 + x^3 + 1
	0x20000005,    // x^29 + x^2 + 1
	0x40000053,    // x^30 + x^6 + x^4 + x + 1
	0x80000009,    // x^31 + x^3 + 1
	0x1000000c5,   // x^32 + x^7 + x^6 + x^2 + 1
];

#[cfg(test)]
mod irreducibility_test {
	use crate::field::polynomials::REDUCTION_POLYNOMIALS;
	use crate::field::GaloisField;

	fn degree(a: u64) -> u32 {
		63 - a.leading_zeros()
	}

	fn poly_rem(mut a: u64, b: u64) -> u64 {
		let db = degree(b);
		while a != 0 && degree(a) >= db {
			a ^= b << (degree(a) - db);
		}
		a
	}

	fn poly_gcd(mut a: u64, mut b: u64) -> u64 {
		while b != 0 {
			let r = poly_rem(a, b);
			a = b;
			b = r;
		}
		a
	}

	fn prime_factors(mut n: u32) -> alloc::vec::Vec<u32> {
		let mut factors = alloc::vec::Vec::new();
		let mut q = 2;
		while q * q <= n {
			if n % q == 0 {
				factors.push(q);
				while n % q == 0 {
					n /= q;
				}
			}
			q += 1;
		}
		if n > 1 {
			factors.push(n);
		}
		factors
	}

	/// x^(2^e) mod f, using field squaring.
	fn frobenius(field: &GaloisField, x: u32, e: u32) -> u32 {
		let mut r = x;
		for _ in 0..e {
			r = field.multiply(r, r);
		}
		r
	}

	#[test]
	fn degrees_match_index() {
		for (p, poly) in REDUCTION_POLYNOMIALS.iter().enumerate().skip(1) {
			assert_eq!(degree(*poly), p as u32);
			assert_eq!(poly & 1, 1, "x divides polynomial of degree {}", p);
		}
	}

	// Rabin's test: f of degree p is irreducible iff x^(2^p) = x mod f and
	// gcd(x^(2^(p/q)) - x, f) = 1 for every prime q dividing p.
	#[test]
	fn rabin_irreducibility() {
		for p in 1..=32u32 {
			let field = GaloisField::new(p).unwrap();
			let f = field.modulus();
			let x = poly_rem(0b10, f) as u32;
			assert_eq!(frobenius(&field, x, p), x, "x^(2^{}) != x", p);
			for q in prime_factors(p) {
				let h = frobenius(&field, x, p / q) ^ x;
				assert_eq!(poly_gcd(f, h as u64), 1, "degree {} fails for q = {}", p, q);
			}
		}
	}
}
