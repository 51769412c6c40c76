//! # Tessera-Lib
//! The `no_std` core of Tessera: arithmetic over GF(2^p) and Shamir's threshold secret sharing
//! built on top of it.
//!
//! ```
//! use tessera_lib::sharing::SharingAlgorithm;
//! use tessera_lib::ShamirSecretSharing;
//!
//! let mut sharer = ShamirSecretSharing::from_field_size(8).unwrap();
//! let shares = sharer.share(200, 5, 3).unwrap();
//! let quorum = shares.select(&[2, 4, 5]).unwrap();
//! assert_eq!(sharer.reconstruct(&quorum).unwrap(), 200);
//! ```
#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod field;
pub mod sharing;

pub use field::GaloisField;
pub use sharing::shamir::ShamirSecretSharing;
