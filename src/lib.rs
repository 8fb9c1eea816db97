#![doc(html_root_url = "https://docs.rs/shamir-reconstruct/0.1.0")]

//! Recover a Shamir secret from shares written in a small JSON-like text
//! format.
//!
//! ```
//! use shamir_reconstruct::{extract_shares, recover_secret};
//!
//! let text = r#"{
//!     "keys": {
//!         "n": 2,
//!         "k": 2
//!     },
//!     "1": {
//!         "base": "10",
//!         "value": "12"
//!     },
//!     "2": {
//!         "base": "16",
//!         "value": "11"
//!     }
//! }"#;
//!
//! let extraction = extract_shares(text).unwrap();
//! let secret = recover_secret(&extraction.shares, extraction.parameters.k).unwrap();
//! assert_eq!(secret.to_string(), "7");
//! ```

pub mod constants;

mod shamir_error;
pub use shamir_error::{ShamirError, ShareDecodeError};

mod share;
pub use share::{Parameters, Share, decode_share, parse_radix, parse_value};

mod scanner;
pub use scanner::{Extraction, LineShape, RejectedShare, ScanEvent, ShareScanner};

mod extract;
pub use extract::{extract_shares, extract_shares_from_file};

mod interpolate;
pub use interpolate::interpolate;

mod shamir;
pub use shamir::{RecoveryMode, recover, recover_secret, recover_secret_checked};
