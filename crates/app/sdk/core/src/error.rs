//! Compact error codes for the storage and execution layers.
//!
//! ## Error ID Conventions
//!
//! Each error has a 16-bit ID composed of:
//! - Upper 8 bits: Crate namespace (derived from the defining crate's name)
//! - Lower 8 bits: Local error ID (0x00-0xFF)
//!
//! ### Recommended Local ID Ranges:
//! - 0x00-0x3F: Validation errors (invalid input, missing data)
//! - 0x40-0x7F: System errors (internal failures, resource limits)
//! - 0x80-0xBF: Business logic errors
//! - 0xC0-0xFF: Reserved for future use

use core::fmt;

/* ───────────────────────────── Runtime handle ──────────────────────────── */

#[derive(Clone, Copy)]
pub struct ErrorCode {
    pub id: u16,
    pub arg: u16,
    text: &'static str,
}

impl ErrorCode {
    pub const fn new(id: u16, text: &'static str) -> Self {
        Self { id, arg: 0, text }
    }
    pub const fn with_arg(self, arg: u16) -> Self {
        Self {
            id: self.id,
            arg,
            text: self.text,
        }
    }
    pub const fn code(self) -> u64 {
        self.id as u64
    }
    pub const fn arg(self) -> u16 {
        self.arg
    }
    pub const fn text(self) -> &'static str {
        self.text
    }
}

// The text is a rendering hint; identity is the (id, arg) pair.
impl PartialEq for ErrorCode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.arg == other.arg
    }
}

impl Eq for ErrorCode {}

/* ───────────────────── Display / Debug implementations ─────────────────── */

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text.find("{arg}") {
            Some(pos) => {
                f.write_str(&self.text[..pos])?;
                write!(f, "{}", self.arg)?;
                f.write_str(&self.text[pos + 5..])
            }
            None => f.write_str(self.text),
        }
    }
}

impl fmt::Debug for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ErrorCode {{ id: {:#06x}, arg: {}, text: {:?} }}",
            self.id, self.arg, self.text
        )
    }
}

impl std::error::Error for ErrorCode {}

/* ───────────────────── define_error! helper macro ──────────────────────── */

#[macro_export]
macro_rules! define_error {
    ($ident:ident, $local:expr, $text:expr) => {
        #[allow(dead_code)]
        pub const $ident: $crate::error::ErrorCode = {
            const LOCAL_ID: u16 = $local;
            // Compile-time assertion to ensure local ID fits in u8
            const _: () = assert!(
                LOCAL_ID <= 0xFF,
                "Local error ID must be <= 0xFF to fit in u8"
            );
            $crate::error::ErrorCode::new(
                (($crate::error::crate_namespace(env!("CARGO_PKG_NAME")) as u16) << 8)
                    | (LOCAL_ID & 0xFF),
                $text,
            )
        };
    };
}

/* ────────────────── Per-crate namespace (compile-time FNV-1a) ──────────── */

/// Namespace byte for a crate, computed from its package name.
///
/// `define_error!` expands `env!("CARGO_PKG_NAME")` at the call site, so every
/// crate gets its own namespace.
pub const fn crate_namespace(package_name: &str) -> u8 {
    const FNV_PRIME: u64 = 0x100000001b3;
    const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;

    let bytes = package_name.as_bytes();
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    (hash & 0xFF) as u8
}

/* ───────────────────────────── Unit tests ──────────────────────────────── */
