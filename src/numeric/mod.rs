// ============================================================================
// Numeric Module
// Decimal capability set and the backend adapters that satisfy it
// ============================================================================
//
// This module provides:
// - DecimalOps: the capability set the calculator is generic over
// - DecimalFactory: the injected integer-to-decimal constructor
// - NumericError: error type shared by the bundled backends
// - fixed: rust_decimal adapter (96-bit mantissa, scale <= 28)
// - arbitrary: bigdecimal adapter (exact, unbounded precision)
//
// Design principles:
// - No floating-point operations anywhere
// - Every arithmetic step returns Result (no panics)
// - Precision loss only through explicit div_round/truncate places

mod errors;
mod ops;

pub mod arbitrary;
pub mod fixed;

pub use errors::{NumericError, NumericResult};
pub use ops::{DecimalFactory, DecimalOps};
