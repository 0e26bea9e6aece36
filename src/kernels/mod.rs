//! Pure, stateless kernels shared by the encode/decode pipeline.
//!
//! Each kernel is a small, side-effect-free transform with an exact inverse.
//! Policy decisions (which precision to quantize at, which fields count as
//! timestamps) live with the callers; the kernels only execute them.

pub mod quantize;
pub mod timestamp;
