//! A small reference ecosystem of operators exercising every documented
//! engine invariant — reference counting, diamond graphs, compute-all-bands,
//! bounds intersection, cancellation — through real (if trivial) tile pulls.
//! None of this is meant to be a real image-processing library.

pub mod filter_brighten;
pub mod merge_blend;
pub mod raster;
pub mod read_constant;
pub mod registry;
pub mod write_collect;

pub use filter_brighten::FilterBrighten;
pub use merge_blend::MergeBlend;
pub use raster::{ComputedBand, MemoryProduct, MemoryRaster};
pub use read_constant::ReadConstant;
pub use registry::{OperatorFactory, Registry};
pub use write_collect::WriteCollect;
