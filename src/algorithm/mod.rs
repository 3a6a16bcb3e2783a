/// Mosaic orchestration and selection policy
pub mod assembler;
/// Candidate pool with index-based consumption
pub mod pool;

pub use assembler::{MosaicAssembler, MosaicConfig, create_mosaic};
pub use pool::CandidatePool;
