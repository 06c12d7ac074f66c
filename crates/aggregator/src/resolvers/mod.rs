pub mod batch;
pub mod best_effort;
pub mod until_failure;

pub use batch::BatchAllOrFail;
pub use best_effort::BestEffortAccumulate;
pub use until_failure::AccumulateUntilFailure;
