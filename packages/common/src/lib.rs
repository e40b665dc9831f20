pub mod averaging;
pub mod exam_kind;

pub use averaging::{
    AnnualAverageValues, BLOCKS_PER_YEAR, BlockAverageValues, BlockSlots, GradeWeights,
    WeightsError,
};
pub use exam_kind::ExamKind;
