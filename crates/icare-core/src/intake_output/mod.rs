mod model;

pub use model::{FluidBalance, IntakeOutputRecord, IntakeOutputType};
