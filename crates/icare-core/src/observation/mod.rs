mod model;

pub use model::{ObservationCategory, ObservationRecord};
