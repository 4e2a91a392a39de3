mod model;

pub use model::{EmergencyContact, PatientProfile};
