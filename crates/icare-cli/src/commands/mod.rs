pub mod events;
pub mod overview;
pub mod profile;
pub mod record;
pub mod report;

use icare_core::session::CareSession;
use icare_infrastructure::TomlRecordStore;

/// The session every command runs against.
pub type Session = CareSession<TomlRecordStore>;
