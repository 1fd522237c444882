/// Automation module
///
/// Local side effects: file organization and launching apps or websites,
/// plus reading host vitals.

pub mod launcher;
pub mod organizer;
pub mod vitals;

pub use launcher::{AppLauncher, Spawner, SystemSpawner};
pub use organizer::DownloadsOrganizer;
pub use vitals::{ProcVitals, SystemVitals, VitalsReader};
