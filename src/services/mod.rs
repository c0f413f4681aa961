pub mod pokemon;
pub mod sync;

pub use pokemon::PokemonGenerator;
pub use sync::{SyncReport, SyncService};
