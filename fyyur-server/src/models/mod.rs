//! Form models with validation at construction
//!
//! All user input is validated before it reaches the database.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod choices;
pub mod fields;
pub mod venue;
pub mod artist;
pub mod show;
pub mod search;

pub use validation::ValidationError;
pub use choices::{GENRES, US_STATES};
pub use venue::{VenueFields, VenueForm};
pub use artist::{ArtistFields, ArtistForm, Genres};
pub use show::{parse_start_time, Scheduled, ShowFields, ShowForm, ShowHistory};
pub use search::{SearchForm, SearchResults, SearchTerm};
