// Service exports
pub mod enhancer;
pub mod places;

pub use enhancer::{build_prompt, parse_enhancements, strip_code_fences, CompletionEnhancer, EnhanceError, Enhancer};
pub use places::{PlaceSearch, PlacesClient, PlacesError};
