pub mod error;
pub mod filter;
pub mod florist;
pub mod listing;

pub use error::{ApiError, ValidationErrors, ViolationKind};
pub use filter::Filter;
pub use florist::{Contact, ContactMethod, Florist, FloristQuery, FloristRequest, FloristResponse};
pub use listing::{
    DeleteListingRequest, FloristRef, FloristRefRequest, Listing, ListingQuery, ListingRequest,
    ListingResponse, NumericInput,
};
