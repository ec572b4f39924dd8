pub mod user;
pub mod city;
pub mod specialist;

pub use user::{User, AuthRequest, EmailQuery, UserResponse};
pub use city::{CityRecord, Coordinates, CityQuery};
pub use specialist::{
    SpecialistCategory,
    SpecialistMarker,
    SearchRequest,
    SelectRequest,
    ResetRequest,
    SearchResponse,
};
