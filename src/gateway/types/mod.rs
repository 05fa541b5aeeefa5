//! Gateway types module
//!
//! - [`request`]: validated request bodies, one per route
//! - [`extract`]: `ValidatedJson` and `IdPath` extractors
//! - [`response`]: the success envelope and response DTOs

pub mod extract;
pub mod request;
pub mod response;

pub use extract::{IdPath, ValidatedJson};
pub use request::{
    AdminCreateUserRequest, AdminMealRequest, AdminUpdateUserRequest, MealRequest,
    ProfileRequest, ResetPasswordRequest,
};
pub use response::{ApiResponse, MealsOverview, UserDataResponse};
