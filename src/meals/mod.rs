//! Meal log: owner-scoped CRUD over meal records plus daily aggregates.

pub mod models;
pub mod repository;
pub mod service;

pub use models::{AdminMealView, DailyConsumption, Meal, MealFields, MealScope};
pub use repository::{MealRepository, PgMealRepository};
pub use service::MealService;
