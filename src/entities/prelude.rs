pub use super::cities::Entity as Cities;
pub use super::searches::Entity as Searches;
