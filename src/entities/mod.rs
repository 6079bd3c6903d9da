//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the storefront collections. Each entity has a Model
//! struct for data and an Entity struct for operations.

pub mod cart;
pub mod category;
pub mod order;
pub mod product;
pub mod user;

// Re-export specific types to avoid conflicts
pub use cart::{Column as CartColumn, Entity as Cart, Model as CartModel};
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use product::{
    Column as ProductColumn, Entity as Product, Model as ProductModel, ProductStatus,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel, Role};
