pub mod category;
pub mod project;

pub use category::Category;
