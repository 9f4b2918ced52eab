pub mod admin;
pub mod artworks;
pub mod categories;
