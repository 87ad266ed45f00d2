pub mod profile;
pub mod recommendation;
pub mod reference;
